pub mod config;
pub mod document;
pub mod entity;
pub mod error;
pub mod extraction;
pub mod llm;
pub mod model;
pub mod parsing;
pub mod patterns;
pub mod pipeline;
pub mod prompts;
pub mod store;
pub mod validate;

use document::Document;
use entity::canonical_type;
use error::FolioError;
use model::EntityChunk;
use parsing::sections::SectionMap;
use patterns::PatternRegistry;

/// Entity chunks cut out of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Slug of the resolved section.
    pub section: String,
    /// Canonical entity type whose pattern was used.
    pub entity_type: String,
    pub chunks: Vec<EntityChunk>,
}

/// Map the document's table of contents to sections.
pub fn list_sections(doc: &Document, toc_start: usize, toc_end: usize) -> SectionMap {
    parsing::sections::build_sections(doc, toc_start, toc_end)
}

/// Resolve a section and split it into entity chunks.
///
/// Without an explicit `entity_type` the type is inferred from the section
/// name (as requested, then as resolved); failing that, the registry's
/// fallback type is used.
pub fn extract_entities(
    doc: &Document,
    sections: &SectionMap,
    section: &str,
    entity_type: Option<&str>,
    patterns: &PatternRegistry,
) -> Result<Extracted, FolioError> {
    let (key, found) = sections.resolve(section)?;
    let text = doc.pages_range(found.start_page, found.end_page);

    let entity_type = match entity_type {
        Some(t) => canonical_type(t),
        None => patterns
            .infer_entity_type(section)
            .or_else(|| patterns.infer_entity_type(key))
            .unwrap_or(patterns.fallback_type())
            .to_string(),
    };

    let chunks = parsing::split::split_by_headers(&text, patterns.pattern_for(&entity_type));
    tracing::info!(
        section = key,
        pages = %format!("{}-{}", found.start_page, found.end_page),
        entity_type = %entity_type,
        entities = chunks.len(),
        "section split"
    );

    Ok(Extracted {
        section: key.to_string(),
        entity_type,
        chunks,
    })
}
