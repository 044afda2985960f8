use folio_core::config::Config;
use folio_core::error::FolioError;
use std::path::Path;

use super::{load_document, load_registry, DocumentOptions};
use crate::output;

pub fn run(
    doc: &DocumentOptions,
    section: &str,
    entity_type: Option<&str>,
    patterns: Option<&Path>,
    preview: usize,
    output_format: &str,
) -> Result<(), FolioError> {
    let registry = load_registry(patterns)?;
    let document = load_document(&doc.path, doc.layout)?;
    let (toc_start, toc_end) = doc.toc_range(&Config::default());
    let sections = folio_core::list_sections(&document, toc_start, toc_end);

    let extracted =
        match folio_core::extract_entities(&document, &sections, section, entity_type, &registry) {
            Err(e @ FolioError::SectionNotFound { .. }) => {
                output::table::print_sections(&sections);
                return Err(e);
            }
            other => other?,
        };

    match output_format {
        "json" => output::json::print(&serde_json::json!({
            "section": extracted.section,
            "entity_type": extracted.entity_type,
            "entities": extracted.chunks,
        }))?,
        _ => output::table::print_chunks(&extracted, preview),
    }
    Ok(())
}
