use crate::document::Document;
use crate::error::FolioError;
use crate::model::{Section, TocEntry};
use crate::parsing::slug::slugify;
use indexmap::IndexMap;
use serde::Serialize;

/// Sections keyed by slug, in table-of-contents order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SectionMap {
    sections: IndexMap<String, Section>,
}

impl SectionMap {
    /// Turn ordered TOC entries into page ranges.
    ///
    /// Each section ends one page before the next entry starts; the last one
    /// runs to `total_pages`. Two titles with the same slug collide and the
    /// later entry replaces the earlier one (it keeps the earlier position).
    pub fn from_toc(entries: &[TocEntry], total_pages: usize) -> Self {
        let mut sections = IndexMap::new();

        for (i, entry) in entries.iter().enumerate() {
            let end_page = match entries.get(i + 1) {
                Some(next) => next.page.saturating_sub(1),
                None => total_pages,
            };

            let slug = slugify(&entry.title);
            if sections.contains_key(&slug) {
                tracing::debug!(slug = %slug, title = %entry.title, "section slug collision, keeping last");
            }
            sections.insert(
                slug,
                Section {
                    title: entry.title.clone(),
                    start_page: entry.page,
                    end_page,
                    level: entry.level,
                },
            );
        }

        SectionMap { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&Section> {
        self.sections.get(slug)
    }

    /// All sections as `(slug, section)` in TOC order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn slugs(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    /// Find a section by slug or partial name.
    ///
    /// Tries the name as given, then its slug, then the first key that
    /// contains the slug or is contained in it.
    pub fn resolve(&self, name: &str) -> Result<(&str, &Section), FolioError> {
        if let Some((key, section)) = self.sections.get_key_value(name) {
            return Ok((key.as_str(), section));
        }

        let query = slugify(name);
        if let Some((key, section)) = self.sections.get_key_value(&query) {
            return Ok((key.as_str(), section));
        }

        if !query.is_empty() {
            let partial = self
                .sections
                .iter()
                .find(|(key, _)| key.contains(query.as_str()) || query.contains(key.as_str()));
            if let Some((key, section)) = partial {
                tracing::debug!(requested = name, resolved = %key, "partial section match");
                return Ok((key.as_str(), section));
            }
        }

        Err(FolioError::SectionNotFound {
            name: name.to_string(),
        })
    }

    /// Text of the named section's page range.
    pub fn section_text(&self, name: &str, doc: &Document) -> Result<String, FolioError> {
        let (_, section) = self.resolve(name)?;
        Ok(doc.pages_range(section.start_page, section.end_page))
    }
}

/// Parse the TOC on the given pages and map it onto the document.
pub fn build_sections(doc: &Document, toc_start: usize, toc_end: usize) -> SectionMap {
    let entries = super::toc::parse_toc(doc, toc_start, toc_end);
    if entries.is_empty() {
        tracing::warn!(toc_start, toc_end, "no table-of-contents entries found");
    }
    SectionMap::from_toc(&entries, doc.page_count())
}
