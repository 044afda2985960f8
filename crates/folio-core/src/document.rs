use crate::error::FolioError;
use crate::extraction::DocumentSource;
use crate::model::Page;
use regex::RegexBuilder;
use std::path::Path;

/// The page-numbered text of a whole document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        Document { pages }
    }

    /// Read a file and extract its pages with the given backend.
    pub fn load(path: &Path, source: &dyn DocumentSource) -> Result<Self, FolioError> {
        let bytes = std::fs::read(path)?;
        let pages = source.load_pages(&bytes)?;
        tracing::info!(
            path = %path.display(),
            backend = source.backend_name(),
            pages = pages.len(),
            "document loaded"
        );
        Ok(Document::new(pages))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Text of pages `start..=end`, joined with newlines.
    ///
    /// Page numbers outside the document are skipped, so an empty or
    /// inverted range yields an empty string.
    pub fn pages_range(&self, start: usize, end: usize) -> String {
        self.pages
            .iter()
            .filter(|p| start <= p.number && p.number <= end)
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whole document with a marker line before every page.
    pub fn full_text(&self) -> String {
        let mut text = String::new();
        for page in &self.pages {
            text.push_str(&format!("\n--- PAGE {} ---\n", page.number));
            text.push_str(&page.text);
        }
        text
    }

    /// Find a span of the full text by case-insensitive patterns.
    ///
    /// The span starts at the first `start` match and ends right before the
    /// first `end` match that follows it (or at the end of the text).
    /// Returns an empty string when `start` does not match.
    pub fn find_span(&self, start: &str, end: Option<&str>) -> Result<String, FolioError> {
        let start_re = build_search_regex(start)?;
        let end_re = end.map(build_search_regex).transpose()?;

        let text = self.full_text();
        let Some(start_match) = start_re.find(&text) else {
            return Ok(String::new());
        };
        let from = start_match.start();

        // Searching from the next char lets `end` equal `start` without matching itself.
        let search_from = text[from..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| from + i)
            .unwrap_or(text.len());

        let to = end_re
            .and_then(|re| re.find(&text[search_from..]))
            .map(|m| search_from + m.start())
            .unwrap_or(text.len());

        Ok(text[from..to].to_string())
    }
}

fn build_search_regex(pattern: &str) -> Result<regex::Regex, FolioError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| FolioError::PatternInvalid(format!("'{}': {}", pattern, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::new(vec![
            Page::new(1, "Capa"),
            Page::new(2, "Capítulo 1\nRaças"),
            Page::new(3, "Anão\nConstituição +2"),
            Page::new(4, "Capítulo 2\nClasses"),
        ])
    }

    #[test]
    fn test_pages_range_inclusive() {
        assert_eq!(doc().pages_range(2, 3), "Capítulo 1\nRaças\nAnão\nConstituição +2");
    }

    #[test]
    fn test_pages_range_outside_document_skipped() {
        assert_eq!(doc().pages_range(4, 99), "Capítulo 2\nClasses");
        assert_eq!(doc().pages_range(50, 60), "");
        assert_eq!(doc().pages_range(3, 2), "");
    }

    #[test]
    fn test_full_text_has_page_markers() {
        let text = doc().full_text();
        assert!(text.contains("--- PAGE 3 ---\nAnão"));
    }

    #[test]
    fn test_find_span_between_patterns() {
        let span = doc().find_span("capítulo 1", Some("capítulo 2")).unwrap();
        assert!(span.starts_with("Capítulo 1"));
        assert!(span.contains("Anão"));
        assert!(!span.contains("Classes"));
    }

    #[test]
    fn test_find_span_same_pattern_twice() {
        let span = doc().find_span("capítulo", Some("capítulo")).unwrap();
        assert!(span.starts_with("Capítulo 1"));
        assert!(!span.contains("Capítulo 2"));
    }

    #[test]
    fn test_find_span_without_end_runs_to_text_end() {
        let span = doc().find_span("classes", None).unwrap();
        assert_eq!(span, "Classes");
    }

    #[test]
    fn test_find_span_no_match_is_empty() {
        assert_eq!(doc().find_span("dragões", None).unwrap(), "");
    }

    #[test]
    fn test_find_span_invalid_pattern() {
        assert!(matches!(
            doc().find_span("(", None),
            Err(FolioError::PatternInvalid(_))
        ));
    }
}
