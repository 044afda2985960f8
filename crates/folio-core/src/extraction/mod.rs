pub mod pdftotext;
pub mod plaintext;

use crate::error::FolioError;
use crate::model::Page;

/// Trait for document text extraction backends.
pub trait DocumentSource: Send + Sync {
    /// Extract text from document bytes, returning one Page per page, numbered from 1.
    fn load_pages(&self, bytes: &[u8]) -> Result<Vec<Page>, FolioError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Split text on form feeds into numbered pages.
///
/// Both pdftotext and pre-extracted text files separate pages with `\x0c`.
/// The empty segment after a final form feed is not a page.
pub(crate) fn split_form_feeds(text: &str) -> Vec<Page> {
    let mut segments: Vec<&str> = text.split('\x0c').collect();
    if segments.len() > 1 && segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| Page::new(i + 1, page_text))
        .collect()
}
