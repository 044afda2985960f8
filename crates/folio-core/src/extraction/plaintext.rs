use crate::error::FolioError;
use crate::extraction::{split_form_feeds, DocumentSource};
use crate::model::Page;

/// Backend for text that was already extracted, e.g. `pdftotext book.pdf book.txt`.
///
/// Pages are separated by form feeds. Invalid UTF-8 is replaced, not rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextSource;

impl PlainTextSource {
    pub fn new() -> Self {
        PlainTextSource
    }
}

impl DocumentSource for PlainTextSource {
    fn load_pages(&self, bytes: &[u8]) -> Result<Vec<Page>, FolioError> {
        let text = String::from_utf8_lossy(bytes);
        Ok(split_form_feeds(&text))
    }

    fn backend_name(&self) -> &str {
        "plaintext"
    }
}
