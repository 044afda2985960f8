pub mod check;
pub mod extract;
pub mod find;
pub mod models;
pub mod sections;
pub mod split;
pub mod types;

use folio_core::config::{load_config, Config};
use folio_core::document::Document;
use folio_core::error::FolioError;
use folio_core::extraction::pdftotext::PdftotextSource;
use folio_core::extraction::plaintext::PlainTextSource;
use folio_core::patterns::{builtin, load_patterns, PatternRegistry};
use std::path::{Path, PathBuf};

pub struct DocumentOptions {
    pub path: PathBuf,
    pub layout: bool,
    pub toc_start: Option<usize>,
    pub toc_end: Option<usize>,
}

impl DocumentOptions {
    pub fn toc_range(&self, config: &Config) -> (usize, usize) {
        (
            self.toc_start.unwrap_or(config.pipeline.toc_start),
            self.toc_end.unwrap_or(config.pipeline.toc_end),
        )
    }
}

/// Load a rulebook; `.txt` files are read as pre-extracted text.
pub fn load_document(path: &Path, layout: bool) -> Result<Document, FolioError> {
    let is_text = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);
    tracing::debug!(path = %path.display(), plain_text = is_text, "loading document");

    if is_text {
        Document::load(path, &PlainTextSource)
    } else if PdftotextSource::is_available() {
        Document::load(path, &PdftotextSource::with_layout(layout))
    } else {
        Err(FolioError::PdftotextNotFound)
    }
}

/// Custom pattern file if given, else the built-in Tormenta 20 set.
pub fn load_registry(patterns: Option<&Path>) -> Result<PatternRegistry, FolioError> {
    match patterns {
        Some(path) => load_patterns(path),
        None => builtin::load_preset("tormenta20"),
    }
}

pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, FolioError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}
