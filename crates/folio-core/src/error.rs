use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("section not found: '{name}'")]
    SectionNotFound { name: String },

    #[error("unknown entity type '{requested}'. Known types: {}", known.join(", "))]
    UnknownEntityType {
        requested: String,
        known: Vec<String>,
    },

    #[error("model backend at {url} is not answering. Start it with: ollama serve")]
    BackendUnavailable { url: String },

    #[error("timed out after {seconds}s waiting for the model response")]
    Timeout { seconds: u64 },

    #[error("connection to model backend failed: {0}")]
    ConnectionFailure(String),

    #[error("could not find structured data in the model response")]
    ExtractionFailure,

    #[error("record failed validation: {}", .0.join("; "))]
    ValidationFailure(Vec<String>),

    #[error("document text extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load pattern set from {path}: {reason}")]
    PatternLoad { path: PathBuf, reason: String },

    #[error("invalid pattern set: {0}")]
    PatternInvalid(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FolioError {
    /// Whether a failed extraction attempt with this error may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FolioError::Timeout { .. }
                | FolioError::ConnectionFailure(_)
                | FolioError::ExtractionFailure
                | FolioError::ValidationFailure(_)
        )
    }
}
