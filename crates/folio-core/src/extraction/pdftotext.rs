use crate::error::FolioError;
use crate::extraction::{split_form_feeds, DocumentSource};
use crate::model::Page;
use std::io::Write;
use std::process::{Command, Output};

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Reading order is used by default. With `layout` set, `-layout` keeps the
/// column alignment and leading indentation, which helps nesting detection
/// in the table of contents but interleaves two-column pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdftotextSource {
    pub layout: bool,
}

impl PdftotextSource {
    pub fn new() -> Self {
        PdftotextSource { layout: false }
    }

    pub fn with_layout(layout: bool) -> Self {
        PdftotextSource { layout }
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl DocumentSource for PdftotextSource {
    fn load_pages(&self, bytes: &[u8]) -> Result<Vec<Page>, FolioError> {
        // pdftotext only reads from a path
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| FolioError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(bytes)
            .map_err(|e| FolioError::Extraction(e.to_string()))?;

        let mut cmd = Command::new("pdftotext");
        if self.layout {
            cmd.arg("-layout");
        }
        let output = cmd
            .arg("-enc")
            .arg("UTF-8")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    FolioError::PdftotextNotFound
                } else {
                    FolioError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        let text = stdout_or_error(output)?;
        let pages = split_form_feeds(&text);
        tracing::debug!(pages = pages.len(), layout = self.layout, "pdftotext extracted pages");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn stdout_or_error(output: Output) -> Result<String, FolioError> {
    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(FolioError::PdftotextFailed { code, stderr });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
