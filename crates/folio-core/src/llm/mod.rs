pub mod ollama;
pub mod response;

use crate::error::FolioError;

pub use ollama::OllamaClient;

/// A text-generation backend.
pub trait ModelClient: Send + Sync {
    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Liveness probe. Any failure counts as unavailable.
    fn check_availability(&self) -> bool;

    /// Installed model identifiers, best effort (empty on failure).
    fn list_models(&self) -> Vec<String>;

    /// One non-streaming generation request; returns the raw response text.
    fn generate(&self, system: &str, user: &str, temperature: f32) -> Result<String, FolioError>;

    /// Address used in error messages.
    fn endpoint(&self) -> &str {
        "model backend"
    }
}

/// Whether `model` appears in `installed`, ignoring tag suffixes
/// (`mistral` matches `mistral:latest`).
pub fn model_installed(model: &str, installed: &[String]) -> bool {
    let wanted = model.split(':').next().unwrap_or(model);
    installed
        .iter()
        .any(|m| m.split(':').next().unwrap_or(m) == wanted)
}
