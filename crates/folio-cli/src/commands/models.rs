use folio_core::error::FolioError;
use folio_core::llm::{ModelClient, OllamaClient};
use std::path::Path;

use super::load_config_or_default;

pub fn run(ollama_url: Option<String>, config: Option<&Path>) -> Result<(), FolioError> {
    let mut config = load_config_or_default(config)?;
    if let Some(url) = ollama_url {
        config.backend.base_url = url;
    }

    let client = OllamaClient::new(&config.backend)?;
    if !client.check_availability() {
        return Err(FolioError::BackendUnavailable {
            url: config.backend.base_url,
        });
    }

    let models = client.list_models();
    if models.is_empty() {
        println!("No models installed. Install one with: ollama pull {}", config.backend.model);
        return Ok(());
    }
    for m in models {
        let marker = if m.split(':').next() == Some(config.backend.model.as_str()) {
            " (default)"
        } else {
            ""
        };
        println!("{m}{marker}");
    }
    Ok(())
}
