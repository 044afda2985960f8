use crate::error::FolioError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub pipeline: PipelineConfig,
}

/// Model backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Upper bound on generated tokens (`num_predict`).
    pub max_tokens: u32,
    pub request_timeout_secs: u64,
    pub probe_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: "http://localhost:11434".into(),
            model: "mistral".into(),
            temperature: 0.1,
            max_tokens: 4096,
            request_timeout_secs: 120,
            probe_timeout_secs: 5,
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub toc_start: usize,
    pub toc_end: usize,
    /// Records go to `<output_root>/<entity_type>/<id>.json`.
    pub output_root: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_retries: 2,
            retry_backoff_ms: 1000,
            toc_start: 3,
            toc_end: 6,
            output_root: PathBuf::from("json"),
        }
    }
}

impl PipelineConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

/// Load a config file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<Config, FolioError> {
    let content = std::fs::read_to_string(path).map_err(|e| FolioError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| FolioError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
