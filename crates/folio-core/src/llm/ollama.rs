//! Ollama HTTP backend.
//!
//! `GET /api/tags` lists installed models and doubles as the liveness probe.
//! `POST /api/generate` runs one non-streaming completion.

use crate::config::BackendConfig;
use crate::error::FolioError;
use crate::llm::ModelClient;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

pub struct OllamaClient {
    base_url: String,
    model: String,
    max_tokens: u32,
    request_timeout: Duration,
    probe_timeout: Duration,
    client: Client,
}

impl OllamaClient {
    pub fn new(config: &BackendConfig) -> Result<Self, FolioError> {
        let client = Client::builder()
            .build()
            .map_err(|e| FolioError::ConnectionFailure(e.to_string()))?;

        Ok(OllamaClient {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            request_timeout: config.request_timeout(),
            probe_timeout: config.probe_timeout(),
            client,
        })
    }

    fn tags(&self) -> Result<TagsResponse, reqwest::Error> {
        self.client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.probe_timeout)
            .send()?
            .error_for_status()?
            .json()
    }

    fn map_error(&self, e: reqwest::Error) -> FolioError {
        if e.is_timeout() {
            FolioError::Timeout {
                seconds: self.request_timeout.as_secs(),
            }
        } else {
            FolioError::ConnectionFailure(e.to_string())
        }
    }
}

impl ModelClient for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn check_availability(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).timeout(self.probe_timeout).send() {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "backend probe failed");
                false
            }
        }
    }

    fn list_models(&self) -> Vec<String> {
        match self.tags() {
            Ok(tags) => tags.models.into_iter().map(|m| m.name).collect(),
            Err(e) => {
                tracing::debug!(error = %e, "could not list models");
                Vec::new()
            }
        }
    }

    fn generate(&self, system: &str, user: &str, temperature: f32) -> Result<String, FolioError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt: user,
            system,
            stream: false,
            options: GenerateOptions {
                temperature,
                num_predict: self.max_tokens,
            },
        };

        let started = std::time::Instant::now();
        let resp: GenerateResponse = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(self.request_timeout)
            .json(&body)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| self.map_error(e))?;

        tracing::debug!(
            model = %self.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = resp.response.len(),
            "generation finished"
        );
        Ok(resp.response)
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}
