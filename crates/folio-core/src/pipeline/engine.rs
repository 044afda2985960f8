use crate::config::Config;
use crate::document::Document;
use crate::error::FolioError;
use crate::llm::response::parse_response;
use crate::llm::{model_installed, ModelClient};
use crate::model::{EntityChunk, ExtractionRecord};
use crate::parsing::sections::SectionMap;
use crate::parsing::slug::slugify;
use crate::patterns::PatternRegistry;
use crate::pipeline::outcome::{EntityFailure, PipelineReport, PipelineStats, ProgressEvent};
use crate::pipeline::retry::RetryPolicy;
use crate::prompts::builtin::builtin_prompts;
use crate::prompts::PromptBook;
use crate::store::RecordStore;
use crate::validate::RecordValidator;
use std::path::PathBuf;

/// What to extract in one run.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Section slug or partial name.
    pub section: String,
    /// Entity type; inferred from the section name when absent.
    pub entity_type: Option<String>,
    /// Only resolve and split; no model calls, no files.
    pub dry_run: bool,
}

impl RunRequest {
    pub fn new(section: impl Into<String>) -> Self {
        RunRequest {
            section: section.into(),
            ..Default::default()
        }
    }

    pub fn entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Drives section splitting, model extraction, validation and persistence.
pub struct Pipeline {
    client: Box<dyn ModelClient>,
    patterns: PatternRegistry,
    prompts: PromptBook,
    validator: RecordValidator,
    retry: RetryPolicy,
    temperature: f32,
    output_root: PathBuf,
}

impl Pipeline {
    /// Pipeline with the built-in Tormenta 20 patterns and prompts.
    pub fn new(client: Box<dyn ModelClient>, config: &Config) -> Result<Self, FolioError> {
        Ok(Pipeline {
            client,
            patterns: crate::patterns::builtin::load_preset("tormenta20")?,
            prompts: builtin_prompts(),
            validator: RecordValidator::default(),
            retry: RetryPolicy::new(config.pipeline.max_retries, config.pipeline.retry_backoff()),
            temperature: config.backend.temperature,
            output_root: config.pipeline.output_root.clone(),
        })
    }

    pub fn with_patterns(mut self, patterns: PatternRegistry) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_prompts(mut self, prompts: PromptBook) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_validator(mut self, validator: RecordValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    pub fn run(
        &self,
        doc: &Document,
        sections: &SectionMap,
        request: &RunRequest,
    ) -> Result<PipelineReport, FolioError> {
        self.run_with(doc, sections, request, |_| {})
    }

    /// Run the pipeline, reporting per-entity progress to `observer`.
    ///
    /// Unknown prompt types and an unreachable backend abort before any
    /// entity is processed. Per-entity failures are collected in the
    /// report's stats and never stop the run.
    pub fn run_with<F>(
        &self,
        doc: &Document,
        sections: &SectionMap,
        request: &RunRequest,
        mut observer: F,
    ) -> Result<PipelineReport, FolioError>
    where
        F: FnMut(ProgressEvent),
    {
        let extracted = crate::extract_entities(
            doc,
            sections,
            &request.section,
            request.entity_type.as_deref(),
            &self.patterns,
        )?;

        let mut report = PipelineReport {
            section: extracted.section,
            entity_type: extracted.entity_type,
            dry_run: request.dry_run,
            headers: extracted.chunks.iter().map(|c| c.header.clone()).collect(),
            written: Vec::new(),
            stats: PipelineStats {
                total: extracted.chunks.len(),
                ..Default::default()
            },
        };

        if request.dry_run {
            tracing::info!(entities = report.stats.total, "dry run, nothing extracted");
            return Ok(report);
        }

        self.check_preconditions(&report.entity_type)?;

        let store = RecordStore::new(self.output_root.join(&report.entity_type));
        store.ensure_dir()?;
        tracing::info!(dir = %store.dir().display(), "writing records");

        let total = extracted.chunks.len();
        for (index, chunk) in extracted.chunks.iter().enumerate() {
            observer(ProgressEvent::Started {
                index,
                total,
                header: chunk.header.clone(),
            });

            match self.extract_one(chunk, &report.entity_type, &store) {
                Ok(path) => {
                    report.stats.success += 1;
                    report.written.push(path.clone());
                    observer(ProgressEvent::Succeeded {
                        header: chunk.header.clone(),
                        path,
                    });
                }
                Err(errors) => {
                    let last_error = errors.last().cloned().unwrap_or_default();
                    tracing::warn!(entity = %chunk.header, error = %last_error, "entity failed");
                    report.stats.failed += 1;
                    report.stats.errors.push(EntityFailure {
                        entity: chunk.header.clone(),
                        errors,
                    });
                    observer(ProgressEvent::Failed {
                        header: chunk.header.clone(),
                        last_error,
                    });
                }
            }
        }

        tracing::info!(
            total = report.stats.total,
            success = report.stats.success,
            failed = report.stats.failed,
            "run finished"
        );
        Ok(report)
    }

    fn check_preconditions(&self, entity_type: &str) -> Result<(), FolioError> {
        self.prompts.resolve(entity_type)?;

        if !self.client.check_availability() {
            return Err(FolioError::BackendUnavailable {
                url: self.client.endpoint().to_string(),
            });
        }

        let installed = self.client.list_models();
        if !model_installed(self.client.model(), &installed) {
            tracing::warn!(
                model = self.client.model(),
                installed = ?installed,
                "model may not be installed; try: ollama pull {}",
                self.client.model()
            );
        }
        Ok(())
    }

    fn extract_one(
        &self,
        chunk: &EntityChunk,
        entity_type: &str,
        store: &RecordStore,
    ) -> Result<PathBuf, Vec<String>> {
        let mut record = self.process_entity(&chunk.content, entity_type)?;
        finalize(&mut record, &chunk.header);
        let path = store
            .write(&record)
            .map_err(|e| vec![format!("could not write record '{}': {}", record.id, e)])?;
        tracing::info!(
            entity = %chunk.header,
            name = %record.name,
            path = %path.display(),
            "entity extracted"
        );
        Ok(path)
    }

    /// Extract one entity's text into a validated record, retrying per the
    /// pipeline's retry policy. On failure returns every attempt's messages.
    pub fn process_entity(
        &self,
        content: &str,
        entity_type: &str,
    ) -> Result<ExtractionRecord, Vec<String>> {
        self.retry.run(|attempt| {
            tracing::debug!(attempt, entity_type, "requesting extraction");
            let prompt = self.prompts.build(entity_type, content)?;
            let raw = self
                .client
                .generate(&prompt.system, &prompt.user, self.temperature)?;

            let value = parse_response(&raw).ok_or(FolioError::ExtractionFailure)?;
            let violations = self.validator.validate(&value, entity_type);
            if !violations.is_empty() {
                return Err(FolioError::ValidationFailure(violations));
            }
            ExtractionRecord::from_value(value).ok_or(FolioError::ExtractionFailure)
        })
    }
}

/// Backfill a missing or empty id from the chunk header.
fn finalize(record: &mut ExtractionRecord, header: &str) {
    if record.id.is_empty() {
        record.set_id(slugify(header));
    }
}
