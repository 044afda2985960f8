use folio_core::error::FolioError;
use folio_core::llm::OllamaClient;
use folio_core::pipeline::{Pipeline, PipelineReport, ProgressEvent, RunRequest};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use super::{load_config_or_default, load_document, load_registry, DocumentOptions};
use crate::output;

pub struct ExtractArgs {
    pub doc: DocumentOptions,
    pub section: String,
    pub entity_type: Option<String>,
    pub model: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub retries: Option<u32>,
    pub ollama_url: Option<String>,
    pub config: Option<PathBuf>,
    pub patterns: Option<PathBuf>,
    pub output: String,
}

pub fn run(args: ExtractArgs) -> Result<(), FolioError> {
    let mut config = load_config_or_default(args.config.as_deref())?;
    if let Some(model) = args.model {
        config.backend.model = model;
    }
    if let Some(url) = args.ollama_url {
        config.backend.base_url = url;
    }
    if let Some(retries) = args.retries {
        config.pipeline.max_retries = retries;
    }
    if let Some(dir) = args.output_dir {
        config.pipeline.output_root = dir;
    }

    let registry = load_registry(args.patterns.as_deref())?;
    let client = OllamaClient::new(&config.backend)?;
    let pipeline = Pipeline::new(Box::new(client), &config)?.with_patterns(registry);

    let document = load_document(&args.doc.path, args.doc.layout)?;
    let (toc_start, toc_end) = args.doc.toc_range(&config);
    let sections = folio_core::list_sections(&document, toc_start, toc_end);

    let mut request = RunRequest::new(args.section).dry_run(args.dry_run);
    request.entity_type = args.entity_type;

    eprintln!(
        "Extracting '{}' with model {} into {}",
        request.section,
        config.backend.model,
        config.pipeline.output_root.display()
    );

    let pb = ProgressBar::hidden();
    let result = pipeline.run_with(&document, &sections, &request, |event| {
        on_progress(&pb, event)
    });
    pb.finish_and_clear();

    let report = match result {
        Err(e @ FolioError::SectionNotFound { .. }) => {
            output::table::print_sections(&sections);
            return Err(e);
        }
        other => other?,
    };

    print_report(&report, &args.output)
}

fn on_progress(pb: &ProgressBar, event: ProgressEvent) {
    match event {
        ProgressEvent::Started { index, total, header } => {
            if index == 0 {
                pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
                pb.set_length(total as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-"),
                );
            }
            pb.set_message(header);
        }
        ProgressEvent::Succeeded { header, path } => {
            pb.println(format!("✓ {} -> {}", header, path.display()));
            pb.inc(1);
        }
        ProgressEvent::Failed { header, last_error } => {
            pb.println(format!("✗ {}: {}", header, last_error));
            pb.inc(1);
        }
    }
}

fn print_report(report: &PipelineReport, output_format: &str) -> Result<(), FolioError> {
    match output_format {
        "json" => output::json::print(report),
        _ => {
            output::table::print_report(report);
            Ok(())
        }
    }
}
