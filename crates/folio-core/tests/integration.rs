//! End-to-end pipeline tests.
//!
//! A MockSource stands in for pdftotext and a MockClient for the model
//! backend, so these run without poppler or Ollama.

use folio_core::config::{Config, PipelineConfig};
use folio_core::document::Document;
use folio_core::error::FolioError;
use folio_core::extraction::DocumentSource;
use folio_core::list_sections;
use folio_core::llm::ModelClient;
use folio_core::model::Page;
use folio_core::pipeline::{Pipeline, RunRequest};
use folio_core::prompts::PromptBook;
use folio_core::validate::RecordValidator;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct MockSource {
    pages: Vec<Page>,
}

impl DocumentSource for MockSource {
    fn load_pages(&self, _bytes: &[u8]) -> Result<Vec<Page>, FolioError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

type Responder = dyn Fn(&str) -> Result<String, FolioError> + Send + Sync;

struct MockClient {
    available: bool,
    calls: Arc<AtomicUsize>,
    respond: Box<Responder>,
}

impl MockClient {
    fn new(respond: impl Fn(&str) -> Result<String, FolioError> + Send + Sync + 'static) -> Self {
        MockClient {
            available: true,
            calls: Arc::new(AtomicUsize::new(0)),
            respond: Box::new(respond),
        }
    }
}

impl ModelClient for MockClient {
    fn model(&self) -> &str {
        "mistral"
    }

    fn check_availability(&self) -> bool {
        self.available
    }

    fn list_models(&self) -> Vec<String> {
        vec!["mistral:latest".into()]
    }

    fn generate(&self, _system: &str, user: &str, _temperature: f32) -> Result<String, FolioError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(user)
    }

    fn endpoint(&self) -> &str {
        "http://mock:11434"
    }
}

fn rulebook() -> Document {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let source = MockSource {
        pages: vec![
            Page::new(1, "Tormenta 20"),
            Page::new(2, "Sumário\nRaças .... 3\nPoderes Gerais .... 4"),
            Page::new(
                3,
                "Raças\nos povos de Arton.\nAnão\nConstituição +2, Sabedoria +1\nResistente.\nElfo\nInteligência +2\nGracioso.\nHynne\nDestreza +2\nPequeno.",
            ),
            Page::new(
                4,
                "Poderes Gerais\nOs poderes a seguir.\nCoragem Inabalável\nVocê é imune a medo.",
            ),
        ],
    };
    Document::load(tmp.path(), &source).unwrap()
}

/// Each entity's text is sent verbatim as the user prompt.
fn bare_prompts() -> PromptBook {
    let mut book = PromptBook::new("sistema");
    book.add_template("racas", "", None);
    book.add_template("poderes", "", None);
    book.add_fallback("poderes_combate", "poderes");
    book
}

fn config(output: &Path) -> Config {
    Config {
        pipeline: PipelineConfig {
            output_root: output.to_path_buf(),
            retry_backoff_ms: 0,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn first_line(user: &str) -> &str {
    user.lines().next().unwrap_or_default()
}

#[test]
fn sections_from_table_of_contents() {
    let doc = rulebook();
    let sections = list_sections(&doc, 2, 2);
    let listed: Vec<String> = sections.iter().map(|(k, s)| format!("{k}: {s}")).collect();
    assert_eq!(
        listed,
        vec!["racas: Raças (pp. 3-3)", "poderes_gerais: Poderes Gerais (pp. 4-4)"]
    );
}

#[test]
fn retries_exhausted_on_timeouts() {
    let tmp = tempfile::tempdir().unwrap();
    let client = MockClient::new(|_| Err(FolioError::Timeout { seconds: 120 }));
    let calls = client.calls.clone();
    let pipeline = Pipeline::new(Box::new(client), &config(tmp.path())).unwrap();

    let errors = pipeline.process_entity("Anão\nConstituição +2", "racas").unwrap_err();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(errors.len(), 3);
    for (i, e) in errors.iter().enumerate() {
        assert!(e.starts_with(&format!("attempt {}: timed out", i + 1)), "{e}");
    }
}

#[test]
fn dry_run_lists_headers_without_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let client = MockClient::new(|_| panic!("dry run must not call the model"));
    let calls = client.calls.clone();
    let pipeline = Pipeline::new(Box::new(client), &config(tmp.path())).unwrap();

    let doc = rulebook();
    let sections = list_sections(&doc, 2, 2);
    let report = pipeline
        .run(&doc, &sections, &RunRequest::new("racas").dry_run(true))
        .unwrap();

    assert_eq!(report.stats.total, 3);
    assert_eq!(report.headers, vec!["Anão", "Elfo", "Hynne"]);
    assert!(report.written.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn missing_id_backfilled_from_header() {
    let tmp = tempfile::tempdir().unwrap();
    let client = MockClient::new(|_| {
        Ok(r#"{"name": "Coragem Inabalável", "description": "Você é imune a medo."}"#.into())
    });
    let pipeline = Pipeline::new(Box::new(client), &config(tmp.path()))
        .unwrap()
        .with_prompts(bare_prompts())
        .with_validator(RecordValidator::new().with_base_fields(["name"]));

    let doc = rulebook();
    let sections = list_sections(&doc, 2, 2);
    let report = pipeline
        .run(&doc, &sections, &RunRequest::new("Poderes Gerais"))
        .unwrap();

    assert_eq!(report.entity_type, "poderes");
    assert_eq!(report.stats.success, 1);

    let path = tmp.path().join("poderes/coragem_inabalavel.json");
    assert_eq!(report.written, vec![path.clone()]);
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["id"], "coragem_inabalavel");
    assert_eq!(saved["name"], "Coragem Inabalável");
}

#[test]
fn partial_failure_does_not_stop_run() {
    let tmp = tempfile::tempdir().unwrap();
    let client = MockClient::new(|user| match first_line(user) {
        "Elfo" => Err(FolioError::Timeout { seconds: 120 }),
        "Hynne" => Ok(format!(
            "Claro! Aqui está:\n```json\n{}\n```",
            r#"{"id": "hynne", "name": "Hynne", "attributes": {"des": 2}, "abilities": []}"#
        )),
        _ => Ok(r#"{"id": "anao", "name": "Anão", "attributes": {"con": 2, "sab": 1}, "abilities": []}"#.into()),
    });
    let calls = client.calls.clone();
    let pipeline = Pipeline::new(Box::new(client), &config(tmp.path()))
        .unwrap()
        .with_prompts(bare_prompts());

    let doc = rulebook();
    let sections = list_sections(&doc, 2, 2);
    let report = pipeline
        .run(&doc, &sections, &RunRequest::new("raça").entity_type("races"))
        .unwrap();

    assert_eq!(report.section, "racas");
    assert_eq!(report.stats.total, 3);
    assert_eq!(report.stats.success, 2);
    assert_eq!(report.stats.failed, 1);
    assert_eq!(report.stats.errors[0].entity, "Elfo");
    assert_eq!(report.stats.errors[0].errors.len(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 5);

    assert!(tmp.path().join("racas/anao.json").exists());
    assert!(tmp.path().join("racas/hynne.json").exists());
    assert!(!tmp.path().join("racas/elfo.json").exists());
}

#[test]
fn unknown_entity_type_aborts_before_processing() {
    let tmp = tempfile::tempdir().unwrap();
    let client = MockClient::new(|_| Ok("{}".into()));
    let calls = client.calls.clone();
    let pipeline = Pipeline::new(Box::new(client), &config(tmp.path())).unwrap();

    let doc = rulebook();
    let sections = list_sections(&doc, 2, 2);
    let err = pipeline
        .run(&doc, &sections, &RunRequest::new("racas").entity_type("dragoes"))
        .unwrap_err();

    match err {
        FolioError::UnknownEntityType { requested, known } => {
            assert_eq!(requested, "dragoes");
            assert!(known.contains(&"racas".to_string()));
        }
        other => panic!("expected UnknownEntityType, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!tmp.path().join("dragoes").exists());
}

#[test]
fn unavailable_backend_aborts_before_processing() {
    let tmp = tempfile::tempdir().unwrap();
    let mut client = MockClient::new(|_| Ok("{}".into()));
    client.available = false;
    let calls = client.calls.clone();
    let pipeline = Pipeline::new(Box::new(client), &config(tmp.path())).unwrap();

    let doc = rulebook();
    let sections = list_sections(&doc, 2, 2);
    let err = pipeline
        .run(&doc, &sections, &RunRequest::new("racas"))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "model backend at http://mock:11434 is not answering. Start it with: ollama serve"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn unknown_section_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let pipeline =
        Pipeline::new(Box::new(MockClient::new(|_| Ok("{}".into()))), &config(tmp.path())).unwrap();

    let doc = rulebook();
    let sections = list_sections(&doc, 2, 2);
    let err = pipeline
        .run(&doc, &sections, &RunRequest::new("dragões"))
        .unwrap_err();
    assert_eq!(err.to_string(), "section not found: 'dragões'");
}
