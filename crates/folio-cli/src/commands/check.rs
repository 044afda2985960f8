use folio_core::error::FolioError;
use folio_core::validate::RecordValidator;
use std::path::{Path, PathBuf};

pub fn run(dir: &Path, entity_type: Option<&str>) -> Result<(), FolioError> {
    let entity_type = match entity_type {
        Some(t) => t.to_string(),
        None => dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let files = record_files(dir)?;
    let validator = RecordValidator::default();
    let mut invalid = 0;
    for path in &files {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        let errors = match std::fs::read_to_string(path)
            .map_err(FolioError::from)
            .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).map_err(FolioError::from))
        {
            Ok(value) => validator.validate(&value, &entity_type),
            Err(e) => vec![e.to_string()],
        };

        if errors.is_empty() {
            println!("  ok    {name}");
        } else {
            invalid += 1;
            println!("  FAIL  {name}");
            for e in errors {
                println!("          {e}");
            }
        }
    }

    println!(
        "\n{} record(s) checked as '{}': {} valid, {} invalid",
        files.len(),
        entity_type,
        files.len() - invalid,
        invalid
    );

    if invalid > 0 {
        return Err(FolioError::ValidationFailure(vec![format!(
            "{} of {} records invalid",
            invalid,
            files.len()
        )]));
    }
    Ok(())
}

/// The `.json` files in `dir`, sorted. An unreadable entry is an error.
fn record_files(dir: &Path) -> Result<Vec<PathBuf>, FolioError> {
    let entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    let mut files: Vec<PathBuf> = entries
        .into_iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_files_sorted_json_only() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["elfo.json", "anao.json", "notas.txt"] {
            std::fs::write(tmp.path().join(name), "{}").unwrap();
        }
        let names: Vec<String> = record_files(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["anao.json", "elfo.json"]);
    }

    #[test]
    fn test_unreadable_dir_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("racas");
        assert!(matches!(record_files(&missing), Err(FolioError::Io(_))));
    }
}
