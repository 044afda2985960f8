use crate::error::FolioError;
use crate::model::ExtractionRecord;
use crate::parsing::slug::slugify;
use std::path::{Path, PathBuf};

/// One directory of `<id>.json` record files.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        RecordStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> Result<(), FolioError> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Path the record with `id` is written to.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(id)))
    }

    /// Write a record as indented JSON, replacing any earlier file.
    pub fn write(&self, record: &ExtractionRecord) -> Result<PathBuf, FolioError> {
        let path = self.path_for(&record.id);
        let mut json = serde_json::to_string_pretty(&record.fields)?;
        json.push('\n');
        std::fs::write(&path, json)?;
        Ok(path)
    }
}

/// Ids that are not plain file names are slugified; the record keeps its id.
fn file_stem(id: &str) -> String {
    let unsafe_name = id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']);
    if unsafe_name {
        slugify(id)
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ExtractionRecord {
        ExtractionRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_write_pretty_utf8() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::new(tmp.path().join("racas"));
        store.ensure_dir().unwrap();

        let path = store
            .write(&record(json!({"id": "anao", "name": "Anão", "speed": 6})))
            .unwrap();
        assert_eq!(path, tmp.path().join("racas/anao.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"id\": \"anao\",\n  \"name\": \"Anão\",\n  \"speed\": 6\n}\n");
    }

    #[test]
    fn test_rewrite_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::new(tmp.path());
        store.write(&record(json!({"id": "elfo", "name": "Elfo"}))).unwrap();
        store.write(&record(json!({"id": "elfo", "name": "Elfo", "v": 2}))).unwrap();

        let text = std::fs::read_to_string(tmp.path().join("elfo.json")).unwrap();
        assert!(text.contains("\"v\": 2"));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_unsafe_id_slugified_for_file_only() {
        let store = RecordStore::new("/out");
        assert_eq!(store.path_for("../Meio Elfo"), PathBuf::from("/out/meio_elfo.json"));
        assert_eq!(store.path_for("bola_de_fogo"), PathBuf::from("/out/bola_de_fogo.json"));
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::new(tmp.path().join("nao_existe"));
        assert!(store.write(&record(json!({"id": "x", "name": "X"}))).is_err());
    }
}
