use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Plain text of one document page. Numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub number: usize,
    pub text: String,
}

impl Page {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Page {
            number,
            text: text.into(),
        }
    }
}

/// One line of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub title: String,
    pub page: usize,
    /// 0 = chapter, 1 = section, 2 = subsection.
    pub level: u8,
}

/// A titled page range derived from the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub start_page: usize,
    /// Inclusive.
    pub end_page: usize,
    pub level: u8,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (pp. {}-{})",
            self.title, self.start_page, self.end_page
        )
    }
}

/// Text of a single entity, cut out of a section at header boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityChunk {
    pub header: String,
    pub content: String,
}

/// A structured record returned by the model.
///
/// Only `id` and `name` are typed; the complete JSON object (including those
/// two keys) is kept in `fields` so field order and unknown keys survive.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRecord {
    pub id: String,
    pub name: String,
    pub fields: Map<String, Value>,
}

impl ExtractionRecord {
    /// Wrap a parsed JSON object. Returns `None` for non-object values.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(fields) = value else {
            return None;
        };
        let raw_id = fields
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let mut record = ExtractionRecord {
            id: raw_id.clone(),
            name,
            fields,
        };
        // The body must agree with the id the file is named after.
        if raw_id.trim() != raw_id {
            record.set_id(raw_id.trim());
        }
        Some(record)
    }

    /// Set the id (both the envelope and the JSON body).
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.fields.insert("id".into(), Value::String(id.clone()));
        self.id = id;
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
