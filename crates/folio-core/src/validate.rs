use crate::entity::{canonical_type, required_fields};
use serde_json::Value;
use std::collections::HashMap;

/// Required-field checks for parsed records.
///
/// Base fields (`id`, `name` by default) must be present and truthy.
/// Per-type fields only need to be present; their value is not inspected.
#[derive(Debug, Clone)]
pub struct RecordValidator {
    base_fields: Vec<String>,
    rules: HashMap<String, Vec<String>>,
}

impl Default for RecordValidator {
    fn default() -> Self {
        RecordValidator {
            base_fields: vec!["id".into(), "name".into()],
            rules: HashMap::new(),
        }
    }
}

impl RecordValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the fields every record must carry.
    pub fn with_base_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Override the type-specific fields for one entity type.
    pub fn with_rule<I, S>(mut self, entity_type: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.insert(
            canonical_type(entity_type),
            fields.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// All violations of `record` for `entity_type`. Empty means valid.
    pub fn validate(&self, record: &Value, entity_type: &str) -> Vec<String> {
        let Value::Object(map) = record else {
            return vec![format!("expected a JSON object, got {}", kind(record))];
        };

        let mut errors = Vec::new();
        for field in &self.base_fields {
            if !map.get(field).is_some_and(is_truthy) {
                errors.push(format!("missing required field: {}", field));
            }
        }

        let tag = canonical_type(entity_type);
        let typed: Vec<&str> = match self.rules.get(&tag) {
            Some(fields) => fields.iter().map(String::as_str).collect(),
            None => required_fields(&tag).to_vec(),
        };
        for field in typed {
            if !map.contains_key(field) {
                errors.push(format!("missing required field: {}", field));
            }
        }

        errors
    }

    pub fn is_valid(&self, record: &Value, entity_type: &str) -> bool {
        self.validate(record, entity_type).is_empty()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
