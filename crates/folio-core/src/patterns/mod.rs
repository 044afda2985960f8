pub mod builtin;
pub mod schema;

use crate::entity::canonical_type;
use crate::error::FolioError;
use crate::parsing::slug::slugify;
use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use schema::PatternSetDef;
use std::path::Path;

/// Compiled header patterns for one rulebook.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    name: String,
    patterns: IndexMap<String, Regex>,
    fallback: String,
    fallback_pattern: Regex,
    sections: Vec<(String, String)>,
}

impl PatternRegistry {
    /// Validate a pattern set definition and compile every pattern in
    /// multi-line mode.
    pub fn compile(def: &PatternSetDef) -> Result<Self, FolioError> {
        if def.patterns.is_empty() {
            return Err(FolioError::PatternInvalid("patterns must not be empty".into()));
        }

        let mut patterns = IndexMap::new();
        for p in &def.patterns {
            if p.entity_type.trim().is_empty() {
                return Err(FolioError::PatternInvalid(
                    "entity_type must not be empty".into(),
                ));
            }
            let re = RegexBuilder::new(&p.pattern)
                .multi_line(true)
                .build()
                .map_err(|e| {
                    FolioError::PatternInvalid(format!(
                        "pattern for '{}' does not compile: {}",
                        p.entity_type, e
                    ))
                })?;
            patterns.insert(p.entity_type.clone(), re);
        }

        let fallback_pattern = patterns.get(&def.fallback).cloned().ok_or_else(|| {
            FolioError::PatternInvalid(format!(
                "fallback type '{}' has no pattern",
                def.fallback
            ))
        })?;

        for s in &def.sections {
            if !patterns.contains_key(&s.entity_type) {
                return Err(FolioError::PatternInvalid(format!(
                    "section '{}' maps to unknown type '{}'",
                    s.section, s.entity_type
                )));
            }
        }

        let sections = def
            .sections
            .iter()
            .map(|s| (slugify(&s.section), s.entity_type.clone()))
            .collect();

        Ok(PatternRegistry {
            name: def.name.clone(),
            patterns,
            fallback: def.fallback.clone(),
            fallback_pattern,
            sections,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fallback_type(&self) -> &str {
        &self.fallback
    }

    pub fn contains(&self, entity_type: &str) -> bool {
        self.patterns.contains_key(&canonical_type(entity_type))
    }

    /// Registered entity types, in definition order.
    pub fn entity_types(&self) -> Vec<&str> {
        self.patterns.keys().map(String::as_str).collect()
    }

    /// Header pattern for an entity type, or the fallback pattern when the
    /// type has none.
    pub fn pattern_for(&self, entity_type: &str) -> &Regex {
        self.patterns
            .get(&canonical_type(entity_type))
            .unwrap_or(&self.fallback_pattern)
    }

    /// Guess the entity type of a section from its name.
    ///
    /// Walks the section table in order; the first key that is a substring
    /// of the slugified name, or contains it, wins.
    pub fn infer_entity_type(&self, section_name: &str) -> Option<&str> {
        let slug = slugify(section_name);
        if slug.is_empty() {
            return None;
        }
        self.sections
            .iter()
            .find(|(key, _)| slug.contains(key.as_str()) || key.contains(slug.as_str()))
            .map(|(_, entity_type)| entity_type.as_str())
    }
}

/// Load and compile a pattern set from a JSON file.
pub fn load_patterns(path: &Path) -> Result<PatternRegistry, FolioError> {
    let content = std::fs::read_to_string(path).map_err(|e| FolioError::PatternLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_patterns(&content, path)
}

/// Parse and compile a pattern set from a JSON string.
pub fn parse_patterns(json: &str, source: &Path) -> Result<PatternRegistry, FolioError> {
    let def: PatternSetDef = serde_json::from_str(json).map_err(|e| FolioError::PatternLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    PatternRegistry::compile(&def)
}
