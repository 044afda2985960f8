use serde::{Deserialize, Serialize};

/// A pattern set: how to recognize entity headers in one rulebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSetDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Entity type whose pattern is used when nothing more specific applies.
    pub fallback: String,
    /// Header patterns, one per entity type.
    pub patterns: Vec<HeaderPatternDef>,
    /// Ordered section-name -> entity-type table used to infer the type.
    #[serde(default)]
    pub sections: Vec<SectionTypeDef>,
}

/// A header pattern for a single entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderPatternDef {
    pub entity_type: String,
    /// Regular expression, compiled in multi-line mode.
    pub pattern: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionTypeDef {
    /// Section slug (or fragment of one).
    pub section: String,
    pub entity_type: String,
}
