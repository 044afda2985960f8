use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An entity that could not be extracted, with every attempt's messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFailure {
    /// Header line of the entity chunk.
    pub entity: String,
    /// Messages in attempt order (e.g. "attempt 2: timed out ...").
    pub errors: Vec<String>,
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Entity chunks found in the section.
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    /// One entry per failed entity, in document order.
    pub errors: Vec<EntityFailure>,
}

/// Everything a run produced, handed back to the caller for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Resolved section slug.
    pub section: String,
    /// Canonical entity type the section was processed as.
    pub entity_type: String,
    pub dry_run: bool,
    /// Header of every entity chunk, in document order.
    pub headers: Vec<String>,
    /// Files written, in processing order. Empty for dry runs.
    pub written: Vec<PathBuf>,
    pub stats: PipelineStats,
}

/// Per-entity progress notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Processing of entity `index` (0-based) out of `total` began.
    Started {
        index: usize,
        total: usize,
        header: String,
    },
    Succeeded { header: String, path: PathBuf },
    Failed { header: String, last_error: String },
}
