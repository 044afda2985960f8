pub mod engine;
pub mod outcome;
pub mod retry;

pub use engine::{Pipeline, RunRequest};
pub use outcome::{EntityFailure, PipelineReport, PipelineStats, ProgressEvent};
pub use retry::RetryPolicy;
