use connectors::error::{DestinationError, SourceError};
use thiserror::Error;

/// Failure inside an enabled row transform; treated as task failure.
#[derive(Debug, Error)]
#[error("row transform failed: {0}")]
pub struct TransformError(pub String);

/// Any failure within one task's scope. Caught at the task runner boundary
/// and recorded in that task's result; never aborts sibling tasks.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Destination(#[from] DestinationError),
}

/// Failure outside any single task's scope. The only error that aborts a
/// run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    RunFatal(String),
}
