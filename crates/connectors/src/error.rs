use thiserror::Error;

/// Errors raised while reading from the source store.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source connection could not be opened.
    #[error("failed to open source connection: {0}")]
    Connection(String),

    /// The query failed, timed out, or produced rows the buffer rejected.
    #[error("source query failed: {0}")]
    Query(String),
}

/// Errors raised while provisioning or writing to the destination store.
#[derive(Debug, Error)]
pub enum DestinationError {
    #[error("failed to open destination connection: {0}")]
    Connection(String),

    #[error("failed to provision destination table: {0}")]
    Schema(String),

    /// A single chunk failed; earlier chunks of the same task stay committed.
    #[error("batch write failed: {0}")]
    Write(String),
}
