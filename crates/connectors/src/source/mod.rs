pub mod mock;
pub mod odbc;

use crate::error::SourceError;
use async_trait::async_trait;
use model::records::buffer::TabularBuffer;

/// Polymorphic access to the source store. The live ODBC connector and the
/// deterministic mock satisfy the same contract, so either can back the task
/// runner without it knowing which one it holds.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Execute `query` and materialize the entire result set into a buffer.
    /// `task_name` labels log output only.
    async fn read_query(&self, query: &str, task_name: &str)
    -> Result<TabularBuffer, SourceError>;
}
