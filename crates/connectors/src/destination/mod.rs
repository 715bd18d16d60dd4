pub mod params;
pub mod postgres;
pub mod sql;

use crate::error::DestinationError;
use async_trait::async_trait;
use model::{core::value::Value, records::buffer::Column};

/// Write access to the destination store. The live Postgres client and the
/// in-memory doubles used by the engine tests satisfy the same contract.
#[async_trait]
pub trait DataDestination: Send + Sync {
    /// Create `table` if it is absent, with one column per descriptor in
    /// order. Never alters an existing table.
    async fn ensure_table(&self, table: &str, columns: &[Column])
    -> Result<(), DestinationError>;

    /// Insert one chunk of rows in a single round trip.
    async fn write_batch(
        &self,
        table: &str,
        columns: &[Column],
        rows: &[Vec<Option<Value>>],
    ) -> Result<(), DestinationError>;
}
