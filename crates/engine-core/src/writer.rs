use connectors::{destination::DataDestination, error::DestinationError};
use model::records::buffer::TabularBuffer;

/// Write `buffer` to `table` in consecutive chunks of at most `batch_size`
/// rows, one parameterized insert round trip per chunk. `on_chunk` receives
/// the running processed count after each committed chunk. A failing chunk
/// aborts the remaining chunks; rows from prior chunks stay committed.
pub async fn write_in_batches(
    destination: &dyn DataDestination,
    buffer: &TabularBuffer,
    table: &str,
    batch_size: usize,
    mut on_chunk: impl FnMut(usize) + Send,
) -> Result<usize, DestinationError> {
    let mut processed = 0;
    for chunk in buffer.rows.chunks(batch_size) {
        destination
            .write_batch(table, &buffer.columns, chunk)
            .await?;
        processed += chunk.len();
        on_chunk(processed);
    }
    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use model::{
        core::{data_type::DataType, value::Value},
        records::buffer::Column,
    };
    use std::sync::Mutex;

    /// Records every chunk it receives; optionally fails from a given chunk
    /// index onwards.
    struct RecordingDestination {
        chunks: Mutex<Vec<Vec<Vec<Option<Value>>>>>,
        fail_from_chunk: Option<usize>,
    }

    impl RecordingDestination {
        fn new(fail_from_chunk: Option<usize>) -> Self {
            RecordingDestination {
                chunks: Mutex::new(Vec::new()),
                fail_from_chunk,
            }
        }
    }

    #[async_trait]
    impl DataDestination for RecordingDestination {
        async fn ensure_table(
            &self,
            _table: &str,
            _columns: &[Column],
        ) -> Result<(), DestinationError> {
            Ok(())
        }

        async fn write_batch(
            &self,
            _table: &str,
            _columns: &[Column],
            rows: &[Vec<Option<Value>>],
        ) -> Result<(), DestinationError> {
            let mut chunks = self.chunks.lock().unwrap();
            if self.fail_from_chunk == Some(chunks.len()) {
                return Err(DestinationError::Write("simulated chunk failure".into()));
            }
            chunks.push(rows.to_vec());
            Ok(())
        }
    }

    fn buffer_with_rows(count: usize) -> TabularBuffer {
        let mut buffer = TabularBuffer::new(vec![Column::new("ID", DataType::Int)]);
        for i in 0..count {
            buffer.push_row(vec![Some(Value::Int(i as i32))]).unwrap();
        }
        buffer
    }

    #[tokio::test]
    async fn chunking_is_lossless_and_order_preserving() {
        for batch_size in [1, 3, 4, 100] {
            let buffer = buffer_with_rows(10);
            let destination = RecordingDestination::new(None);
            let mut seen = Vec::new();

            let processed = write_in_batches(&destination, &buffer, "t", batch_size, |done| {
                seen.push(done)
            })
            .await
            .unwrap();

            assert_eq!(processed, 10);
            let chunks = destination.chunks.lock().unwrap();
            assert!(chunks.iter().all(|c| c.len() <= batch_size));
            let rejoined: Vec<_> = chunks.iter().flatten().cloned().collect();
            assert_eq!(rejoined, buffer.rows, "batch_size {batch_size}");
            // Running counts grow strictly and end at the row count.
            assert!(seen.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(seen.last(), Some(&10));
        }
    }

    #[tokio::test]
    async fn empty_buffers_write_nothing() {
        let buffer = buffer_with_rows(0);
        let destination = RecordingDestination::new(None);
        let processed = write_in_batches(&destination, &buffer, "t", 5, |_| {})
            .await
            .unwrap();
        assert_eq!(processed, 0);
        assert!(destination.chunks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn a_failing_chunk_keeps_prior_chunks_committed() {
        let buffer = buffer_with_rows(10);
        let destination = RecordingDestination::new(Some(2));
        let mut last_done = 0;

        let err = write_in_batches(&destination, &buffer, "t", 3, |done| last_done = done)
            .await
            .unwrap_err();

        assert!(matches!(err, DestinationError::Write(_)));
        // Two chunks of three rows each landed before the failure.
        assert_eq!(last_done, 6);
        assert_eq!(destination.chunks.lock().unwrap().len(), 2);
    }
}
