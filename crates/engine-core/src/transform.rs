use crate::error::TransformError;
use model::records::buffer::TabularBuffer;
use tracing::debug;

/// Extensibility hook applied once per task, between the source read and the
/// destination write, when the task enables it. Implementations must be pure
/// over the buffer.
pub trait RowTransform: Send + Sync {
    fn transform(
        &self,
        buffer: TabularBuffer,
        task_name: &str,
    ) -> Result<TabularBuffer, TransformError>;
}

/// Pass-through transform. No configured task needs row rewriting yet; this
/// keeps the hook exercised without changing any data.
pub struct IdentityTransform;

impl RowTransform for IdentityTransform {
    fn transform(
        &self,
        buffer: TabularBuffer,
        task_name: &str,
    ) -> Result<TabularBuffer, TransformError> {
        debug!(
            "[{task_name}] identity transform over {} rows",
            buffer.row_count()
        );
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{
        core::{data_type::DataType, value::Value},
        records::buffer::Column,
    };

    #[test]
    fn identity_transform_returns_the_buffer_unchanged() {
        let mut buffer = TabularBuffer::new(vec![Column::new("ID", DataType::Int)]);
        buffer.push_row(vec![Some(Value::Int(7))]).unwrap();

        let out = IdentityTransform.transform(buffer.clone(), "t").unwrap();
        assert_eq!(out, buffer);
    }
}
