use crate::core::{data_type::DataType, value::Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Descriptor for one column of a [`TabularBuffer`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

impl Column {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Column {
            name: name.to_string(),
            data_type,
        }
    }
}

/// In-memory typed table produced by one source read and consumed by one
/// destination write. Rows are fixed-arity and aligned to the column list;
/// each cell is either null or a value of the declared column type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TabularBuffer {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Option<Value>>>,
}

#[derive(Debug, Error, PartialEq)]
pub enum BufferError {
    #[error("row has {actual} values but the buffer declares {expected} columns")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("column '{column}' is declared {expected} but received a {actual} value")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },
}

impl TabularBuffer {
    pub fn new(columns: Vec<Column>) -> Self {
        TabularBuffer {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, enforcing arity and per-column type alignment.
    pub fn push_row(&mut self, row: Vec<Option<Value>>) -> Result<(), BufferError> {
        if row.len() != self.columns.len() {
            return Err(BufferError::ArityMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        for (column, cell) in self.columns.iter().zip(&row) {
            if let Some(value) = cell
                && value.data_type() != column.data_type
            {
                return Err(BufferError::TypeMismatch {
                    column: column.name.clone(),
                    expected: column.data_type,
                    actual: value.data_type(),
                });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
