use crate::{error::SourceError, source::DataSource};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use model::{
    core::{data_type::DataType, value::Value},
    records::buffer::{Column, TabularBuffer},
};
use odbc_api::{ConnectionOptions, Cursor, Environment, ResultSetMetadata, buffers::TextRowSet};
use std::{str::FromStr, sync::Arc, time::Duration};
use tracing::info;

/// Upper bound on a single query, connection open included.
const QUERY_TIMEOUT: Duration = Duration::from_secs(300);

/// Rows fetched per ODBC round trip while draining the cursor.
const FETCH_BATCH_ROWS: usize = 1024;

/// Longest cell rendered through the text buffers.
const MAX_CELL_BYTES: usize = 32_768;

/// Live source connector. Opens an ODBC connection per query, runs the query
/// on the blocking thread pool, and materializes the full result set before
/// returning.
pub struct OdbcDataSource {
    env: Arc<Environment>,
    connection_string: String,
}

impl OdbcDataSource {
    pub fn new(connection_string: &str) -> Result<Self, SourceError> {
        let env = Environment::new().map_err(|e| SourceError::Connection(e.to_string()))?;
        Ok(OdbcDataSource {
            env: Arc::new(env),
            connection_string: connection_string.to_string(),
        })
    }
}

#[async_trait]
impl DataSource for OdbcDataSource {
    async fn read_query(
        &self,
        query: &str,
        task_name: &str,
    ) -> Result<TabularBuffer, SourceError> {
        let env = self.env.clone();
        let connection_string = self.connection_string.clone();
        let query = query.to_string();
        let label = task_name.to_string();

        let read = tokio::task::spawn_blocking(move || {
            let buffer = run_query(&env, &connection_string, &query)?;
            info!(
                "[{label}] source returned {} rows, {} columns",
                buffer.row_count(),
                buffer.columns.len()
            );
            Ok(buffer)
        });

        match tokio::time::timeout(QUERY_TIMEOUT, read).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(SourceError::Query(join_error.to_string())),
            Err(_) => Err(SourceError::Query(format!(
                "query timed out after {}s",
                QUERY_TIMEOUT.as_secs()
            ))),
        }
    }
}

fn run_query(
    env: &Environment,
    connection_string: &str,
    query: &str,
) -> Result<TabularBuffer, SourceError> {
    let conn = env
        .connect_with_connection_string(connection_string, ConnectionOptions::default())
        .map_err(|e| SourceError::Connection(e.to_string()))?;

    let Some(mut cursor) = conn
        .execute(query, ())
        .map_err(|e| SourceError::Query(e.to_string()))?
    else {
        // Statement produced no result set.
        return Ok(TabularBuffer::default());
    };

    let column_count = cursor
        .num_result_cols()
        .map_err(|e| SourceError::Query(e.to_string()))? as u16;

    let mut columns = Vec::with_capacity(column_count as usize);
    for index in 1..=column_count {
        let name = cursor
            .col_name(index)
            .map_err(|e| SourceError::Query(e.to_string()))?;
        let data_type = cursor
            .col_data_type(index)
            .map_err(|e| SourceError::Query(e.to_string()))?;
        columns.push(Column::new(&name, map_source_type(data_type)));
    }

    let mut rows = Vec::new();
    let mut row_set = TextRowSet::for_cursor(FETCH_BATCH_ROWS, &mut cursor, Some(MAX_CELL_BYTES))
        .map_err(|e| SourceError::Query(e.to_string()))?;
    let mut row_cursor = cursor
        .bind_buffer(&mut row_set)
        .map_err(|e| SourceError::Query(e.to_string()))?;

    while let Some(batch) = row_cursor
        .fetch()
        .map_err(|e| SourceError::Query(e.to_string()))?
    {
        for row_index in 0..batch.num_rows() {
            let mut row = Vec::with_capacity(columns.len());
            for (col_index, column) in columns.iter().enumerate() {
                let text = batch
                    .at(col_index, row_index)
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned());
                row.push(parse_cell(text, column)?);
            }
            rows.push(row);
        }
    }

    let mut buffer = TabularBuffer::new(columns);
    for row in rows {
        buffer
            .push_row(row)
            .map_err(|e| SourceError::Query(e.to_string()))?;
    }
    Ok(buffer)
}

/// Columns whose source type has no counterpart in the destination mapping
/// degrade to text rather than failing the read.
fn map_source_type(data_type: odbc_api::DataType) -> DataType {
    use odbc_api::DataType as Odbc;
    match data_type {
        Odbc::TinyInt | Odbc::SmallInt => DataType::SmallInt,
        Odbc::Integer => DataType::Int,
        Odbc::BigInt => DataType::BigInt,
        Odbc::Numeric { .. } | Odbc::Decimal { .. } => DataType::Decimal,
        Odbc::Double | Odbc::Float { .. } => DataType::Double,
        Odbc::Real => DataType::Real,
        Odbc::Bit => DataType::Boolean,
        Odbc::Date | Odbc::Timestamp { .. } => DataType::Timestamp,
        Odbc::Binary { .. } | Odbc::Varbinary { .. } | Odbc::LongVarbinary { .. } => {
            DataType::Binary
        }
        _ => DataType::Text,
    }
}

fn parse_cell(text: Option<String>, column: &Column) -> Result<Option<Value>, SourceError> {
    let Some(text) = text else {
        return Ok(None);
    };

    let trimmed = text.trim();
    if trimmed.is_empty() && column.data_type != DataType::Text {
        return Ok(None);
    }

    parse_typed(trimmed, &text, column.data_type)
        .map(Some)
        .ok_or_else(|| {
            SourceError::Query(format!(
                "column '{}': cannot read '{}' as {}",
                column.name, text, column.data_type
            ))
        })
}

fn parse_typed(trimmed: &str, raw: &str, data_type: DataType) -> Option<Value> {
    match data_type {
        DataType::SmallInt => trimmed.parse::<i16>().ok().map(Value::SmallInt),
        DataType::Int => trimmed.parse::<i32>().ok().map(Value::Int),
        DataType::BigInt => trimmed.parse::<i64>().ok().map(Value::BigInt),
        DataType::Decimal => BigDecimal::from_str(trimmed).ok().map(Value::Decimal),
        DataType::Double => trimmed.parse::<f64>().ok().map(Value::Double),
        DataType::Real => trimmed.parse::<f32>().ok().map(Value::Real),
        DataType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "1" | "true" => Some(Value::Boolean(true)),
            "0" | "false" => Some(Value::Boolean(false)),
            _ => None,
        },
        DataType::Timestamp => parse_timestamp(trimmed).map(Value::Timestamp),
        DataType::Text => Some(Value::Text(raw.to_string())),
        DataType::Binary => decode_hex(trimmed).map(Value::Bytes),
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn decode_hex(text: &str) -> Option<Vec<u8>> {
    let digits = text.strip_prefix("\\x").unwrap_or(text);
    if digits.len() % 2 != 0 {
        return None;
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str, data_type: DataType) -> Option<Value> {
        parse_cell(Some(text.to_string()), &Column::new("C", data_type)).unwrap()
    }

    #[test]
    fn null_cells_stay_null() {
        let column = Column::new("ID", DataType::Int);
        assert_eq!(parse_cell(None, &column).unwrap(), None);
        // Drivers render NULL-ish numerics as empty text.
        assert_eq!(parse_cell(Some("".to_string()), &column).unwrap(), None);
    }

    #[test]
    fn typed_cells_parse_per_declared_column_type() {
        assert_eq!(cell("42", DataType::Int), Some(Value::Int(42)));
        assert_eq!(cell("9000000000", DataType::BigInt), Some(Value::BigInt(9_000_000_000)));
        assert_eq!(cell("1", DataType::Boolean), Some(Value::Boolean(true)));
        assert_eq!(cell("false", DataType::Boolean), Some(Value::Boolean(false)));
        assert_eq!(
            cell("deadbeef", DataType::Binary),
            Some(Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]))
        );
        assert_eq!(
            cell("2024-06-01 12:30:45", DataType::Timestamp),
            Some(Value::Timestamp(
                NaiveDate::from_ymd_opt(2024, 6, 1)
                    .and_then(|d| d.and_hms_opt(12, 30, 45))
                    .unwrap()
            ))
        );
        // Date-only values promote to midnight.
        assert_eq!(
            cell("2024-06-01", DataType::Timestamp),
            Some(Value::Timestamp(
                NaiveDate::from_ymd_opt(2024, 6, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .unwrap()
            ))
        );
    }

    #[test]
    fn unparsable_cells_fail_with_column_context() {
        let column = Column::new("AMOUNT", DataType::Int);
        let err = parse_cell(Some("abc".to_string()), &column).unwrap_err();
        assert!(err.to_string().contains("AMOUNT"));
    }
}
