use bigdecimal::ToPrimitive;
use chrono::NaiveDateTime;
use model::{
    core::{data_type::DataType, value::Value},
    records::buffer::Column,
};
use rust_decimal::{Decimal as RustDecimal, prelude::FromPrimitive as DecimalFromPrimitive};
use std::str::FromStr;
use tokio_postgres::types::ToSql;

pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::SmallInt(v) => PgParam(Box::new(v)),
            Value::Int(v) => PgParam(Box::new(v)),
            Value::BigInt(v) => PgParam(Box::new(v)),
            Value::Decimal(v) => {
                let decimal = RustDecimal::from_str(&v.to_string()).unwrap_or_else(|_| {
                    DecimalFromPrimitive::from_f64(v.to_f64().unwrap_or(0.0)).unwrap_or_default()
                });
                PgParam(Box::new(decimal))
            }
            Value::Double(v) => PgParam(Box::new(v)),
            Value::Real(v) => PgParam(Box::new(v)),
            Value::Boolean(v) => PgParam(Box::new(v)),
            Value::Timestamp(v) => PgParam(Box::new(v)),
            Value::Text(v) => PgParam(Box::new(v)),
            Value::Bytes(v) => PgParam(Box::new(v)),
        }
    }

    /// SQL NULL carrying the column's type, so the driver's type check
    /// accepts it against the prepared statement.
    pub fn null_for(data_type: DataType) -> Self {
        match data_type {
            DataType::SmallInt => PgParam(Box::new(Option::<i16>::None)),
            DataType::Int => PgParam(Box::new(Option::<i32>::None)),
            DataType::BigInt => PgParam(Box::new(Option::<i64>::None)),
            DataType::Decimal => PgParam(Box::new(Option::<RustDecimal>::None)),
            DataType::Double => PgParam(Box::new(Option::<f64>::None)),
            DataType::Real => PgParam(Box::new(Option::<f32>::None)),
            DataType::Boolean => PgParam(Box::new(Option::<bool>::None)),
            DataType::Timestamp => PgParam(Box::new(Option::<NaiveDateTime>::None)),
            DataType::Text => PgParam(Box::new(Option::<String>::None)),
            DataType::Binary => PgParam(Box::new(Option::<Vec<u8>>::None)),
        }
    }
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    /// Flatten a chunk of rows into one row-major binding list, matching the
    /// placeholder numbering of the rendered insert.
    pub fn from_rows(columns: &[Column], rows: &[Vec<Option<Value>>]) -> Self {
        let mut params = Vec::with_capacity(rows.len() * columns.len());
        for row in rows {
            for (column, cell) in columns.iter().zip(row) {
                params.push(match cell {
                    Some(value) => PgParam::from_value(value.clone()),
                    None => PgParam::null_for(column.data_type),
                });
            }
        }
        PgParamStore { params }
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref())
            .collect::<Vec<_>>()
    }
}
