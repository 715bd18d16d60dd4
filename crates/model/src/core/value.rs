use crate::core::data_type::DataType;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single typed cell value read from the source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Decimal(BigDecimal),
    Double(f64),
    Real(f32),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::SmallInt(_) => DataType::SmallInt,
            Value::Int(_) => DataType::Int,
            Value::BigInt(_) => DataType::BigInt,
            Value::Decimal(_) => DataType::Decimal,
            Value::Double(_) => DataType::Double,
            Value::Real(_) => DataType::Real,
            Value::Boolean(_) => DataType::Boolean,
            Value::Timestamp(_) => DataType::Timestamp,
            Value::Text(_) => DataType::Text,
            Value::Bytes(_) => DataType::Binary,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::SmallInt(v) => Some(v.to_string()),
            Value::Int(v) => Some(v.to_string()),
            Value::BigInt(v) => Some(v.to_string()),
            Value::Decimal(v) => Some(v.to_string()),
            Value::Double(v) => Some(v.to_string()),
            Value::Real(v) => Some(v.to_string()),
            Value::Boolean(v) => Some(v.to_string()),
            Value::Timestamp(v) => Some(v.to_string()),
            Value::Text(v) => Some(v.clone()),
            Value::Bytes(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::SmallInt(v) => Some(i64::from(*v)),
            Value::Int(v) => Some(i64::from(*v)),
            Value::BigInt(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::SmallInt(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::BigInt(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Timestamp(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
            Value::Bytes(v) => {
                let hex = v
                    .iter()
                    .fold(String::new(), |acc, byte: &u8| acc + &format!("{byte:02x}"));
                write!(f, "\\x{hex}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn value_reports_its_data_type() {
        assert_eq!(Value::SmallInt(1).data_type(), DataType::SmallInt);
        assert_eq!(Value::Int(1).data_type(), DataType::Int);
        assert_eq!(Value::BigInt(1).data_type(), DataType::BigInt);
        assert_eq!(
            Value::Decimal(BigDecimal::from_str("1.25").unwrap()).data_type(),
            DataType::Decimal
        );
        assert_eq!(Value::Double(1.0).data_type(), DataType::Double);
        assert_eq!(Value::Real(1.0).data_type(), DataType::Real);
        assert_eq!(Value::Boolean(true).data_type(), DataType::Boolean);
        assert_eq!(
            Value::Text("a".to_string()).data_type(),
            DataType::Text
        );
        assert_eq!(Value::Bytes(vec![0x1f]).data_type(), DataType::Binary);
    }

    #[test]
    fn bytes_display_as_hex() {
        let value = Value::Bytes(vec![0xde, 0xad, 0x01]);
        assert_eq!(value.to_string(), "\\xdead01");
    }
}
