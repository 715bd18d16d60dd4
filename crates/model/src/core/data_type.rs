use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime type of a buffer column, as observed on the source side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    SmallInt,
    Int,
    BigInt,
    Decimal,
    Double,
    Real,
    Boolean,
    Timestamp,
    Text,
    Binary,
}

impl DataType {
    /// Postgres column type used when provisioning a destination table.
    pub fn postgres_name(&self) -> &'static str {
        match self {
            DataType::SmallInt => "SMALLINT",
            DataType::Int => "INTEGER",
            DataType::BigInt => "BIGINT",
            DataType::Decimal => "NUMERIC",
            DataType::Double => "DOUBLE PRECISION",
            DataType::Real => "REAL",
            DataType::Boolean => "BOOLEAN",
            DataType::Timestamp => "TIMESTAMP",
            DataType::Text => "TEXT",
            DataType::Binary => "BYTEA",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.postgres_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgres_names_follow_the_fixed_mapping() {
        let expected = [
            (DataType::SmallInt, "SMALLINT"),
            (DataType::Int, "INTEGER"),
            (DataType::BigInt, "BIGINT"),
            (DataType::Decimal, "NUMERIC"),
            (DataType::Double, "DOUBLE PRECISION"),
            (DataType::Real, "REAL"),
            (DataType::Boolean, "BOOLEAN"),
            (DataType::Timestamp, "TIMESTAMP"),
            (DataType::Text, "TEXT"),
            (DataType::Binary, "BYTEA"),
        ];
        for (data_type, name) in expected {
            assert_eq!(data_type.postgres_name(), name);
        }
    }
}
