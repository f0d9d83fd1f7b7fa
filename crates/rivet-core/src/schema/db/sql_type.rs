use crate::value::Type;
use std::fmt;

/// The SQL type of a column.
///
/// Each variant carries the `java.sql.Types` code that drivers expect when
/// binding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SqlType {
    Boolean,
    Integer,
    BigInt,
    Double,
    VarChar,
    Blob,
    Decimal,
}

impl SqlType {
    /// Default SQL type for values of type `ty`.
    pub fn from_value_type(ty: Type) -> SqlType {
        match ty {
            Type::Bool => SqlType::Boolean,
            Type::I32 => SqlType::Integer,
            Type::I64 => SqlType::BigInt,
            Type::F64 => SqlType::Double,
            Type::String => SqlType::VarChar,
            Type::Bytes => SqlType::Blob,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            SqlType::Boolean => 16,
            SqlType::Integer => 4,
            SqlType::BigInt => -5,
            SqlType::Double => 8,
            SqlType::VarChar => 12,
            SqlType::Blob => 2004,
            SqlType::Decimal => 3,
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SqlType::Boolean => "BOOLEAN",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Double => "DOUBLE",
            SqlType::VarChar => "VARCHAR",
            SqlType::Blob => "BLOB",
            SqlType::Decimal => "DECIMAL",
        })
    }
}
