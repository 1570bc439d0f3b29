//! Declared SQL types and raw-to-domain value conversion.
//!
//! Drivers hand back loosely typed values (SQLite reports integers for
//! booleans, Postgres may render decimals as text). A field's declared
//! `SqlType` decides how the raw value is normalized into the domain value
//! recorded in a field map. Conversion is a pure transform with no side
//! effects; `NULL` always passes through untouched.

use crate::error::{Error, Result, TypeError};
use crate::value::Value;

/// SQL data types a mapped field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    SmallInt,
    Integer,
    BigInt,
    Double,
    Decimal,
    Boolean,
    Text,
    Bytes,
    Date,
    Timestamp,
    Uuid,
    Json,
}

impl SqlType {
    /// Get the SQL type name for this type.
    pub const fn sql_name(&self) -> &'static str {
        match self {
            SqlType::SmallInt => "SMALLINT",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Double => "DOUBLE PRECISION",
            SqlType::Decimal => "DECIMAL",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Text => "TEXT",
            SqlType::Bytes => "BLOB",
            SqlType::Date => "DATE",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Uuid => "UUID",
            SqlType::Json => "JSON",
        }
    }
}

/// How a database platform cases unquoted identifiers in result sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultCasing {
    /// Identifiers come back exactly as written
    #[default]
    Preserve,
    /// Identifiers are folded to lowercase (Postgres)
    Lower,
    /// Identifiers are folded to uppercase (Oracle, Firebird)
    Upper,
}

/// Platform context threaded through value conversions and column lookups.
#[derive(Debug, Clone, Default)]
pub struct Platform {
    /// Platform name, for diagnostics
    pub name: &'static str,
    /// Identifier casing applied to result-set column names
    pub casing: ResultCasing,
}

impl Platform {
    /// Create a platform with the given name and result casing.
    pub fn new(name: &'static str, casing: ResultCasing) -> Self {
        Self { name, casing }
    }

    /// Apply this platform's result-set casing to a column name.
    pub fn result_casing(&self, name: &str) -> String {
        match self.casing {
            ResultCasing::Preserve => name.to_string(),
            ResultCasing::Lower => name.to_lowercase(),
            ResultCasing::Upper => name.to_uppercase(),
        }
    }
}

/// Convert a raw result-set value into the domain value for a declared type.
///
/// `NULL` passes through unchanged; lossless widenings are accepted;
/// anything else is a type error naming the declared type.
pub fn convert_to_domain(declared: SqlType, raw: Value, _platform: &Platform) -> Result<Value> {
    if raw.is_null() {
        return Ok(Value::Null);
    }

    match declared {
        SqlType::Boolean => convert_bool(raw),
        SqlType::SmallInt => match raw {
            Value::SmallInt(v) => Ok(Value::SmallInt(v)),
            Value::Int(v) => i16::try_from(v)
                .map(Value::SmallInt)
                .map_err(|_| mismatch(declared, &format!("out-of-range integer {v}"))),
            Value::BigInt(v) => i16::try_from(v)
                .map(Value::SmallInt)
                .map_err(|_| mismatch(declared, &format!("out-of-range integer {v}"))),
            Value::Text(s) => s
                .parse::<i16>()
                .map(Value::SmallInt)
                .map_err(|_| mismatch(declared, &s)),
            other => Err(mismatch(declared, other.type_name())),
        },
        SqlType::Integer => match raw {
            Value::SmallInt(v) => Ok(Value::Int(i32::from(v))),
            Value::Int(v) => Ok(Value::Int(v)),
            Value::BigInt(v) => i32::try_from(v)
                .map(Value::Int)
                .map_err(|_| mismatch(declared, &format!("out-of-range integer {v}"))),
            Value::Text(s) => s
                .parse::<i32>()
                .map(Value::Int)
                .map_err(|_| mismatch(declared, &s)),
            other => Err(mismatch(declared, other.type_name())),
        },
        SqlType::BigInt => match raw {
            Value::SmallInt(v) => Ok(Value::BigInt(i64::from(v))),
            Value::Int(v) => Ok(Value::BigInt(i64::from(v))),
            Value::BigInt(v) => Ok(Value::BigInt(v)),
            Value::Text(s) => s
                .parse::<i64>()
                .map(Value::BigInt)
                .map_err(|_| mismatch(declared, &s)),
            other => Err(mismatch(declared, other.type_name())),
        },
        SqlType::Double => match raw {
            Value::Double(v) => Ok(Value::Double(v)),
            Value::SmallInt(v) => Ok(Value::Double(f64::from(v))),
            Value::Int(v) => Ok(Value::Double(f64::from(v))),
            Value::BigInt(v) => Ok(Value::Double(v as f64)),
            Value::Decimal(s) | Value::Text(s) => s
                .parse::<f64>()
                .map(Value::Double)
                .map_err(|_| mismatch(declared, &s)),
            other => Err(mismatch(declared, other.type_name())),
        },
        SqlType::Decimal => match raw {
            Value::Decimal(s) => Ok(Value::Decimal(s)),
            Value::Text(s) => Ok(Value::Decimal(s)),
            Value::SmallInt(v) => Ok(Value::Decimal(v.to_string())),
            Value::Int(v) => Ok(Value::Decimal(v.to_string())),
            Value::BigInt(v) => Ok(Value::Decimal(v.to_string())),
            Value::Double(v) => Ok(Value::Decimal(v.to_string())),
            other => Err(mismatch(declared, other.type_name())),
        },
        SqlType::Text => match raw {
            Value::Text(s) => Ok(Value::Text(s)),
            Value::Decimal(s) => Ok(Value::Text(s)),
            Value::SmallInt(v) => Ok(Value::Text(v.to_string())),
            Value::Int(v) => Ok(Value::Text(v.to_string())),
            Value::BigInt(v) => Ok(Value::Text(v.to_string())),
            Value::Double(v) => Ok(Value::Text(v.to_string())),
            Value::Bool(v) => Ok(Value::Text(v.to_string())),
            other => Err(mismatch(declared, other.type_name())),
        },
        SqlType::Bytes => match raw {
            Value::Bytes(b) => Ok(Value::Bytes(b)),
            Value::Text(s) => Ok(Value::Bytes(s.into_bytes())),
            other => Err(mismatch(declared, other.type_name())),
        },
        SqlType::Date => match raw {
            Value::Date(d) => Ok(Value::Date(d)),
            Value::Int(v) => Ok(Value::Date(v)),
            Value::BigInt(v) => i32::try_from(v)
                .map(Value::Date)
                .map_err(|_| mismatch(declared, &format!("out-of-range day count {v}"))),
            other => Err(mismatch(declared, other.type_name())),
        },
        SqlType::Timestamp => match raw {
            Value::Timestamp(ts) => Ok(Value::Timestamp(ts)),
            Value::BigInt(v) => Ok(Value::Timestamp(v)),
            Value::Int(v) => Ok(Value::Timestamp(i64::from(v))),
            other => Err(mismatch(declared, other.type_name())),
        },
        SqlType::Uuid => match raw {
            Value::Uuid(u) => Ok(Value::Uuid(u)),
            Value::Bytes(b) => <[u8; 16]>::try_from(b.as_slice())
                .map(Value::Uuid)
                .map_err(|_| mismatch(declared, &format!("{}-byte blob", b.len()))),
            Value::Text(s) => parse_uuid_text(&s).ok_or_else(|| mismatch(declared, &s)),
            other => Err(mismatch(declared, other.type_name())),
        },
        SqlType::Json => match raw {
            Value::Json(j) => Ok(Value::Json(j)),
            Value::Text(s) => serde_json::from_str(&s)
                .map(Value::Json)
                .map_err(|_| mismatch(declared, &s)),
            other => Err(mismatch(declared, other.type_name())),
        },
    }
}

fn convert_bool(raw: Value) -> Result<Value> {
    match raw {
        Value::Bool(v) => Ok(Value::Bool(v)),
        Value::SmallInt(_) | Value::Int(_) | Value::BigInt(_) => {
            match raw.as_i64() {
                Some(0) => Ok(Value::Bool(false)),
                Some(1) => Ok(Value::Bool(true)),
                _ => Err(mismatch(SqlType::Boolean, &format!("{raw:?}"))),
            }
        }
        Value::Text(s) => match s.as_str() {
            "t" | "true" | "1" => Ok(Value::Bool(true)),
            "f" | "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(mismatch(SqlType::Boolean, &s)),
        },
        other => Err(mismatch(SqlType::Boolean, other.type_name())),
    }
}

fn parse_uuid_text(s: &str) -> Option<Value> {
    let hex: String = s.chars().filter(|c| *c != '-').collect();
    if hex.len() != 32 {
        return None;
    }
    let mut out = [0u8; 16];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(Value::Uuid(out))
}

fn mismatch(declared: SqlType, actual: &str) -> Error {
    Error::Type(TypeError {
        expected: declared.sql_name(),
        actual: actual.to_string(),
        column: None,
    })
}
