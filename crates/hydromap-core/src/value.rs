//! Dynamic SQL values.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A dynamically-typed SQL value.
///
/// This enum represents the raw values fetched from a result set as well as
/// the domain values produced by type conversion. Identifier slices
/// (`Vec<Value>`) stand in for single-column and composite keys alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,

    /// Boolean value
    Bool(bool),

    /// 16-bit signed integer
    SmallInt(i16),

    /// 32-bit signed integer
    Int(i32),

    /// 64-bit signed integer
    BigInt(i64),

    /// 64-bit floating point
    Double(f64),

    /// Arbitrary precision decimal (stored as string)
    Decimal(String),

    /// Text string
    Text(String),

    /// Binary data
    Bytes(Vec<u8>),

    /// Date (days since epoch)
    Date(i32),

    /// Timestamp (microseconds since epoch)
    Timestamp(i64),

    /// UUID (as 16 bytes)
    Uuid([u8; 16]),

    /// JSON value
    Json(serde_json::Value),
}

impl Value {
    /// Check if this value is NULL.
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the type name of this value.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::SmallInt(_) => "SMALLINT",
            Value::Int(_) => "INTEGER",
            Value::BigInt(_) => "BIGINT",
            Value::Double(_) => "DOUBLE",
            Value::Decimal(_) => "DECIMAL",
            Value::Text(_) => "TEXT",
            Value::Bytes(_) => "BLOB",
            Value::Date(_) => "DATE",
            Value::Timestamp(_) => "TIMESTAMP",
            Value::Uuid(_) => "UUID",
            Value::Json(_) => "JSON",
        }
    }

    /// Try to convert this value to a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            Value::SmallInt(v) => Some(*v != 0),
            Value::Int(v) => Some(*v != 0),
            Value::BigInt(v) => Some(*v != 0),
            _ => None,
        }
    }

    /// Try to convert this value to an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::SmallInt(v) => Some(i64::from(*v)),
            Value::Int(v) => Some(i64::from(*v)),
            Value::BigInt(v) => Some(*v),
            Value::Bool(v) => Some(if *v { 1 } else { 0 }),
            _ => None,
        }
    }

    /// Try to convert this value to an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            Value::SmallInt(v) => Some(f64::from(*v)),
            Value::Int(v) => Some(f64::from(*v)),
            Value::BigInt(v) => Some(*v as f64),
            Value::Decimal(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Decimal(s) => Some(s),
            _ => None,
        }
    }
}

/// Hash a slice of values into a stable `u64`.
///
/// Identifier slices are used as parts of cache keys, so hashing must be
/// deterministic across value variants: each variant contributes a tag byte,
/// and floats hash by their bit pattern.
pub fn hash_values(values: &[Value]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for v in values {
        hash_single_value(v, &mut hasher);
    }
    hasher.finish()
}

fn hash_single_value(v: &Value, hasher: &mut impl Hasher) {
    match v {
        Value::Null => 0u8.hash(hasher),
        Value::Bool(b) => {
            1u8.hash(hasher);
            b.hash(hasher);
        }
        Value::SmallInt(i) => {
            2u8.hash(hasher);
            i.hash(hasher);
        }
        Value::Int(i) => {
            3u8.hash(hasher);
            i.hash(hasher);
        }
        Value::BigInt(i) => {
            4u8.hash(hasher);
            i.hash(hasher);
        }
        Value::Double(f) => {
            5u8.hash(hasher);
            f.to_bits().hash(hasher);
        }
        Value::Decimal(s) => {
            6u8.hash(hasher);
            s.hash(hasher);
        }
        Value::Text(s) => {
            7u8.hash(hasher);
            s.hash(hasher);
        }
        Value::Bytes(b) => {
            8u8.hash(hasher);
            b.hash(hasher);
        }
        Value::Date(d) => {
            9u8.hash(hasher);
            d.hash(hasher);
        }
        Value::Timestamp(ts) => {
            10u8.hash(hasher);
            ts.hash(hasher);
        }
        Value::Uuid(u) => {
            11u8.hash(hasher);
            u.hash(hasher);
        }
        Value::Json(j) => {
            12u8.hash(hasher);
            j.to_string().hash(hasher);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_checks() {
        assert!(Value::Null.is_null());
        assert!(!Value::Int(0).is_null());
    }

    #[test]
    fn lenient_numeric_access() {
        assert_eq!(Value::SmallInt(7).as_i64(), Some(7));
        assert_eq!(Value::Bool(true).as_i64(), Some(1));
        assert_eq!(Value::Text("x".to_string()).as_i64(), None);
        assert_eq!(Value::Decimal("2.5".to_string()).as_f64(), Some(2.5));
    }

    #[test]
    fn hash_is_stable_and_discriminated() {
        let a = vec![Value::BigInt(1), Value::Text("a".to_string())];
        let b = vec![Value::BigInt(1), Value::Text("a".to_string())];
        let c = vec![Value::BigInt(1), Value::Text("b".to_string())];

        assert_eq!(hash_values(&a), hash_values(&b));
        assert_ne!(hash_values(&a), hash_values(&c));

        // Same bit content under different variants must not collide.
        assert_ne!(
            hash_values(&[Value::Int(1)]),
            hash_values(&[Value::BigInt(1)])
        );
    }
}
