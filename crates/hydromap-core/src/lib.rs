//! Core types for hydromap.
//!
//! This crate provides the foundational abstractions shared by the cache and
//! hydration layers:
//!
//! - `Value` for dynamically-typed SQL values
//! - `Row` / `RowSource` for raw result-set access
//! - `SqlType` and `convert_to_domain` for declared-type value conversion
//! - `EntityMeta` / `DiscriminatorInfo` for the inheritance metadata slice
//! - `Error` / `Result` for all hydromap operations

pub mod error;
pub mod meta;
pub mod row;
pub mod types;
pub mod value;

pub use error::{
    ConfigError, Error, HydrationError, HydrationErrorKind, RegionError, RegionErrorKind, Result,
    TypeError, WriteError,
};
pub use meta::{DiscriminatorInfo, EntityMeta};
pub use row::{ColumnInfo, MemoryRowSource, Row, RowSource};
pub use types::{convert_to_domain, Platform, ResultCasing, SqlType};
pub use value::{hash_values, Value};
