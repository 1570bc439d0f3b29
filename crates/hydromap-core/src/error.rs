//! Error types for hydromap operations.

use std::fmt;

/// The primary error type for all hydromap operations.
#[derive(Debug)]
pub enum Error {
    /// Configuration errors (invalid result-set mapping, bad metadata)
    Config(ConfigError),
    /// Data integrity errors raised during hydration
    Hydration(HydrationError),
    /// Type conversion errors
    Type(TypeError),
    /// Failures from an underlying collection persister
    Write(WriteError),
    /// Cache region store/evict failures
    Region(RegionError),
    /// Custom error with message
    Custom(String),
}

/// A configuration problem detected before any row is processed.
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

/// A per-query data integrity failure. Aborts the whole hydration pass.
#[derive(Debug)]
pub struct HydrationError {
    pub kind: HydrationErrorKind,
    pub entity: Option<String>,
    pub column: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationErrorKind {
    /// The discriminator column is absent from the row
    MissingDiscriminatorColumn,
    /// The discriminator column holds an empty value
    EmptyDiscriminatorValue,
    /// The discriminator value has no entry in the discriminator map
    UnknownDiscriminatorValue,
    /// A column maps to an association, which this hydrator does not support
    UnexpectedAssociationColumn,
}

/// A raw value could not be converted to the declared domain type.
#[derive(Debug)]
pub struct TypeError {
    pub expected: &'static str,
    pub actual: String,
    pub column: Option<String>,
}

/// A write performed by the underlying collection persister failed.
#[derive(Debug)]
pub struct WriteError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// A cache region operation failed.
#[derive(Debug)]
pub struct RegionError {
    pub kind: RegionErrorKind,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionErrorKind {
    /// Storing an entry failed
    Store,
    /// Evicting an entry failed
    Evict,
    /// The region is unavailable
    Unavailable,
}

impl HydrationError {
    /// The discriminator column was not present in the result row.
    pub fn missing_discriminator(entity: &str, column: &str) -> Self {
        Self {
            kind: HydrationErrorKind::MissingDiscriminatorColumn,
            entity: Some(entity.to_string()),
            column: Some(column.to_string()),
            message: format!(
                "the discriminator column '{column}' is missing for entity '{entity}'"
            ),
        }
    }

    /// The discriminator column held an empty value.
    pub fn empty_discriminator(entity: &str, column: &str) -> Self {
        Self {
            kind: HydrationErrorKind::EmptyDiscriminatorValue,
            entity: Some(entity.to_string()),
            column: Some(column.to_string()),
            message: format!("the discriminator value for entity '{entity}' is empty"),
        }
    }

    /// The discriminator value is not part of the discriminator map.
    pub fn unknown_discriminator(value: &str, known: &[&str]) -> Self {
        Self {
            kind: HydrationErrorKind::UnknownDiscriminatorValue,
            entity: None,
            column: None,
            message: format!(
                "the discriminator value '{value}' is not mapped; known values: {}",
                known.join(", ")
            ),
        }
    }

    /// A result column belongs to an association.
    pub fn association_column(column: &str) -> Self {
        Self {
            kind: HydrationErrorKind::UnexpectedAssociationColumn,
            entity: None,
            column: Some(column.to_string()),
            message: format!(
                "unable to retrieve association information for column '{column}'; \
                 use a full object hydrator for joined associations"
            ),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e.message),
            Error::Hydration(e) => write!(f, "Hydration error: {}", e.message),
            Error::Type(e) => {
                if let Some(col) = &e.column {
                    write!(
                        f,
                        "Type error in column '{}': expected {}, found {}",
                        col, e.expected, e.actual
                    )
                } else {
                    write!(f, "Type error: expected {}, found {}", e.expected, e.actual)
                }
            }
            Error::Write(e) => write!(f, "Write error: {}", e.message),
            Error::Region(e) => write!(f, "Cache region error: {}", e.message),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Write(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            Error::Region(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for HydrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(col) = &self.column {
            write!(
                f,
                "expected {} for column '{}', found {}",
                self.expected, col, self.actual
            )
        } else {
            write!(f, "expected {}, found {}", self.expected, self.actual)
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<HydrationError> for Error {
    fn from(err: HydrationError) -> Self {
        Error::Hydration(err)
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Error::Type(err)
    }
}

impl From<WriteError> for Error {
    fn from(err: WriteError) -> Self {
        Error::Write(err)
    }
}

impl From<RegionError> for Error {
    fn from(err: RegionError) -> Self {
        Error::Region(err)
    }
}

impl Error {
    /// Is this a data integrity failure raised during hydration?
    pub fn is_hydration_error(&self) -> bool {
        matches!(self, Error::Hydration(_))
    }

    /// Get the hydration error kind, if any.
    pub fn hydration_kind(&self) -> Option<HydrationErrorKind> {
        match self {
            Error::Hydration(e) => Some(e.kind),
            _ => None,
        }
    }
}

/// Result type alias for hydromap operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hydration_error_constructors_carry_context() {
        let err = HydrationError::missing_discriminator("Person", "discr");
        assert_eq!(err.kind, HydrationErrorKind::MissingDiscriminatorColumn);
        assert_eq!(err.entity.as_deref(), Some("Person"));
        assert_eq!(err.column.as_deref(), Some("discr"));

        let err = HydrationError::unknown_discriminator("X", &["A", "B"]);
        assert_eq!(err.kind, HydrationErrorKind::UnknownDiscriminatorValue);
        assert!(err.message.contains("A, B"));
    }

    #[test]
    fn hydration_kind_accessor() {
        let err = Error::Hydration(HydrationError::association_column("team_id"));
        assert!(err.is_hydration_error());
        assert_eq!(
            err.hydration_kind(),
            Some(HydrationErrorKind::UnexpectedAssociationColumn)
        );

        let err = Error::Custom("nope".to_string());
        assert!(!err.is_hydration_error());
        assert_eq!(err.hydration_kind(), None);
    }

    #[test]
    fn display_includes_column_for_type_errors() {
        let err = Error::Type(TypeError {
            expected: "BOOLEAN",
            actual: "TEXT".to_string(),
            column: Some("active".to_string()),
        });
        let rendered = err.to_string();
        assert!(rendered.contains("'active'"));
        assert!(rendered.contains("BOOLEAN"));
    }
}
