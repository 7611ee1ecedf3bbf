//! Error types for the quarry crate.

use std::fmt;

use thiserror::Error;

/// Errors that can occur when building or running a pipeline.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A key or extractor function could not produce a value for a record.
    #[error("invalid key at position {index}: record '{record}' has no usable '{field}'")]
    InvalidKey {
        index: usize,
        record: String,
        field: &'static str,
    },

    /// An operation that needs at least one element saw none.
    #[error("{operation} requires a non-empty sequence")]
    EmptySequence { operation: &'static str },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Operator is not valid for the given value type.
    #[error("operator '{op}' is not valid for {value_type} values")]
    InvalidOperatorForType {
        op: &'static str,
        value_type: &'static str,
    },

    /// Type mismatch between clause value and field value.
    #[error("type mismatch: clause expects {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

impl QueryError {
    pub(crate) fn empty(operation: &'static str) -> Self {
        QueryError::EmptySequence { operation }
    }
}

/// Result type for quarry operations.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Failure reported by a fallible key function.
///
/// Key functions only know the record they were handed, so they name it and
/// the field. The operator running the key function adds the position and
/// turns this into [`QueryError::InvalidKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyError {
    pub record: String,
    pub field: &'static str,
}

impl KeyError {
    /// A required field was absent on `record`.
    pub fn missing(record: impl fmt::Display, field: &'static str) -> Self {
        KeyError {
            record: record.to_string(),
            field,
        }
    }

    pub(crate) fn at(self, index: usize) -> QueryError {
        log::debug!(
            "key extraction failed at {}: record={} field={}",
            index,
            self.record,
            self.field
        );
        QueryError::InvalidKey {
            index,
            record: self.record,
            field: self.field,
        }
    }
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record '{}' has no usable '{}'", self.record, self.field)
    }
}

impl std::error::Error for KeyError {}

/// Unwraps an optional field for use as a key.
///
/// ```
/// use quarry::require;
///
/// let region: Option<String> = None;
/// let err = require(region.as_ref(), "ALFKI", "region").unwrap_err();
/// assert_eq!(err.field, "region");
/// ```
pub fn require<'a, T: ?Sized>(
    value: Option<&'a T>,
    record: impl fmt::Display,
    field: &'static str,
) -> std::result::Result<&'a T, KeyError> {
    value.ok_or_else(|| KeyError::missing(record, field))
}
