//! Error types for sqlbind

use crate::value::Value;
use thiserror::Error;

/// Result type alias for sqlbind operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for building and rendering queries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlError {
    /// A required input was missing or invalid
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Unknown format tag on an interpolated value
    #[error("Unsupported format '{format}' (expected no format or 'l')")]
    Format { format: String },

    /// Metadata key re-added with a different value
    #[error("Metadata conflict on key '{key}': existing {existing}, incoming {incoming}")]
    MetadataConflict {
        key: String,
        existing: Value,
        incoming: Value,
    },

    /// A parameter was not found in the placeholder index while rendering.
    ///
    /// This indicates a bug in the renderer, not a caller error.
    #[error("Parameter {0} has no assigned placeholder")]
    ParameterLookup(Value),
}

impl SqlError {
    /// Create an argument error
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }

    /// Create a format error for the given tag
    pub fn format(format: impl Into<String>) -> Self {
        Self::Format {
            format: format.into(),
        }
    }

    /// Create a metadata conflict error
    pub fn metadata_conflict(key: impl Into<String>, existing: Value, incoming: Value) -> Self {
        Self::MetadataConflict {
            key: key.into(),
            existing,
            incoming,
        }
    }

    /// Check if this is an argument error
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument(_))
    }

    /// Check if this is a format error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Check if this is a metadata conflict
    pub fn is_metadata_conflict(&self) -> bool {
        matches!(self, Self::MetadataConflict { .. })
    }
}
