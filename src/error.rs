//! Error types shared by the calculators and the rate-table loader

use thiserror::Error;

/// Errors raised by illustration calculators and table lookups
#[derive(Debug, Error)]
pub enum IllustrationError {
    /// A parameter was outside its domain (non-positive years, negative currency, ...)
    #[error("invalid {field}: {reason}")]
    Domain { field: String, reason: String },

    /// Lookup into a rate table for a key it does not carry
    #[error("{table} has no entry for {key}")]
    NotFound { table: String, key: String },

    #[error("rate table CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("rate table I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{table} line {line}: {reason}")]
    Parse {
        table: String,
        line: usize,
        reason: String,
    },

    #[error("request serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IllustrationError {
    pub fn domain(field: impl Into<String>, reason: impl Into<String>) -> Self {
        IllustrationError::Domain {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(table: impl Into<String>, key: impl ToString) -> Self {
        IllustrationError::NotFound {
            table: table.into(),
            key: key.to_string(),
        }
    }

    /// True for the errors a UI should answer by resetting to defaults
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            IllustrationError::Domain { .. } | IllustrationError::NotFound { .. }
        )
    }
}

pub type IllustrationResult<T> = Result<T, IllustrationError>;
