//! Error types for store access and conversion

use bdsm_core::BdsmError;
use thiserror::Error;

/// Errors returned by the `bdsm` crate
#[derive(Error, Debug)]
pub enum Error {
    /// A requested source identifier is not in the store's order
    #[error("Unknown ID: {0}")]
    UnknownIdentifier(String),

    /// A supplied mask names an identifier not in the store's order
    #[error("Mask includes IDs not in the matrix: {id}")]
    InvalidMask { id: String },

    /// Conversion input does not look like a distance matrix
    #[error("Does not appear to be a distance matrix (line {line}): {reason}")]
    MalformedInput { line: usize, reason: String },

    /// An identifier appears twice in a store being built
    #[error("Duplicate ID: {0}")]
    DuplicateIdentifier(String),

    /// Binary layout errors from the format layer
    #[error("Store format error: {0}")]
    Format(#[from] BdsmError),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Attribute region (de)serialization errors
    #[error("Attribute error: {0}")]
    Attributes(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for `bdsm` operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_format_error_is_the_source() {
        let err = Error::from(BdsmError::IncompleteStore);

        let source = err.source().unwrap();
        assert_eq!(source.to_string(), BdsmError::IncompleteStore.to_string());
        assert_eq!(
            source.downcast_ref::<BdsmError>(),
            Some(&BdsmError::IncompleteStore)
        );
        assert!(err.to_string().starts_with("Store format error"));
    }

    #[test]
    fn test_malformed_carries_line() {
        let err = Error::malformed(7, "bad token");
        assert_eq!(
            err.to_string(),
            "Does not appear to be a distance matrix (line 7): bad token"
        );
        assert!(err.source().is_none());
    }
}
