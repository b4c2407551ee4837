//! Error types for BDSM format operations

/// Errors that can occur while decoding or validating a BDSM store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BdsmError {
    /// Invalid header format or magic bytes
    InvalidHeader,
    /// Unsupported format version or data type
    UnsupportedFormat,
    /// Store was never finalized by its writer
    IncompleteStore,
    /// Data corruption detected
    CorruptedData,
    /// Insufficient buffer space
    InsufficientBuffer,
    /// Index out of bounds
    IndexOutOfBounds,
    /// Array length not a multiple of the element size
    ArrayAlignment,
    /// Array size calculation overflowed
    ArraySizeOverflow,
}

impl core::fmt::Display for BdsmError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            BdsmError::InvalidHeader => "Invalid BDSM header",
            BdsmError::UnsupportedFormat => "Unsupported format version or data type",
            BdsmError::IncompleteStore => "Store was not finalized and is unusable",
            BdsmError::CorruptedData => "Data corruption detected",
            BdsmError::InsufficientBuffer => "Insufficient buffer space",
            BdsmError::IndexOutOfBounds => "Index out of bounds",
            BdsmError::ArrayAlignment => "Array size not aligned to element size",
            BdsmError::ArraySizeOverflow => "Array size overflow",
        };
        write!(f, "{msg}")
    }
}

impl core::error::Error for BdsmError {}

/// Result type for BDSM format operations
pub type Result<T> = core::result::Result<T, BdsmError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_error<E: core::error::Error + Send + Sync + 'static>(_: &E) {}

    #[test]
    fn test_error_trait() {
        let err = BdsmError::IncompleteStore;
        assert_error(&err);
        assert!(core::error::Error::source(&err).is_none());
    }
}
