//! Format constants and magic bytes for the BDSM layout

/// Alignment boundary for the order and matrix regions
pub const ALIGNMENT_BOUNDARY: usize = 8;

/// Header flag bits
pub mod flags {
    /// Set by the writer once every row has been written
    pub const COMPLETE: u8 = 1 << 0;
}

/// Order section constants
pub mod order {
    /// Size of the fixed order section header (entry count)
    pub const HEADER_SIZE: usize = 8;

    /// Size of the length prefix of each identifier entry
    pub const ENTRY_PREFIX_SIZE: usize = 4;
}
