//! Core BDSM header format definitions
//!
//! This module contains the fixed-size file header and related enums.

use core::mem::size_of;

use super::constants::flags;
use crate::{BdsmError, Result};

/// Fixed-size header at the start of every .bdsm file
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BdsmHeader {
    /// Magic bytes: "BDSM"
    pub magic: [u8; 4],
    /// Format version
    pub version: u8,
    /// Element data type (f64=1)
    pub data_type: u8,
    /// Store flags (complete, ...)
    pub flags: u8,
    /// Chunk layout of the matrix region (row=0)
    pub chunk_layout: u8,
    /// Number of identifiers; the matrix is n x n
    pub n: u64,
    /// Offset to the JSON attributes region
    pub attributes_offset: u64,
    /// Size of the attributes region in bytes
    pub attributes_size: u64,
    /// Offset to the order section
    pub order_offset: u64,
    /// Size of the order section in bytes
    pub order_size: u64,
    /// Offset to the first matrix row
    pub matrix_offset: u64,
    /// Size of the matrix region in bytes
    pub matrix_size: u64,
    /// Reserved space for future extensions
    pub reserved: [u8; 32],
}

impl BdsmHeader {
    /// Magic bytes for .bdsm files
    pub const MAGIC: [u8; 4] = *b"BDSM";

    /// Current format version
    pub const VERSION: u8 = 1;

    /// Size of the header in bytes
    pub const SIZE: usize = size_of::<Self>();

    /// Create a new header with default values
    pub const fn new() -> Self {
        Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
            data_type: DataType::F64.to_u8(),
            flags: 0,
            chunk_layout: ChunkLayout::Row.to_u8(),
            n: 0,
            attributes_offset: 0,
            attributes_size: 0,
            order_offset: 0,
            order_size: 0,
            matrix_offset: 0,
            matrix_size: 0,
            reserved: [0; 32],
        }
    }

    /// Whether the writer finalized this store
    pub const fn is_complete(&self) -> bool {
        self.flags & flags::COMPLETE != 0
    }

    /// Mark the store as finalized
    pub fn set_complete(&mut self) {
        self.flags |= flags::COMPLETE;
    }

    /// Attributes region offset and size
    pub const fn attributes_region(&self) -> (u64, u64) {
        (self.attributes_offset, self.attributes_size)
    }

    /// Order section offset and size
    pub const fn order_region(&self) -> (u64, u64) {
        (self.order_offset, self.order_size)
    }

    /// Matrix region offset and size
    pub const fn matrix_region(&self) -> (u64, u64) {
        (self.matrix_offset, self.matrix_size)
    }

    /// Bytes occupied by one matrix row (one chunk)
    pub fn row_stride(&self) -> Result<u64> {
        self.n
            .checked_mul(DataType::F64.size_bytes() as u64)
            .ok_or(BdsmError::ArraySizeOverflow)
    }

    /// Expected size of the matrix region for `n` identifiers
    pub fn expected_matrix_size(n: u64) -> Result<u64> {
        n.checked_mul(n)
            .and_then(|cells| cells.checked_mul(DataType::F64.size_bytes() as u64))
            .ok_or(BdsmError::ArraySizeOverflow)
    }

    /// Validate the magic, version and data type
    pub fn is_valid(&self) -> bool {
        self.magic == Self::MAGIC
            && self.version <= Self::VERSION
            && DataType::from_u8(self.data_type) == Some(DataType::F64)
            && ChunkLayout::from_u8(self.chunk_layout).is_some()
    }

    /// Parse header from bytes
    ///
    /// Only decodes and checks the header itself. Region bounds against the
    /// actual file length are checked by [`crate::validate_region`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(BdsmError::InsufficientBuffer);
        }

        // Validate magic bytes
        if bytes[0..4] != Self::MAGIC {
            return Err(BdsmError::InvalidHeader);
        }

        let version = bytes[4];
        let data_type = bytes[5];
        let flags = bytes[6];
        let chunk_layout = bytes[7];

        let mut reserved = [0u8; 32];
        reserved.copy_from_slice(&bytes[64..96]);

        let header = Self {
            magic: Self::MAGIC,
            version,
            data_type,
            flags,
            chunk_layout,
            n: read_u64(bytes, 8)?,
            attributes_offset: read_u64(bytes, 16)?,
            attributes_size: read_u64(bytes, 24)?,
            order_offset: read_u64(bytes, 32)?,
            order_size: read_u64(bytes, 40)?,
            matrix_offset: read_u64(bytes, 48)?,
            matrix_size: read_u64(bytes, 56)?,
            reserved,
        };

        if !header.is_valid() {
            return Err(BdsmError::UnsupportedFormat);
        }

        if header.matrix_size != Self::expected_matrix_size(header.n)? {
            return Err(BdsmError::CorruptedData);
        }

        Ok(header)
    }

    /// Convert header to a fixed-size byte array
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];

        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes[5] = self.data_type;
        bytes[6] = self.flags;
        bytes[7] = self.chunk_layout;

        // u64 fields in little-endian
        bytes[8..16].copy_from_slice(&self.n.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.attributes_offset.to_le_bytes());
        bytes[24..32].copy_from_slice(&self.attributes_size.to_le_bytes());
        bytes[32..40].copy_from_slice(&self.order_offset.to_le_bytes());
        bytes[40..48].copy_from_slice(&self.order_size.to_le_bytes());
        bytes[48..56].copy_from_slice(&self.matrix_offset.to_le_bytes());
        bytes[56..64].copy_from_slice(&self.matrix_size.to_le_bytes());
        bytes[64..96].copy_from_slice(&self.reserved);

        bytes
    }
}

impl Default for BdsmHeader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_u64(bytes: &[u8], at: usize) -> Result<u64> {
    let field: [u8; 8] = bytes
        .get(at..at + 8)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(BdsmError::InsufficientBuffer)?;
    Ok(u64::from_le_bytes(field))
}

/// Element data types understood by the BDSM format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataType {
    /// 64-bit floating point
    F64 = 1,
}

impl DataType {
    /// Convert from u8 representation
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(DataType::F64),
            _ => None,
        }
    }

    /// Convert to u8 representation
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Get the size in bytes for this data type
    pub const fn size_bytes(self) -> usize {
        match self {
            DataType::F64 => 8,
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DataType::F64 => write!(f, "f64"),
        }
    }
}

/// Physical chunking of the matrix region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChunkLayout {
    /// One chunk per row, rows stored contiguously
    Row = 0,
}

impl ChunkLayout {
    /// Convert from u8 representation
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ChunkLayout::Row),
            _ => None,
        }
    }

    /// Convert to u8 representation
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

impl core::fmt::Display for ChunkLayout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChunkLayout::Row => write!(f, "row"),
        }
    }
}
