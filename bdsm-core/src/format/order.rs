//! Order section layout for BDSM stores
//!
//! The order section holds the identifiers in matrix order as
//! variable-length UTF-8 strings: a `u64` entry count followed by
//! `count` entries of `u32` byte length plus the bytes themselves.

use super::constants::order::{ENTRY_PREFIX_SIZE, HEADER_SIZE};
use crate::{BdsmError, Result};

/// Fixed-size order section header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSectionHeader {
    /// Number of identifiers in the section
    pub count: u64,
}

impl OrderSectionHeader {
    /// Parse the section header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let field: [u8; HEADER_SIZE] = bytes
            .get(..HEADER_SIZE)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(BdsmError::InsufficientBuffer)?;
        Ok(Self {
            count: u64::from_le_bytes(field),
        })
    }

    /// Convert to bytes
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        self.count.to_le_bytes()
    }
}

/// Zero-copy view over an encoded order section
#[derive(Debug, Clone, Copy)]
pub struct OrderView<'a> {
    data: &'a [u8],
    header: OrderSectionHeader,
}

impl<'a> OrderView<'a> {
    /// Create a view over raw section bytes
    ///
    /// Every entry is walked once so later iteration cannot run past the
    /// section or yield invalid UTF-8.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let header = OrderSectionHeader::from_bytes(data)?;
        let view = Self { data, header };

        let mut consumed = HEADER_SIZE;
        for entry in view.iter() {
            let id = entry?;
            consumed += ENTRY_PREFIX_SIZE + id.len();
        }
        if consumed != data.len() {
            return Err(BdsmError::CorruptedData);
        }

        Ok(view)
    }

    /// Number of identifiers
    pub fn len(&self) -> u64 {
        self.header.count
    }

    /// Whether the section holds no identifiers
    pub fn is_empty(&self) -> bool {
        self.header.count == 0
    }

    /// Iterate identifiers in matrix order
    pub fn iter(&self) -> OrderIter<'a> {
        OrderIter {
            data: self.data,
            pos: HEADER_SIZE,
            remaining: self.header.count,
        }
    }
}

/// Iterator over the identifiers of an order section
#[derive(Debug, Clone)]
pub struct OrderIter<'a> {
    data: &'a [u8],
    pos: usize,
    remaining: u64,
}

impl<'a> Iterator for OrderIter<'a> {
    type Item = Result<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let entry = self.read_entry();
        if entry.is_err() {
            // Stop after the first decode failure
            self.remaining = 0;
        }
        Some(entry)
    }
}

impl<'a> OrderIter<'a> {
    fn read_entry(&mut self) -> Result<&'a str> {
        let prefix_end = self
            .pos
            .checked_add(ENTRY_PREFIX_SIZE)
            .ok_or(BdsmError::CorruptedData)?;
        let prefix: [u8; ENTRY_PREFIX_SIZE] = self
            .data
            .get(self.pos..prefix_end)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(BdsmError::CorruptedData)?;
        let len = u32::from_le_bytes(prefix) as usize;

        let end = prefix_end.checked_add(len).ok_or(BdsmError::CorruptedData)?;
        let bytes = self
            .data
            .get(prefix_end..end)
            .ok_or(BdsmError::CorruptedData)?;
        let id = core::str::from_utf8(bytes).map_err(|_| BdsmError::CorruptedData)?;

        self.pos = end;
        Ok(id)
    }
}

/// Builder for encoding an order section
#[cfg(feature = "alloc")]
#[derive(Debug, Default)]
pub struct OrderBuilder {
    entries: alloc::vec::Vec<u8>,
    count: u64,
}

#[cfg(feature = "alloc")]
impl OrderBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one identifier
    pub fn push(&mut self, id: &str) -> Result<()> {
        let len = u32::try_from(id.len()).map_err(|_| BdsmError::ArraySizeOverflow)?;
        self.entries.extend_from_slice(&len.to_le_bytes());
        self.entries.extend_from_slice(id.as_bytes());
        self.count += 1;
        Ok(())
    }

    /// Encoded size of the section in bytes
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.entries.len()
    }

    /// Build the section into a byte vector
    pub fn build(self) -> alloc::vec::Vec<u8> {
        let mut section = alloc::vec::Vec::with_capacity(self.encoded_len());
        section.extend_from_slice(&OrderSectionHeader { count: self.count }.to_bytes());
        section.extend_from_slice(&self.entries);
        section
    }
}
