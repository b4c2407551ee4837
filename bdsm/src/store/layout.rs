//! Region layout for newly written stores

use bdsm_core::{align_to_8, BdsmError, BdsmHeader};

use crate::Result;

/// Byte offsets of every region in a store file
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileLayout {
    pub attributes_offset: u64,
    pub attributes_size: u64,
    pub order_offset: u64,
    pub order_size: u64,
    pub matrix_offset: u64,
    pub matrix_size: u64,
    pub row_stride: u64,
}

impl FileLayout {
    /// Lay out header, attributes, order and matrix for `n` identifiers
    pub fn calculate(n: usize, attributes_len: usize, order_len: usize) -> Result<Self> {
        let attributes_offset = BdsmHeader::SIZE as u64;
        let attributes_size = attributes_len as u64;

        let order_offset = align_to_8(BdsmHeader::SIZE + attributes_len) as u64;
        let order_size = order_len as u64;

        let order_end = (order_offset as usize)
            .checked_add(order_len)
            .ok_or(BdsmError::ArraySizeOverflow)?;
        let matrix_offset = align_to_8(order_end) as u64;
        let matrix_size = BdsmHeader::expected_matrix_size(n as u64)?;
        let row_stride = BdsmHeader {
            n: n as u64,
            ..BdsmHeader::new()
        }
        .row_stride()?;

        Ok(Self {
            attributes_offset,
            attributes_size,
            order_offset,
            order_size,
            matrix_offset,
            matrix_size,
            row_stride,
        })
    }

    /// File offset of the first byte of `row`
    pub fn row_offset(&self, row: usize) -> u64 {
        self.matrix_offset + row as u64 * self.row_stride
    }

    /// Total file length
    pub fn total_len(&self) -> u64 {
        self.matrix_offset + self.matrix_size
    }

    /// Header describing this layout; not yet marked complete
    pub fn header(&self, n: usize) -> BdsmHeader {
        let mut header = BdsmHeader::new();
        header.n = n as u64;
        header.attributes_offset = self.attributes_offset;
        header.attributes_size = self.attributes_size;
        header.order_offset = self.order_offset;
        header.order_size = self.order_size;
        header.matrix_offset = self.matrix_offset;
        header.matrix_size = self.matrix_size;
        header
    }
}
