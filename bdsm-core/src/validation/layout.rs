//! Region layout validation for BDSM stores
//!
//! Checks that the regions a header describes fit the file and do not
//! overlap in the order the writer lays them out.

use core::ops::Range;

use crate::format::constants::ALIGNMENT_BOUNDARY;
use crate::{BdsmError, BdsmHeader};

/// Align an offset to a power-of-two boundary
pub const fn align_to_boundary(offset: usize, boundary: usize) -> usize {
    (offset + boundary - 1) & !(boundary - 1)
}

/// Align an offset to the 8-byte region boundary
pub const fn align_to_8(offset: usize) -> usize {
    align_to_boundary(offset, ALIGNMENT_BOUNDARY)
}

/// Validate a region `(offset, size)` against the total length
///
/// Returns the region as a byte range usable for slicing.
pub fn validate_region(offset: u64, size: u64, total_len: usize) -> Result<Range<usize>, BdsmError> {
    let start = usize::try_from(offset).map_err(|_| BdsmError::ArraySizeOverflow)?;
    let size = usize::try_from(size).map_err(|_| BdsmError::ArraySizeOverflow)?;
    let end = start.checked_add(size).ok_or(BdsmError::ArraySizeOverflow)?;

    if end > total_len {
        return Err(BdsmError::CorruptedData);
    }

    Ok(start..end)
}

/// Validate every region of a header against the file length
///
/// Regions must follow the header in order attributes, order, matrix,
/// and the matrix region must start on the 8-byte boundary.
pub fn validate_layout(header: &BdsmHeader, file_len: usize) -> Result<(), BdsmError> {
    let (attrs_offset, attrs_size) = header.attributes_region();
    let (order_offset, order_size) = header.order_region();
    let (matrix_offset, matrix_size) = header.matrix_region();

    let attrs = validate_region(attrs_offset, attrs_size, file_len)?;
    let order = validate_region(order_offset, order_size, file_len)?;
    let matrix = validate_region(matrix_offset, matrix_size, file_len)?;

    if attrs.start < BdsmHeader::SIZE || order.start < attrs.end || matrix.start < order.end {
        return Err(BdsmError::CorruptedData);
    }

    if matrix.start % ALIGNMENT_BOUNDARY != 0 {
        return Err(BdsmError::ArrayAlignment);
    }

    Ok(())
}
