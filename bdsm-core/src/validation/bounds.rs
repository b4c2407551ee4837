//! Array bounds and alignment validation
//!
//! Pure arithmetic checks for reinterpreting byte regions as typed arrays.

use crate::BdsmError;

/// Validate array bounds for a given element type
///
/// Returns the number of `T` elements a byte region of `byte_len` holds.
pub const fn validate_array_bounds<T>(byte_len: usize) -> Result<usize, BdsmError> {
    let element_size = core::mem::size_of::<T>();

    if byte_len % element_size != 0 {
        return Err(BdsmError::ArrayAlignment);
    }

    let count = byte_len / element_size;

    // Reject arrays large enough to overflow downstream offset arithmetic
    if count > usize::MAX / 8 {
        return Err(BdsmError::ArraySizeOverflow);
    }

    Ok(count)
}

/// Validate alignment for a pointer to typed data
///
/// Checks the address only; no memory is accessed.
pub fn validate_alignment<T>(ptr: *const u8) -> Result<(), BdsmError> {
    let alignment = core::mem::align_of::<T>();
    let addr = ptr as usize;

    if addr % alignment != 0 {
        return Err(BdsmError::ArrayAlignment);
    }

    Ok(())
}
