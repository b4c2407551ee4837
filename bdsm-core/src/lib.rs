#![no_std]

//! BDSM Core - Binary DisSimilarity Matrix Format Definitions
//!
//! This crate provides the on-disk format definitions, validation helpers
//! and read contract for dense pairwise distance matrix stores. It performs
//! no I/O; see the `bdsm` crate for the memory-mapped reader and writer.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use traits::*;
pub use validation::{
    align_to_8, validate_alignment, validate_array_bounds, validate_layout, validate_region,
};
