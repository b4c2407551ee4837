//! Format validation utilities for BDSM stores
//!
//! This module contains pure validation functions with no I/O dependencies.
//! All functions are arithmetic on data layout and format constraints.

pub mod bounds;
pub mod layout;

pub use bounds::{validate_alignment, validate_array_bounds};
pub use layout::{align_to_boundary, align_to_8, validate_layout, validate_region};
