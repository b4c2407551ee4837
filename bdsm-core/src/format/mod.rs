//! Binary format definitions for the BDSM file layout
//!
//! This module contains pure data structure definitions for the BDSM wire format.
//! No I/O operations - only layout specifications and their encoders/decoders.

pub mod constants;
pub mod header;
pub mod order;
pub mod spec;

// Re-export format definitions
pub use header::{BdsmHeader, ChunkLayout, DataType};
pub use order::{OrderIter, OrderSectionHeader, OrderView};
#[cfg(feature = "alloc")]
pub use order::OrderBuilder;
