//! BDSM - Binary DisSimilarity Matrix access
//!
//! This library provides read-only random access to large pairwise distance
//! matrices stored in a memory-mapped binary file, so a handful of rows can
//! be queried without loading the whole N x N matrix.
//!
//! ## Architecture
//!
//! BDSM keeps the on-disk format apart from the I/O that reads and writes it:
//!
//! - **bdsm-core**: Pure format definitions, validation and the read contract (no I/O)
//! - **bdsm**: Memory-mapped store, writer, masked accessor and text converter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bdsm::{convert_file, ConvertOptions, DistanceMatrix};
//!
//! fn example() -> bdsm::Result<()> {
//!     // One-off conversion of a legacy tab-delimited matrix
//!     convert_file("distances.tsv", "distances.bdsm", &ConvertOptions::default())?;
//!
//!     let dm = DistanceMatrix::open_path("distances.bdsm")?;
//!     for record in dm.within(&["b", "d", "e"])? {
//!         println!("{} -> {}: {}", record.source, record.target, record.value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Memory-mapped I/O**: Rows are read straight out of the mapping
//! - **Masks**: Restrict result targets to a subset, always in matrix order
//! - **Transpose**: Read columns instead of rows for asymmetric matrices
//! - **Finalized writes**: Interrupted conversions never yield a readable store

// Re-export core format definitions
pub use bdsm_core::{BdsmError, BdsmHeader, DistanceSource};

pub mod accessor;
pub mod attributes;
pub mod config;
pub mod convert;
pub mod error;
pub mod index;
pub mod mask;
pub mod record;
pub mod store;

pub use accessor::DistanceMatrix;
pub use attributes::{format_spec, Attributes};
pub use config::{AccessorConfig, ConvertOptions};
pub use convert::{convert_file, convert_from_ascii, ConversionSummary};
pub use error::{Error, Result};
pub use index::IdIndex;
pub use mask::MaskedView;
pub use record::{write_tsv, DistanceRecord};
pub use store::{MatrixStore, StoreWriter};
