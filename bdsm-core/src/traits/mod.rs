//! Abstract interfaces for BDSM stores
//!
//! Traits are pure interfaces - the memory-mapped implementation lives in
//! the `bdsm` crate.

pub mod source;

pub use source::DistanceSource;
