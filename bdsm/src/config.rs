//! Configuration values for opening accessors and running conversions

use std::path::{Path, PathBuf};

/// Immutable description of an accessor: which store, which targets, which axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorConfig {
    path: PathBuf,
    mask: Option<Vec<String>>,
    transposed: bool,
}

impl AccessorConfig {
    /// Unmasked, untransposed access to the store at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            mask: None,
            transposed: false,
        }
    }

    /// Retain only these identifiers as targets
    pub fn with_mask<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mask = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Read columns instead of rows
    pub fn with_transposed(mut self, transposed: bool) -> Self {
        self.transposed = transposed;
        self
    }

    /// Store path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mask identifiers as supplied, if any
    pub fn mask(&self) -> Option<&[String]> {
        self.mask.as_deref()
    }

    /// Whether the accessor reads the transpose
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }
}

/// Options for text-to-binary conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Replace an existing output file instead of refusing
    pub overwrite: bool,
}

impl ConvertOptions {
    /// Set whether an existing output is replaced
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}
