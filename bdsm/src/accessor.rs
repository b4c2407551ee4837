//! Masked, transposable access to a distance matrix store
//!
//! A [`DistanceMatrix`] answers queries by identifier. Each query reads one
//! row per requested source (one column when transposed) and returns
//! `(source, target, value)` records whose targets follow matrix order
//! restricted to the accessor's mask.
//!
//! ```rust,no_run
//! use bdsm::{AccessorConfig, DistanceMatrix};
//!
//! fn example() -> bdsm::Result<()> {
//!     let dm = DistanceMatrix::open(&AccessorConfig::new("distances.bdsm"))?;
//!
//!     for record in dm.between(&["b", "d"], &["a", "e", "c"])? {
//!         println!("{}\t{}\t{}", record.source, record.target, record.value);
//!     }
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use bdsm_core::{BdsmError, DistanceSource};
use tracing::debug;

use crate::attributes::Attributes;
use crate::config::AccessorConfig;
use crate::index::IdIndex;
use crate::mask::MaskedView;
use crate::record::DistanceRecord;
use crate::store::MatrixStore;
use crate::Result;

/// Query handle over a shared store, an identifier index and a mask
///
/// Accessors are cheap. `within` and `between` build a fresh, narrowly
/// masked accessor on every call and nothing is cached between calls.
#[derive(Debug)]
pub struct DistanceMatrix<S: DistanceSource = MatrixStore> {
    store: Arc<S>,
    index: IdIndex,
    view: MaskedView,
}

impl DistanceMatrix<MatrixStore> {
    /// Open the store a config points at and build the accessor
    ///
    /// An invalid mask fails here, before any row is read; the store
    /// handle opened for validation is released on that path too.
    pub fn open(config: &AccessorConfig) -> Result<Self> {
        let store = Arc::new(MatrixStore::open(config.path())?);
        let mask: Option<Vec<&str>> = config
            .mask()
            .map(|ids| ids.iter().map(String::as_str).collect());
        Self::with_store(store, mask.as_deref(), config.is_transposed())
    }

    /// Unmasked, untransposed accessor for the store at `path`
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(&AccessorConfig::new(path))
    }

    /// Format-spec attributes of the underlying store
    pub fn attributes(&self) -> &Attributes {
        self.store.attributes()
    }
}

impl<S: DistanceSource> DistanceMatrix<S> {
    /// Build an accessor over an already-open store
    pub fn with_store(store: Arc<S>, mask: Option<&[&str]>, transposed: bool) -> Result<Self> {
        let index = IdIndex::build(&*store)?;
        let view = MaskedView::construct(&index, mask, transposed)?;

        debug!(
            n = index.len(),
            retained = view.len(),
            transposed,
            "built distance matrix accessor"
        );
        Ok(Self { store, index, view })
    }

    /// Distances from `id` to every retained target, in matrix order
    ///
    /// The mask restricts targets only: any identifier in the store is a
    /// valid source. Performs exactly one row read (column read when
    /// transposed).
    pub fn get(&self, id: &str) -> Result<Vec<DistanceRecord>> {
        let offset = self.index.get(id)?;

        let mut values = Vec::with_capacity(self.view.len());
        if self.view.is_transposed() {
            self.store.read_col(offset, self.view.mask(), &mut values)?;
        } else {
            self.store.read_row(offset, self.view.mask(), &mut values)?;
        }
        if values.len() != self.view.len() {
            return Err(BdsmError::CorruptedData.into());
        }

        Ok(self
            .view
            .masked_ids(&self.index)
            .zip(values)
            .map(|(target, value)| DistanceRecord::new(id, target, value))
            .collect())
    }

    /// The full block of distances among `ids`
    ///
    /// Sources follow the order of `ids`; targets follow matrix order.
    pub fn within<T: AsRef<str>>(&self, ids: &[T]) -> Result<Vec<DistanceRecord>> {
        self.between(ids, ids)
    }

    /// Distances from each of `sources` to each of `targets`
    ///
    /// Sources follow the given order; targets follow matrix order
    /// whatever order they were given in.
    pub fn between<T, U>(&self, sources: &[T], targets: &[U]) -> Result<Vec<DistanceRecord>>
    where
        T: AsRef<str>,
        U: AsRef<str>,
    {
        let targets: Vec<&str> = targets.iter().map(AsRef::as_ref).collect();
        let narrowed = Self::with_store(
            Arc::clone(&self.store),
            Some(targets.as_slice()),
            self.view.is_transposed(),
        )?;

        let mut records = Vec::with_capacity(sources.len() * narrowed.view.len());
        for source in sources {
            records.extend(narrowed.get(source.as_ref())?);
        }
        Ok(records)
    }

    /// The same store and mask read along the opposite axis
    ///
    /// Does no I/O; the flipped axis only takes effect on the next query.
    pub fn transpose(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            index: self.index.clone(),
            view: self.view.transpose(),
        }
    }

    /// All identifiers in matrix order
    pub fn ids(&self) -> &[String] {
        self.index.ids()
    }

    /// Retained target identifiers in matrix order
    pub fn masked_ids(&self) -> Vec<&str> {
        self.view.masked_ids(&self.index).collect()
    }

    /// Boolean retention mask in matrix order
    pub fn mask(&self) -> &[bool] {
        self.view.mask()
    }

    /// Whether queries read columns
    pub fn is_transposed(&self) -> bool {
        self.view.is_transposed()
    }

    /// Number of identifiers in the store
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the store holds no identifiers
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The shared store handle
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}
