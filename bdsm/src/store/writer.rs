//! Writer for new store files
//!
//! The writer lays out the whole file up front, then accepts matrix rows
//! at their positional offsets. The header only carries the `COMPLETE`
//! flag after [`StoreWriter::finish`], so an abandoned write leaves a file
//! that [`MatrixStore::open`](super::MatrixStore::open) refuses.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bdsm_core::{BdsmError, BdsmHeader, OrderBuilder};
use tracing::{debug, info};

use super::FileLayout;
use crate::attributes::{self, Attributes};
use crate::index::IdIndex;
use crate::Result;

/// Exclusive write handle for a store being built
pub struct StoreWriter {
    file: BufWriter<File>,
    layout: FileLayout,
    header: BdsmHeader,
    written: Vec<bool>,
    path: PathBuf,
}

impl StoreWriter {
    /// Create a store file for `ids` and write everything but the matrix
    ///
    /// Identifiers must be unique. Without `overwrite` an existing file at
    /// `path` is an error.
    pub fn create<P, S>(path: P, ids: &[S], attributes: &Attributes, overwrite: bool) -> Result<Self>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let path = path.as_ref();

        // Uniqueness is enforced here, at build time
        IdIndex::from_ids(ids)?;

        let mut order = OrderBuilder::new();
        for id in ids {
            order.push(id.as_ref())?;
        }
        let order = order.build();
        let attributes = attributes::encode(attributes)?;

        let n = ids.len();
        let layout = FileLayout::calculate(n, attributes.len(), order.len())?;
        let header = layout.header(n);

        let mut options = OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        let file = options.open(path)?;
        file.set_len(layout.total_len())?;

        let mut file = BufWriter::new(file);
        file.write_all(&header.to_bytes())?;
        file.seek(SeekFrom::Start(layout.attributes_offset))?;
        file.write_all(&attributes)?;
        file.seek(SeekFrom::Start(layout.order_offset))?;
        file.write_all(&order)?;

        info!(path = %path.display(), n, "creating matrix store");

        Ok(Self {
            file,
            layout,
            header,
            written: vec![false; n],
            path: path.to_path_buf(),
        })
    }

    /// Number of identifiers the store was created for
    pub fn dimension(&self) -> usize {
        self.written.len()
    }

    /// Write one whole matrix row at its positional offset
    pub fn write_row(&mut self, row: usize, values: &[f64]) -> Result<()> {
        let n = self.dimension();
        if row >= n || values.len() != n {
            return Err(BdsmError::IndexOutOfBounds.into());
        }

        let mut bytes = Vec::with_capacity(values.len() * 8);
        for value in values {
            bytes.extend_from_slice(&value.to_le_bytes());
        }

        self.file.seek(SeekFrom::Start(self.layout.row_offset(row)))?;
        self.file.write_all(&bytes)?;
        self.written[row] = true;
        Ok(())
    }

    /// Mark the store complete and flush it to disk
    ///
    /// Fails with `IncompleteStore` if any row was never written.
    pub fn finish(mut self) -> Result<()> {
        if let Some(missing) = self.written.iter().position(|&done| !done) {
            debug!(path = %self.path.display(), row = missing, "row never written");
            return Err(BdsmError::IncompleteStore.into());
        }

        self.header.set_complete();
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(&self.header.to_bytes())?;
        self.file.flush()?;
        self.file.get_ref().sync_all()?;

        info!(
            path = %self.path.display(),
            n = self.dimension(),
            "finished matrix store"
        );
        Ok(())
    }
}
