//! Memory-mapped binary matrix store
//!
//! A store file holds a fixed header, the format-spec attributes, the
//! identifiers in matrix order and a dense row-chunked `f64` matrix. The
//! matrix is never copied: rows and columns are read straight out of the
//! mapping.

mod layout;
pub mod writer;

pub(crate) use layout::FileLayout;
pub use writer::StoreWriter;

use std::fs::File;
use std::path::{Path, PathBuf};

use bdsm_core::{
    validate_alignment, validate_array_bounds, validate_layout, validate_region, BdsmError,
    BdsmHeader, DistanceSource, OrderView,
};
use memmap2::{Mmap, MmapOptions};
use tracing::debug;

use crate::attributes::{self, Attributes};
use crate::Result;

#[cfg(target_endian = "big")]
compile_error!("bdsm stores are little-endian and are mapped without byte swapping");

/// Read-only handle to a finalized store file
///
/// The mapping is released when the store is dropped. Stores are
/// immutable after conversion, so a single handle can be shared between
/// accessors and threads.
pub struct MatrixStore {
    mmap: Mmap,
    header: BdsmHeader,
    attributes: Attributes,
    order: Vec<String>,
    path: PathBuf,
}

impl MatrixStore {
    /// Open and validate a store file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        // SAFETY: Read-only mapping of a store that is immutable once written
        let mmap = unsafe { MmapOptions::new().map(&file)? };

        if mmap.len() < BdsmHeader::SIZE {
            return Err(BdsmError::InsufficientBuffer.into());
        }

        let header = BdsmHeader::from_bytes(&mmap[..BdsmHeader::SIZE])?;
        if !header.is_complete() {
            return Err(BdsmError::IncompleteStore.into());
        }
        validate_layout(&header, mmap.len())?;

        let (attrs_offset, attrs_size) = header.attributes_region();
        let attrs_range = validate_region(attrs_offset, attrs_size, mmap.len())?;
        let attributes = attributes::decode(&mmap[attrs_range])?;

        let (order_offset, order_size) = header.order_region();
        let order_range = validate_region(order_offset, order_size, mmap.len())?;
        let view = OrderView::new(&mmap[order_range])?;
        if view.len() != header.n {
            return Err(BdsmError::CorruptedData.into());
        }
        let order = view
            .iter()
            .map(|id| id.map(str::to_owned))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let store = Self {
            mmap,
            header,
            attributes,
            order,
            path: path.to_path_buf(),
        };

        // Fail at open rather than on the first query
        store.matrix()?;

        debug!(
            path = %store.path.display(),
            n = store.order.len(),
            "opened matrix store"
        );
        Ok(store)
    }

    /// The decoded file header
    pub fn header(&self) -> &BdsmHeader {
        &self.header
    }

    /// Format-spec attributes written at creation
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Identifiers in matrix order
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Number of identifiers
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no identifiers
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Path the store was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One full, unmasked matrix row
    pub fn row(&self, row: usize) -> Result<&[f64]> {
        Ok(self.row_slice(row)?)
    }

    fn matrix(&self) -> std::result::Result<&[f64], BdsmError> {
        let (offset, size) = self.header.matrix_region();
        let range = validate_region(offset, size, self.mmap.len())?;
        let bytes = &self.mmap[range];

        validate_alignment::<f64>(bytes.as_ptr())?;
        let cells = validate_array_bounds::<f64>(bytes.len())?;
        if cells != self.len() * self.len() {
            return Err(BdsmError::CorruptedData);
        }

        bytemuck::try_cast_slice(bytes).map_err(|_| BdsmError::ArrayAlignment)
    }

    fn row_slice(&self, row: usize) -> std::result::Result<&[f64], BdsmError> {
        let n = self.len();
        if row >= n {
            return Err(BdsmError::IndexOutOfBounds);
        }
        let start = row * n;
        self.matrix()?
            .get(start..start + n)
            .ok_or(BdsmError::CorruptedData)
    }
}

impl DistanceSource for MatrixStore {
    fn dimension(&self) -> usize {
        self.len()
    }

    fn identifier(&self, offset: usize) -> Option<&str> {
        self.order.get(offset).map(String::as_str)
    }

    fn read_row<E: Extend<f64>>(
        &self,
        row: usize,
        mask: &[bool],
        out: &mut E,
    ) -> bdsm_core::Result<()> {
        if mask.len() != self.len() {
            return Err(BdsmError::IndexOutOfBounds);
        }
        let values = self.row_slice(row)?;
        out.extend(
            values
                .iter()
                .zip(mask)
                .filter(|(_, &keep)| keep)
                .map(|(&value, _)| value),
        );
        Ok(())
    }

    fn read_col<E: Extend<f64>>(
        &self,
        col: usize,
        mask: &[bool],
        out: &mut E,
    ) -> bdsm_core::Result<()> {
        let n = self.len();
        if col >= n || mask.len() != n {
            return Err(BdsmError::IndexOutOfBounds);
        }
        let matrix = self.matrix()?;
        out.extend(
            mask.iter()
                .enumerate()
                .filter(|(_, &keep)| keep)
                .map(|(row, _)| matrix[row * n + col]),
        );
        Ok(())
    }
}

impl std::fmt::Debug for MatrixStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixStore")
            .field("path", &self.path)
            .field("n", &self.order.len())
            .field("attributes", &self.attributes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::format_spec;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("fixture.bdsm");
        let mut writer = StoreWriter::create(&path, &["x", "y", "z"], &format_spec(), false).unwrap();
        writer.write_row(0, &[0.0, 1.0, 2.0]).unwrap();
        writer.write_row(1, &[3.0, 0.0, 4.0]).unwrap();
        writer.write_row(2, &[5.0, 6.0, 0.0]).unwrap();
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_open_reads_order_and_attributes() {
        let dir = TempDir::new().unwrap();
        let store = MatrixStore::open(write_fixture(&dir)).unwrap();

        assert_eq!(store.ids(), ["x", "y", "z"]);
        assert_eq!(store.attributes(), &format_spec());
        assert!(store.header().is_complete());
        assert_eq!(store.row(1).unwrap(), [3.0, 0.0, 4.0]);
    }

    #[test]
    fn test_masked_row_and_column_reads() {
        let dir = TempDir::new().unwrap();
        let store = MatrixStore::open(write_fixture(&dir)).unwrap();
        let mask = [true, false, true];

        let mut row = Vec::new();
        store.read_row(1, &mask, &mut row).unwrap();
        assert_eq!(row, [3.0, 4.0]);

        let mut col = Vec::new();
        store.read_col(1, &mask, &mut col).unwrap();
        assert_eq!(col, [1.0, 6.0]);
    }

    #[test]
    fn test_read_out_of_bounds() {
        let dir = TempDir::new().unwrap();
        let store = MatrixStore::open(write_fixture(&dir)).unwrap();
        let mut out = Vec::new();

        assert_eq!(
            store.read_row(3, &[true; 3], &mut out),
            Err(BdsmError::IndexOutOfBounds)
        );
        assert_eq!(
            store.read_col(0, &[true; 2], &mut out),
            Err(BdsmError::IndexOutOfBounds)
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_unfinished_store_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.bdsm");
        let mut writer = StoreWriter::create(&path, &["x", "y"], &format_spec(), false).unwrap();
        writer.write_row(0, &[0.0, 1.0]).unwrap();
        drop(writer);

        assert!(matches!(
            MatrixStore::open(&path),
            Err(crate::Error::Format(BdsmError::IncompleteStore))
        ));
    }

    #[test]
    fn test_truncated_store_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir);
        let len = std::fs::metadata(&path).unwrap().len();
        let file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_len(len - 8).unwrap();

        assert!(matches!(
            MatrixStore::open(&path),
            Err(crate::Error::Format(BdsmError::CorruptedData))
        ));
    }

    #[test]
    fn test_unsupported_data_type_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir);
        let mut bytes = std::fs::read(&path).unwrap();
        bytes[5] = 2;
        std::fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            MatrixStore::open(&path),
            Err(crate::Error::Format(BdsmError::UnsupportedFormat))
        ));
    }

    #[test]
    fn test_matrix_view_covers_every_cell() {
        let dir = TempDir::new().unwrap();
        let store = MatrixStore::open(write_fixture(&dir)).unwrap();
        let matrix = store.matrix().unwrap();

        assert_eq!(matrix.len(), 9);
        assert_eq!(matrix[5], 4.0);
    }

    #[test]
    fn test_not_a_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.bdsm");
        std::fs::write(&path, vec![7u8; 200]).unwrap();

        assert!(matches!(
            MatrixStore::open(&path),
            Err(crate::Error::Format(BdsmError::InvalidHeader))
        ));
    }
}
