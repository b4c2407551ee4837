//! Read contract for dense distance matrix stores

/// Read-only access to a square distance matrix in matrix order
///
/// This is the seam between the masked accessor and the physical store.
/// Implementations answer whole-row and whole-column reads, optionally
/// restricted by a boolean mask expressed in matrix order.
pub trait DistanceSource {
    /// Number of identifiers; the matrix is `dimension() x dimension()`
    fn dimension(&self) -> usize;

    /// Identifier at a matrix offset
    fn identifier(&self, offset: usize) -> Option<&str>;

    /// Append the values of `row` whose column is retained by `mask`
    ///
    /// Values are appended in matrix order. `mask` must have exactly
    /// `dimension()` entries.
    fn read_row<E: Extend<f64>>(&self, row: usize, mask: &[bool], out: &mut E)
        -> crate::Result<()>;

    /// Append the values of column `col` whose row is retained by `mask`
    ///
    /// Column reads stride across every row chunk and are the slow path.
    fn read_col<E: Extend<f64>>(&self, col: usize, mask: &[bool], out: &mut E)
        -> crate::Result<()>;
}
