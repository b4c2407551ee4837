//! Boolean retention masks over matrix order

use crate::index::IdIndex;
use crate::{Error, Result};

/// Retained targets of an accessor plus its physical read axis
///
/// The mask is always expressed in matrix order, whatever order the
/// caller listed the identifiers in, and the retained offsets follow the
/// same order. That order fixes the target order of every query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedView {
    mask: Vec<bool>,
    retained: Vec<usize>,
    transposed: bool,
}

impl MaskedView {
    /// Build a view over `index`
    ///
    /// `None` retains every identifier. A supplied mask must only name
    /// known identifiers, otherwise `InvalidMask` names the first unknown
    /// one. Repeated identifiers are allowed and retained once.
    pub fn construct(index: &IdIndex, mask: Option<&[&str]>, transposed: bool) -> Result<Self> {
        let mask = match mask {
            None => vec![true; index.len()],
            Some(ids) => {
                let mut mask = vec![false; index.len()];
                for &id in ids {
                    let offset = index
                        .get(id)
                        .map_err(|_| Error::InvalidMask { id: id.to_owned() })?;
                    mask[offset] = true;
                }
                mask
            }
        };

        let retained = mask
            .iter()
            .enumerate()
            .filter(|(_, &keep)| keep)
            .map(|(offset, _)| offset)
            .collect();

        Ok(Self {
            mask,
            retained,
            transposed,
        })
    }

    /// Same mask, opposite read axis
    pub fn transpose(&self) -> Self {
        Self {
            transposed: !self.transposed,
            ..self.clone()
        }
    }

    /// Boolean mask in matrix order
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Offsets of retained identifiers in matrix order
    pub fn retained(&self) -> &[usize] {
        &self.retained
    }

    /// Retained identifiers in matrix order
    pub fn masked_ids<'a>(&'a self, index: &'a IdIndex) -> impl Iterator<Item = &'a str> + 'a {
        self.retained
            .iter()
            .filter_map(move |&offset| index.identifier(offset))
    }

    /// Whether reads go down columns instead of along rows
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// Number of retained identifiers
    pub fn len(&self) -> usize {
        self.retained.len()
    }

    /// Whether nothing is retained
    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> IdIndex {
        IdIndex::from_ids(["a", "b", "c", "d", "e"]).unwrap()
    }

    #[test]
    fn test_identity_mask() {
        let index = index();
        let view = MaskedView::construct(&index, None, false).unwrap();

        assert_eq!(view.mask(), [true; 5]);
        assert_eq!(view.masked_ids(&index).collect::<Vec<_>>(), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_mask_is_in_matrix_order() {
        let index = index();
        let view = MaskedView::construct(&index, Some(&["c", "a", "e"]), false).unwrap();

        assert_eq!(view.mask(), [true, false, true, false, true]);
        assert_eq!(view.retained(), [0, 2, 4]);
        assert_eq!(view.masked_ids(&index).collect::<Vec<_>>(), ["a", "c", "e"]);
    }

    #[test]
    fn test_unknown_mask_id() {
        let result = MaskedView::construct(&index(), Some(&["c", "a", "X"]), false);
        assert!(matches!(result, Err(Error::InvalidMask { id }) if id == "X"));
    }

    #[test]
    fn test_repeated_and_empty_masks() {
        let index = index();

        let view = MaskedView::construct(&index, Some(&["d", "d"]), false).unwrap();
        assert_eq!(view.retained(), [3]);

        let view = MaskedView::construct(&index, Some(&[]), false).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn test_transpose_keeps_mask() {
        let view = MaskedView::construct(&index(), Some(&["b"]), false).unwrap();
        let flipped = view.transpose();

        assert!(flipped.is_transposed());
        assert_eq!(flipped.mask(), view.mask());
        assert!(!flipped.transpose().is_transposed());
    }
}
