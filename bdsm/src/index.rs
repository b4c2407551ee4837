//! Identifier to matrix offset mapping

use bdsm_core::{BdsmError, DistanceSource};
use hashbrown::HashMap;

use crate::{Error, Result};

/// Bidirectional identifier ⇄ offset index, built once per accessor
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    offsets: HashMap<String, usize>,
    ids: Vec<String>,
}

impl IdIndex {
    /// Build the index from a store's order
    pub fn build<S: DistanceSource>(source: &S) -> Result<Self> {
        let ids = (0..source.dimension())
            .map(|offset| source.identifier(offset).ok_or(BdsmError::IndexOutOfBounds))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::from_ids(ids)
    }

    /// Build the index from identifiers in matrix order
    ///
    /// Fails with `DuplicateIdentifier` on the first repeated identifier.
    pub fn from_ids<I>(ids: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut index = Self::default();
        for id in ids {
            let id = id.as_ref();
            let offset = index.ids.len();
            if index.offsets.insert(id.to_owned(), offset).is_some() {
                return Err(Error::DuplicateIdentifier(id.to_owned()));
            }
            index.ids.push(id.to_owned());
        }
        Ok(index)
    }

    /// Offset of `id`, or `UnknownIdentifier`
    pub fn get(&self, id: &str) -> Result<usize> {
        self.offsets
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownIdentifier(id.to_owned()))
    }

    /// Whether `id` is present
    pub fn contains(&self, id: &str) -> bool {
        self.offsets.contains_key(id)
    }

    /// Identifier at `offset`
    pub fn identifier(&self, offset: usize) -> Option<&str> {
        self.ids.get(offset).map(String::as_str)
    }

    /// All identifiers in matrix order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of identifiers
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_and_inverse() {
        let index = IdIndex::from_ids(["a", "b", "c", "d", "e"]).unwrap();

        assert_eq!(index.len(), 5);
        for (offset, id) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            assert_eq!(index.get(id).unwrap(), offset);
            assert_eq!(index.identifier(offset), Some(*id));
        }
        assert_eq!(index.identifier(5), None);
    }

    #[test]
    fn test_unknown_identifier() {
        let index = IdIndex::from_ids(["a", "b"]).unwrap();
        assert!(!index.contains("X"));
        assert!(matches!(index.get("X"), Err(Error::UnknownIdentifier(id)) if id == "X"));
    }

    #[test]
    fn test_duplicates_rejected() {
        let result = IdIndex::from_ids(vec!["a".to_string(), "b".to_string(), "b".to_string()]);
        assert!(matches!(result, Err(Error::DuplicateIdentifier(id)) if id == "b"));
    }
}
