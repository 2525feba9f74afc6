//! # Caret Mapping
//!
//! The editing surface is a tree: text nodes nested inside whatever elements the
//! browser (or the person typing) decided to create. Persisting "where the caret
//! was" as a tree path would break the moment the tree reshapes, so hashpad
//! persists a single number instead: the count of characters preceding the caret
//! in the flattened text.
//!
//! ## Text Position Index
//!
//! Mapping is done against a [`TextIndex`], the ordered list of textual leaf
//! lengths in document order. Nothing here knows about trees, DOM nodes or
//! rendering; any representation that can enumerate its text runs in order (a
//! rope, a vector of lines, an immutable tree) can be mapped.
//!
//! ```text
//! leaves:   ["He", "llo\n", "", "world"]
//! lengths:  [  2,      4,    0,      5 ]
//! offset 4 ─▶ leaf 1, local 2       ("He" + "ll")
//! offset 6 ─▶ leaf 1, local 4       (end of "llo\n"; first leaf reaching 6)
//! offset 99 ─▶ leaf 3, local 5      (clamped to the end)
//! ```
//!
//! ## Laws
//!
//! - `capture(restore(o)) == o` for every `o` in `[0, len]`.
//! - `capture(restore(o)) == len` for every `o > len`.
//! - No selection, or a selection outside the surface, captures as `0`.
//! - A surface without any textual leaf restores to the surface start.
//!
//! Lengths and offsets count Unicode scalar values (`char`s).

use crate::error::SelectionError;
use crate::surface::EditableSurface;
use serde::{Deserialize, Serialize};

/// A point inside one textual leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafPoint {
    /// Ordinal of the leaf in document order.
    pub leaf: usize,
    /// Character offset inside that leaf.
    pub offset: usize,
}

impl LeafPoint {
    pub fn new(leaf: usize, offset: usize) -> Self {
        Self { leaf, offset }
    }
}

/// Where a collapsed selection sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaretTarget {
    Leaf(LeafPoint),
    /// Start of a surface that has no textual leaves.
    SurfaceStart,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextIndex {
    lengths: Vec<usize>,
    total: usize,
}

impl TextIndex {
    pub fn new(lengths: Vec<usize>) -> Self {
        let total = lengths.iter().sum();
        Self { lengths, total }
    }

    pub fn from_leaves<I, S>(leaves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            leaves
                .into_iter()
                .map(|leaf| leaf.as_ref().chars().count())
                .collect(),
        )
    }

    /// Total number of characters across all leaves.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn leaf_count(&self) -> usize {
        self.lengths.len()
    }

    /// Map a flat offset onto a leaf position.
    pub fn locate(&self, offset: usize) -> CaretTarget {
        let Some(last) = self.lengths.len().checked_sub(1) else {
            return CaretTarget::SurfaceStart;
        };

        let mut running = 0;
        for (leaf, &len) in self.lengths.iter().enumerate() {
            if running + len >= offset {
                return CaretTarget::Leaf(LeafPoint::new(leaf, offset - running));
            }
            running += len;
        }

        CaretTarget::Leaf(LeafPoint::new(last, self.lengths[last]))
    }

    /// Map a caret back onto a flat offset.
    ///
    /// Local offsets past the end of their leaf are clamped to it.
    pub fn offset_of(&self, target: CaretTarget) -> Result<usize, SelectionError> {
        match target {
            CaretTarget::SurfaceStart => Ok(0),
            CaretTarget::Leaf(point) => {
                let len = *self
                    .lengths
                    .get(point.leaf)
                    .ok_or(SelectionError::OutsideSurface)?;
                let preceding: usize = self.lengths[..point.leaf].iter().sum();
                Ok(preceding + point.offset.min(len))
            }
        }
    }
}

/// Characters preceding the caret, or the reason there is none.
pub fn try_capture_offset<S>(surface: &S) -> Result<usize, SelectionError>
where
    S: EditableSurface + ?Sized,
{
    let target = surface.caret()?;
    surface.text_index().offset_of(target)
}

/// Characters preceding the caret; `0` when the selection is missing or elsewhere.
pub fn capture_offset<S>(surface: &S) -> usize
where
    S: EditableSurface + ?Sized,
{
    match try_capture_offset(surface) {
        Ok(offset) => offset,
        Err(e) => {
            tracing::debug!("caret capture fell back to 0: {}", e);
            0
        }
    }
}

/// Place the caret `offset` characters into the surface's text.
pub fn restore_offset<S>(surface: &mut S, offset: usize)
where
    S: EditableSurface + ?Sized,
{
    let target = surface.text_index().locate(offset);
    surface.place_caret(target);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_examples() {
        let index = TextIndex::from_leaves(["He", "llo\n", "", "world"]);
        assert_eq!(index.len(), 11);
        assert_eq!(index.locate(0), CaretTarget::Leaf(LeafPoint::new(0, 0)));
        assert_eq!(index.locate(2), CaretTarget::Leaf(LeafPoint::new(0, 2)));
        assert_eq!(index.locate(4), CaretTarget::Leaf(LeafPoint::new(1, 2)));
        assert_eq!(index.locate(6), CaretTarget::Leaf(LeafPoint::new(1, 4)));
        assert_eq!(index.locate(7), CaretTarget::Leaf(LeafPoint::new(3, 1)));
        assert_eq!(index.locate(11), CaretTarget::Leaf(LeafPoint::new(3, 5)));
        assert_eq!(index.locate(99), CaretTarget::Leaf(LeafPoint::new(3, 5)));
    }

    #[test]
    fn test_locate_without_leaves() {
        let index = TextIndex::default();
        assert_eq!(index.locate(0), CaretTarget::SurfaceStart);
        assert_eq!(index.locate(5), CaretTarget::SurfaceStart);
        assert_eq!(index.offset_of(CaretTarget::SurfaceStart), Ok(0));
    }

    #[test]
    fn test_only_empty_leaves() {
        let index = TextIndex::from_leaves(["", ""]);
        assert_eq!(index.locate(0), CaretTarget::Leaf(LeafPoint::new(0, 0)));
        assert_eq!(index.locate(3), CaretTarget::Leaf(LeafPoint::new(1, 0)));
    }

    #[test]
    fn test_round_trip_every_offset() {
        let index = TextIndex::from_leaves(["", "ab", "", "cde", "f", "", "ghij"]);
        for offset in 0..=index.len() {
            let target = index.locate(offset);
            assert_eq!(index.offset_of(target), Ok(offset), "offset {offset}");
        }
        for offset in index.len()..index.len() + 5 {
            assert_eq!(index.offset_of(index.locate(offset)), Ok(index.len()));
        }
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let index = TextIndex::from_leaves(["héllo", "🎉!"]);
        assert_eq!(index.len(), 7);
        assert_eq!(index.locate(6), CaretTarget::Leaf(LeafPoint::new(1, 1)));
    }

    #[test]
    fn test_offset_of_clamps_local_offset() {
        let index = TextIndex::from_leaves(["abc", "de"]);
        assert_eq!(
            index.offset_of(CaretTarget::Leaf(LeafPoint::new(0, 10))),
            Ok(3)
        );
    }

    #[test]
    fn test_offset_of_unknown_leaf() {
        let index = TextIndex::from_leaves(["abc"]);
        assert_eq!(
            index.offset_of(CaretTarget::Leaf(LeafPoint::new(4, 0))),
            Err(SelectionError::OutsideSurface)
        );
    }
}
