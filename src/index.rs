//! Label index: bidirectional label ⇄ position mapping for one axis

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHashSet};
use tracing::debug;

use crate::error::{Axis, Error, Result};
use crate::model::Label;

/// Ordered, unique labels of one axis.
///
/// The position of a label is its insertion position; removing a label shifts
/// every later label down by one.
#[derive(Debug, Clone)]
pub struct LabelIndex {
    axis: Axis,
    labels: IndexSet<Label, FxBuildHasher>,
}

impl PartialEq for LabelIndex {
    fn eq(&self, other: &Self) -> bool {
        // IndexSet equality ignores order; axes must not
        self.labels.len() == other.labels.len() && self.labels.iter().eq(other.labels.iter())
    }
}

impl LabelIndex {
    /// Create an empty index for an axis
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            labels: IndexSet::default(),
        }
    }

    /// Create an index from labels, rejecting duplicates
    pub fn from_labels<I>(axis: Axis, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = Label>,
    {
        let mut index = Self::new(axis);
        for label in labels {
            index.append(label)?;
        }
        Ok(index)
    }

    /// Integer labels `0..len`
    pub fn range(axis: Axis, len: usize) -> Self {
        Self {
            axis,
            labels: (0..len).map(|i| Label::Int(i as i64)).collect(),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of a label, if present
    pub fn position_of(&self, label: &Label) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    /// Position of a label, or `NotFound`
    pub fn require(&self, label: &Label) -> Result<usize> {
        self.position_of(label).ok_or_else(|| Error::NotFound {
            axis: self.axis,
            label: label.clone(),
        })
    }

    pub fn contains(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// Label at a position
    pub fn label_at(&self, position: usize) -> Option<&Label> {
        self.labels.get_index(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Owned copy of the labels in order
    pub fn labels(&self) -> Vec<Label> {
        self.labels.iter().cloned().collect()
    }

    /// Append a label, returning its position
    pub fn append(&mut self, label: Label) -> Result<usize> {
        let (position, inserted) = self.labels.insert_full(label);
        if !inserted {
            let label = self.labels[position].clone();
            return Err(Error::DuplicateLabel {
                axis: self.axis,
                label,
            });
        }
        Ok(position)
    }

    /// Remove the labels at the given positions and close the gaps
    pub fn remove_positions(&mut self, positions: &FxHashSet<usize>) {
        if positions.is_empty() {
            return;
        }
        let before = self.labels.len();
        self.labels = std::mem::take(&mut self.labels)
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !positions.contains(i))
            .map(|(_, label)| label)
            .collect();
        debug!(axis = %self.axis, removed = before - self.labels.len(), "Removed labels");
    }

    /// Rename labels in place, all or nothing
    pub fn rename(&mut self, mapping: &IndexMap<Label, Label>) -> Result<()> {
        if let Some(missing) = mapping.keys().find(|old| !self.labels.contains(*old)) {
            return Err(match self.axis {
                Axis::Columns => Error::UnknownColumn(missing.clone()),
                Axis::Rows => Error::NotFound {
                    axis: self.axis,
                    label: missing.clone(),
                },
            });
        }

        let renamed = self
            .labels
            .iter()
            .map(|label| mapping.get(label).unwrap_or(label).clone());
        let renamed = Self::from_labels(self.axis, renamed)?;
        debug!(axis = %self.axis, renamed = mapping.len(), "Renamed labels");
        self.labels = renamed.labels;
        Ok(())
    }

    /// Replace every label at once; the length must stay the same
    pub fn replace(&mut self, labels: Vec<Label>) -> Result<()> {
        if labels.len() != self.labels.len() {
            return Err(Error::LengthMismatch {
                what: "replacement labels",
                expected: self.labels.len(),
                actual: labels.len(),
            });
        }
        *self = Self::from_labels(self.axis, labels)?;
        Ok(())
    }

    /// New index holding the labels at the given positions, in that order
    pub fn select(&self, positions: &[usize]) -> Result<Self> {
        Self::from_labels(
            self.axis,
            positions.iter().filter_map(|&p| self.label_at(p).cloned()),
        )
    }

    /// New index holding `len` labels starting at position `start`
    pub fn slice(&self, start: usize, len: usize) -> Self {
        Self {
            axis: self.axis,
            labels: self.labels.iter().skip(start).take(len).cloned().collect(),
        }
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::labels;

    fn index(items: &[&str]) -> LabelIndex {
        LabelIndex::from_labels(Axis::Rows, labels(items.iter().copied())).unwrap()
    }

    #[test]
    fn test_append_and_lookup() {
        let mut idx = LabelIndex::new(Axis::Columns);
        assert_eq!(idx.append(Label::from("a")).unwrap(), 0);
        assert_eq!(idx.append(Label::from(1)).unwrap(), 1);
        assert_eq!(idx.position_of(&Label::from(1)), Some(1));
        assert_eq!(idx.position_of(&Label::from("zz")), None);
        assert_eq!(idx.label_at(0), Some(&Label::from("a")));
    }

    #[test]
    fn test_append_duplicate_fails() {
        let mut idx = index(&["a", "b"]);
        let err = idx.append(Label::from("a")).unwrap_err();
        assert!(matches!(err, Error::DuplicateLabel { .. }));
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn test_require_reports_axis() {
        let idx = index(&["a"]);
        assert_eq!(
            idx.require(&Label::from("x")),
            Err(Error::NotFound {
                axis: Axis::Rows,
                label: Label::from("x")
            })
        );
    }

    #[test]
    fn test_remove_positions_shifts() {
        let mut idx = index(&["a", "b", "c", "d"]);
        idx.remove_positions(&[0, 2].into_iter().collect());
        assert_eq!(idx.labels(), labels(["b", "d"]));
        assert_eq!(idx.position_of(&Label::from("d")), Some(1));
    }

    #[test]
    fn test_rename_is_atomic() {
        let mut idx = LabelIndex::from_labels(Axis::Columns, labels(["a", "b"])).unwrap();
        let mut mapping = IndexMap::new();
        mapping.insert(Label::from("a"), Label::from("x"));
        mapping.insert(Label::from("bad"), Label::from("y"));
        assert_eq!(
            idx.rename(&mapping),
            Err(Error::UnknownColumn(Label::from("bad")))
        );
        assert_eq!(idx.labels(), labels(["a", "b"]));

        // collision with an untouched label
        let mut mapping = IndexMap::new();
        mapping.insert(Label::from("a"), Label::from("b"));
        assert!(matches!(
            idx.rename(&mapping),
            Err(Error::DuplicateLabel { .. })
        ));
        assert_eq!(idx.labels(), labels(["a", "b"]));

        // swapping is fine
        let mut mapping = IndexMap::new();
        mapping.insert(Label::from("a"), Label::from("b"));
        mapping.insert(Label::from("b"), Label::from("a"));
        idx.rename(&mapping).unwrap();
        assert_eq!(idx.labels(), labels(["b", "a"]));
    }

    #[test]
    fn test_equality_respects_order() {
        assert_ne!(index(&["a", "b"]), index(&["b", "a"]));
        assert_eq!(index(&["a", "b"]), index(&["a", "b"]));
    }

    #[test]
    fn test_select_rejects_repeats() {
        let idx = index(&["a", "b", "c"]);
        assert_eq!(idx.select(&[2, 0]).unwrap().labels(), labels(["c", "a"]));
        assert!(idx.select(&[1, 1]).is_err());
    }
}
