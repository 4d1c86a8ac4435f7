//! Selectors and their resolution against an axis

use std::ops::RangeInclusive;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::error::{Error, Result};
use crate::index::LabelIndex;
use crate::model::Label;

/// What part of one axis an operation addresses.
///
/// The variant is chosen by the caller, so a list of boolean labels is never
/// mistaken for a mask and vice versa.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selector {
    /// Every label, in axis order
    #[default]
    All,
    /// Exactly one label
    Label(Label),
    /// Labels in caller order; may reorder or repeat
    Labels(Vec<Label>),
    /// One flag per position; must match the axis length
    Mask(Vec<bool>),
    /// Every label from `start` through `end`, both inclusive
    Slice { start: Label, end: Label },
}

impl Selector {
    pub fn label(label: impl Into<Label>) -> Self {
        Selector::Label(label.into())
    }

    pub fn labels<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        Selector::Labels(labels.into_iter().map(Into::into).collect())
    }

    pub fn mask(mask: impl IntoIterator<Item = bool>) -> Self {
        Selector::Mask(mask.into_iter().collect())
    }

    pub fn slice(start: impl Into<Label>, end: impl Into<Label>) -> Self {
        Selector::Slice {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl From<Label> for Selector {
    fn from(label: Label) -> Self {
        Selector::Label(label)
    }
}

impl From<&str> for Selector {
    fn from(label: &str) -> Self {
        Selector::Label(label.into())
    }
}

impl From<i64> for Selector {
    fn from(label: i64) -> Self {
        Selector::Label(label.into())
    }
}

impl From<i32> for Selector {
    fn from(label: i32) -> Self {
        Selector::Label(label.into())
    }
}

impl From<Vec<Label>> for Selector {
    fn from(labels: Vec<Label>) -> Self {
        Selector::Labels(labels)
    }
}

impl<T: Into<Label>> From<RangeInclusive<T>> for Selector {
    fn from(range: RangeInclusive<T>) -> Self {
        let (start, end) = range.into_inner();
        Selector::slice(start, end)
    }
}

/// A write target on one axis: an existing position or a label to append
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Existing(usize),
    New(Label),
}

/// Resolve a selector for reading: every label must exist
pub fn resolve(index: &LabelIndex, selector: &Selector) -> Result<Vec<usize>> {
    let positions = match selector {
        Selector::All => (0..index.len()).collect(),
        Selector::Label(label) => vec![index.require(label)?],
        Selector::Labels(labels) => labels
            .iter()
            .map(|label| index.require(label))
            .collect::<Result<Vec<_>>>()?,
        Selector::Mask(mask) => resolve_mask(index, mask)?,
        Selector::Slice { start, end } => resolve_slice(index, start, end)?,
    };
    trace!(axis = %index.axis(), ?selector, count = positions.len(), "Resolved selector");
    Ok(positions)
}

/// Resolve a selector for writing: absent labels become append requests
pub fn resolve_for_write(index: &LabelIndex, selector: &Selector) -> Result<Vec<Target>> {
    let targets = match selector {
        Selector::Label(label) => vec![target(index, label)],
        Selector::Labels(labels) => labels.iter().map(|label| target(index, label)).collect(),
        other => resolve(index, other)?
            .into_iter()
            .map(Target::Existing)
            .collect(),
    };
    Ok(targets)
}

/// Labels the targets ask to append, once each in first-occurrence order
pub fn new_labels(targets: &[Target]) -> Vec<Label> {
    let mut seen = FxHashSet::default();
    targets
        .iter()
        .filter_map(|t| match t {
            Target::New(label) if seen.insert(label.clone()) => Some(label.clone()),
            _ => None,
        })
        .collect()
}

fn target(index: &LabelIndex, label: &Label) -> Target {
    match index.position_of(label) {
        Some(position) => Target::Existing(position),
        None => Target::New(label.clone()),
    }
}

fn resolve_mask(index: &LabelIndex, mask: &[bool]) -> Result<Vec<usize>> {
    if mask.len() != index.len() {
        return Err(Error::LengthMismatch {
            what: "boolean mask",
            expected: index.len(),
            actual: mask.len(),
        });
    }
    Ok(mask
        .iter()
        .enumerate()
        .filter(|&(_, &keep)| keep)
        .map(|(i, _)| i)
        .collect())
}

fn resolve_slice(index: &LabelIndex, start: &Label, end: &Label) -> Result<Vec<usize>> {
    let start = index.require(start)?;
    let end = index.require(end)?;
    Ok((start..=end).collect())
}
