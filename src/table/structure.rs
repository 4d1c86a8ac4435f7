//! Structural changes: renaming, deleting, positional slicing

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::debug;

use super::Table;
use crate::error::{Error, Result};
use crate::index::LabelIndex;
use crate::model::Label;
use crate::selector::{self, Selector};

impl Table {
    /// Rename columns in place; every key must be a current column.
    ///
    /// Nothing is renamed unless the whole mapping applies.
    pub fn rename_columns(&mut self, mapping: IndexMap<Label, Label>) -> Result<()> {
        self.columns.rename(&mapping)
    }

    /// Replace every column label; the count must not change
    pub fn set_columns(&mut self, columns: Vec<Label>) -> Result<()> {
        self.columns.replace(columns)?;
        debug!(columns = self.columns.len(), "Replaced column labels");
        Ok(())
    }

    /// Replace every row label; the count must not change
    pub fn set_index(&mut self, index: Vec<Label>) -> Result<()> {
        self.index.replace(index)?;
        debug!(rows = self.index.len(), "Replaced index labels");
        Ok(())
    }

    /// Delete rows chosen by label, labels or mask
    pub fn delete_rows(&mut self, rows: impl Into<Selector>) -> Result<()> {
        let positions = deletable(&self.index, &rows.into())?;
        self.index.remove_positions(&positions);
        self.store.remove_rows(&positions);
        debug_assert!(self.check_invariants());
        Ok(())
    }

    /// Delete columns chosen by label, labels or mask.
    ///
    /// Deleting the last column also clears the index, leaving an empty table.
    pub fn delete_columns(&mut self, columns: impl Into<Selector>) -> Result<()> {
        let positions = deletable(&self.columns, &columns.into())?;
        self.columns.remove_positions(&positions);
        self.store.remove_columns(&positions);
        if self.columns.is_empty() {
            debug!(rows = self.index.len(), "No columns left, clearing index");
            self.index.clear();
            self.store.clear();
        }
        debug_assert!(self.check_invariants());
        Ok(())
    }

    /// The first `n` rows by position
    pub fn head(&self, n: usize) -> Table {
        let take = n.min(self.index.len());
        self.row_range(0, take)
    }

    /// The last `n` rows by position
    pub fn tail(&self, n: usize) -> Table {
        let take = n.min(self.index.len());
        self.row_range(self.index.len() - take, take)
    }

    fn row_range(&self, start: usize, len: usize) -> Table {
        let rows: Vec<usize> = (start..start + len).collect();
        let columns: Vec<usize> = (0..self.columns.len()).collect();
        Table::from_parts(
            self.columns.clone(),
            self.index.slice(start, len),
            self.index_name.clone(),
            self.store.select(&columns, &rows),
        )
    }
}

fn deletable(index: &LabelIndex, selector: &Selector) -> Result<FxHashSet<usize>> {
    match selector {
        Selector::All => Err(Error::MissingSelector),
        Selector::Slice { .. } => Err(Error::InvalidSelector(
            "deletion takes a label, a list of labels or a boolean mask",
        )),
        other => Ok(selector::resolve(index, other)?.into_iter().collect()),
    }
}
