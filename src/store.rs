//! Column-major cell storage

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Value;

/// The rectangular grid of a table, stored column by column.
///
/// Every column always holds exactly `row_count` cells. The row count is kept
/// separately so a store without columns still knows its height.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnStore {
    columns: Vec<Vec<Value>>,
    row_count: usize,
}

impl ColumnStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with `column_count` columns of `row_count` missing cells
    pub fn missing(column_count: usize, row_count: usize) -> Self {
        Self {
            columns: vec![vec![Value::Missing; row_count]; column_count],
            row_count,
        }
    }

    /// Build from columns of possibly uneven length, right-padding with missing
    pub fn from_columns(mut columns: Vec<Vec<Value>>) -> Self {
        let row_count = columns.iter().map(Vec::len).max().unwrap_or(0);
        for column in &mut columns {
            column.resize(row_count, Value::Missing);
        }
        Self { columns, row_count }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Value> {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    /// Set one cell; positions out of range are ignored
    pub fn set(&mut self, column: usize, row: usize, value: Value) {
        if let Some(cell) = self.columns.get_mut(column).and_then(|c| c.get_mut(row)) {
            *cell = value;
        }
    }

    pub fn column(&self, position: usize) -> Option<&[Value]> {
        self.columns.get(position).map(Vec::as_slice)
    }

    /// Deep copy of every column
    pub fn to_columns(&self) -> Vec<Vec<Value>> {
        self.columns.clone()
    }

    /// Append one missing cell to every column
    pub fn append_row(&mut self) {
        for column in &mut self.columns {
            column.push(Value::Missing);
        }
        self.row_count += 1;
    }

    /// Append a column of `row_count` cells, each set to `fill`
    pub fn append_column(&mut self, fill: Value) {
        self.columns.push(vec![fill; self.row_count]);
    }

    /// Replace a column's cells.
    ///
    /// Fewer values than rows is an error. More values than rows grows every
    /// other column with missing cells so all columns keep the same length.
    pub fn replace_column(&mut self, position: usize, values: Vec<Value>) -> Result<()> {
        if values.len() < self.row_count {
            return Err(Error::LengthMismatch {
                what: "column values",
                expected: self.row_count,
                actual: values.len(),
            });
        }
        if position >= self.columns.len() {
            return Err(Error::ShapeError(format!(
                "column position {} out of range for {} columns",
                position,
                self.columns.len()
            )));
        }
        if values.len() > self.row_count {
            debug!(from = self.row_count, to = values.len(), "Growing store");
            self.row_count = values.len();
            for column in &mut self.columns {
                column.resize(self.row_count, Value::Missing);
            }
        }
        self.columns[position] = values;
        Ok(())
    }

    /// Remove rows by position from every column
    pub fn remove_rows(&mut self, positions: &FxHashSet<usize>) {
        if positions.is_empty() {
            return;
        }
        for column in &mut self.columns {
            let mut row = 0;
            column.retain(|_| {
                let keep = !positions.contains(&row);
                row += 1;
                keep
            });
        }
        let removed = positions.iter().filter(|&&p| p < self.row_count).count();
        self.row_count -= removed;
    }

    /// Remove columns by position
    pub fn remove_columns(&mut self, positions: &FxHashSet<usize>) {
        let mut column = 0;
        self.columns.retain(|_| {
            let keep = !positions.contains(&column);
            column += 1;
            keep
        });
    }

    /// New store with the cells at the given column and row positions
    pub fn select(&self, columns: &[usize], rows: &[usize]) -> Self {
        let columns = columns
            .iter()
            .filter_map(|&c| self.columns.get(c))
            .map(|column| {
                rows.iter()
                    .filter_map(|&r| column.get(r).cloned())
                    .collect::<Vec<_>>()
            })
            .collect();
        Self {
            columns,
            row_count: rows.iter().filter(|&&r| r < self.row_count).count(),
        }
    }

    /// Drop every column and row
    pub fn clear(&mut self) {
        self.columns.clear();
        self.row_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&v| Value::Int(v)).collect()
    }

    #[test]
    fn test_from_columns_pads() {
        let store = ColumnStore::from_columns(vec![ints(&[]), ints(&[1]), ints(&[1, 2])]);
        assert_eq!(store.row_count(), 2);
        assert_eq!(store.column(0), Some(&[Value::Missing, Value::Missing][..]));
        assert_eq!(store.column(1), Some(&[Value::Int(1), Value::Missing][..]));
    }

    #[test]
    fn test_append_row_and_column() {
        let mut store = ColumnStore::from_columns(vec![ints(&[1, 2])]);
        store.append_row();
        store.append_column(Value::Bool(true));
        assert_eq!(store.row_count(), 3);
        assert_eq!(store.column(0), Some(&[Value::Int(1), Value::Int(2), Value::Missing][..]));
        assert_eq!(store.column(1), Some(&[const { Value::Bool(true) }; 3][..]));
    }

    #[test]
    fn test_replace_column_grows_all_columns() {
        let mut store = ColumnStore::from_columns(vec![ints(&[1, 2]), ints(&[3, 4])]);
        store.replace_column(1, ints(&[5, 6, 7])).unwrap();
        assert_eq!(store.row_count(), 3);
        assert_eq!(store.column(0), Some(&[Value::Int(1), Value::Int(2), Value::Missing][..]));
        assert_eq!(store.column(1), Some(&ints(&[5, 6, 7])[..]));
    }

    #[test]
    fn test_replace_column_too_short() {
        let mut store = ColumnStore::from_columns(vec![ints(&[1, 2])]);
        let err = store.replace_column(0, ints(&[9])).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 2, actual: 1, .. }));
        assert_eq!(store.column(0), Some(&ints(&[1, 2])[..]));
    }

    #[test]
    fn test_remove_rows_and_columns() {
        let mut store =
            ColumnStore::from_columns(vec![ints(&[1, 2, 3]), ints(&[4, 5, 6]), ints(&[7, 8, 9])]);
        store.remove_rows(&[0, 2].into_iter().collect());
        assert_eq!(store.row_count(), 1);
        store.remove_columns(&[1].into_iter().collect());
        assert_eq!(store.to_columns(), vec![ints(&[2]), ints(&[8])]);
    }

    #[test]
    fn test_store_without_columns_keeps_height() {
        let mut store = ColumnStore::new();
        store.append_row();
        store.append_row();
        store.append_column(Value::Missing);
        assert_eq!(store.column(0).map(<[Value]>::len), Some(2));
    }
}
