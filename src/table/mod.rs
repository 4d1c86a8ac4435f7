//! The table engine: labeled reads, writes and reshaping over a column store

mod display;
mod project;
mod structure;
mod write;

use indexmap::IndexMap;

use crate::builder::TableBuilder;
use crate::error::{Axis, Result};
use crate::index::LabelIndex;
use crate::model::{Label, Value};
use crate::selector::{self, Selector};
use crate::store::ColumnStore;

pub use write::Assign;

/// Name given to the index when none is supplied
pub const DEFAULT_INDEX_NAME: &str = "index";

/// Result of a read: one cell, or an independent sub-table
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Cell(Value),
    Table(Table),
}

impl Selection {
    pub fn into_cell(self) -> Option<Value> {
        match self {
            Selection::Cell(value) => Some(value),
            Selection::Table(_) => None,
        }
    }

    pub fn into_table(self) -> Option<Table> {
        match self {
            Selection::Table(table) => Some(table),
            Selection::Cell(_) => None,
        }
    }
}

/// A mutable two-dimensional table with labeled rows and columns.
///
/// Cells are stored column by column. Column labels and row labels are each
/// unique, and every column holds exactly one cell per row label.
#[derive(Debug, Clone)]
pub struct Table {
    columns: LabelIndex,
    index: LabelIndex,
    index_name: String,
    store: ColumnStore,
}

/// Column labels in order, row labels in order, and cells. The index name is
/// presentation only and does not take part.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns && self.index == other.index && self.store == other.store
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            columns: LabelIndex::new(Axis::Columns),
            index: LabelIndex::new(Axis::Rows),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            store: ColumnStore::new(),
        }
    }

    /// Create a table with the given columns and no rows
    pub fn with_columns<I, L>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        TableBuilder::new().with_columns(columns).build()
    }

    /// Create a table from a label → values mapping.
    ///
    /// Columns follow the mapping's order, shorter columns are padded with
    /// missing cells and the index is `0..rows`.
    pub fn from_mapping(data: IndexMap<Label, Vec<Value>>) -> Result<Self> {
        TableBuilder::new().with_data(data).build()
    }

    pub(crate) fn from_parts(
        columns: LabelIndex,
        index: LabelIndex,
        index_name: String,
        store: ColumnStore,
    ) -> Self {
        let table = Self {
            columns,
            index,
            index_name,
            store,
        };
        debug_assert!(table.check_invariants());
        table
    }

    /// Column labels, in order
    pub fn columns(&self) -> Vec<Label> {
        self.columns.labels()
    }

    /// Row labels, in order
    pub fn index(&self) -> Vec<Label> {
        self.index.labels()
    }

    /// Deep copy of the cells, one inner vector per column
    pub fn data(&self) -> Vec<Vec<Value>> {
        self.store.to_columns()
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn set_index_name(&mut self, name: impl Into<String>) {
        self.index_name = name.into();
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows and no columns
    pub fn is_empty(&self) -> bool {
        self.index.is_empty() && self.columns.is_empty()
    }

    pub fn column_position(&self, label: &Label) -> Option<usize> {
        self.columns.position_of(label)
    }

    pub fn row_position(&self, label: &Label) -> Option<usize> {
        self.index.position_of(label)
    }

    /// Check that labels and storage agree in shape
    pub fn check_invariants(&self) -> bool {
        self.store.column_count() == self.columns.len()
            && self.store.row_count() == self.index.len()
            && (0..self.store.column_count())
                .all(|c| self.store.column(c).map(<[Value]>::len) == Some(self.index.len()))
    }

    /// Read by row and column selectors.
    ///
    /// A single row label with a single column label yields the cell; any
    /// other combination yields a copied sub-table with the resolved labels
    /// in resolved order.
    pub fn get(
        &self,
        rows: impl Into<Selector>,
        columns: impl Into<Selector>,
    ) -> Result<Selection> {
        let rows = rows.into();
        let columns = columns.into();
        if let (Selector::Label(row), Selector::Label(column)) = (&rows, &columns) {
            return self.get_cell(row, column).map(Selection::Cell);
        }
        let row_positions = selector::resolve(&self.index, &rows)?;
        let column_positions = selector::resolve(&self.columns, &columns)?;
        self.take(&row_positions, &column_positions)
            .map(Selection::Table)
    }

    /// Copy of one cell
    pub fn get_cell(&self, row: &Label, column: &Label) -> Result<Value> {
        let r = self.index.require(row)?;
        let c = self.columns.require(column)?;
        Ok(self.store.get(c, r).cloned().unwrap_or_default())
    }

    /// Sub-table of the selected rows, all columns
    pub fn get_rows(&self, rows: impl Into<Selector>) -> Result<Table> {
        let rows = selector::resolve(&self.index, &rows.into())?;
        let columns: Vec<usize> = (0..self.columns.len()).collect();
        self.take(&rows, &columns)
    }

    /// Sub-table of the selected columns, all rows
    pub fn get_columns(&self, columns: impl Into<Selector>) -> Result<Table> {
        let columns = selector::resolve(&self.columns, &columns.into())?;
        let rows: Vec<usize> = (0..self.index.len()).collect();
        self.take(&rows, &columns)
    }

    /// Copy of one column's values
    pub fn column_values(&self, column: &Label) -> Result<Vec<Value>> {
        let c = self.columns.require(column)?;
        Ok(self.store.column(c).map(<[Value]>::to_vec).unwrap_or_default())
    }

    fn take(&self, rows: &[usize], columns: &[usize]) -> Result<Table> {
        Ok(Table::from_parts(
            self.columns.select(columns)?,
            self.index.select(rows)?,
            self.index_name.clone(),
            self.store.select(columns, rows),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::labels;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&v| Value::Int(v)).collect()
    }

    fn sample() -> Table {
        let mut data: IndexMap<Label, Vec<Value>> = IndexMap::new();
        data.insert(Label::from("a"), ints(&[1, 2, 3, 4]));
        data.insert(Label::from("b"), ints(&[4, 5, 6, 7]));
        data.insert(
            Label::from("c"),
            vec![Value::Int(7), Value::Int(8), Value::Int(9), Value::Missing],
        );
        TableBuilder::new()
            .with_data(data)
            .with_index(labels([10, 11, 12, 99]))
            .build()
            .unwrap()
    }

    fn column_table(label: &str, values: Vec<Value>, index: Vec<Label>) -> Table {
        TableBuilder::new()
            .with_column(label, values)
            .with_index(index)
            .build()
            .unwrap()
    }

    #[test]
    fn test_get_cell() {
        let table = sample();
        assert_eq!(table.get(10, "a").unwrap(), Selection::Cell(Value::Int(1)));
        assert_eq!(
            table.get_cell(&Label::from(99), &Label::from("c")).unwrap(),
            Value::Missing
        );
    }

    #[test]
    fn test_get_cell_not_found() {
        let table = sample();
        assert!(matches!(
            table.get(13, "a"),
            Err(Error::NotFound { axis: Axis::Rows, .. })
        ));
        assert!(matches!(
            table.get(10, "z"),
            Err(Error::NotFound { axis: Axis::Columns, .. })
        ));
    }

    #[test]
    fn test_get_rows_by_labels_and_mask() {
        let table = sample();
        let expected = column_table("c", ints(&[8, 9]), labels([11, 12]));

        let by_labels = table.get(Selector::labels([11, 12]), "c").unwrap();
        assert_eq!(by_labels, Selection::Table(expected.clone()));

        let by_mask = table
            .get(Selector::mask([false, true, true, false]), "c")
            .unwrap();
        assert_eq!(by_mask, Selection::Table(expected));
    }

    #[test]
    fn test_get_columns_of_one_row() {
        let table = sample();
        let mut data: IndexMap<Label, Vec<Value>> = IndexMap::new();
        data.insert(Label::from("a"), vec![Value::Int(4)]);
        data.insert(Label::from("c"), vec![Value::Missing]);
        let expected = TableBuilder::new()
            .with_data(data)
            .with_index(labels([99]))
            .build()
            .unwrap();

        let actual = table.get(99, Selector::labels(["a", "c"])).unwrap();
        assert_eq!(actual.into_table(), Some(expected.clone()));

        let actual = table.get(99, Selector::mask([true, false, true])).unwrap();
        assert_eq!(actual.into_table(), Some(expected));
    }

    #[test]
    fn test_get_masks_on_both_axes() {
        let table = TableBuilder::new()
            .with_column("a", ints(&[1, 2, 3]))
            .with_column("b", ints(&[4, 5, 6]))
            .with_column("c", ints(&[7, 8, 9]))
            .with_column("d", ints(&[10, 11, 12]))
            .build()
            .unwrap();

        let actual = table
            .get(
                Selector::mask([true, false, true]),
                Selector::mask([false, true, false, true]),
            )
            .unwrap()
            .into_table()
            .unwrap();
        assert_eq!(actual.index(), labels([0, 2]));
        assert_eq!(actual.columns(), labels(["b", "d"]));
        assert_eq!(actual.data(), vec![ints(&[4, 6]), ints(&[10, 12])]);
    }

    #[test]
    fn test_equality_ignores_index_name() {
        let table = sample();
        let mut renamed = table.clone();
        renamed.set_index_name("when");
        assert_eq!(renamed, table);
    }

    #[test]
    fn test_get_everything_is_a_copy() {
        let table = sample();
        let everything = table.get(Selector::All, Selector::All).unwrap();
        assert_eq!(everything.into_table(), Some(table));
    }

    #[test]
    fn test_get_slice() {
        let table = sample();
        let slice = table.get(11..=12, Selector::labels(["b", "a"])).unwrap();
        let slice = slice.into_table().unwrap();
        assert_eq!(slice.index(), labels([11, 12]));
        assert_eq!(slice.columns(), labels(["b", "a"]));
        assert_eq!(slice.data(), vec![ints(&[5, 6]), ints(&[2, 3])]);
    }

    #[test]
    fn test_get_repeated_labels_rejected() {
        let table = sample();
        assert!(matches!(
            table.get(Selector::labels([10, 10]), "a"),
            Err(Error::DuplicateLabel { .. })
        ));
    }

    #[test]
    fn test_accessors_copy_out() {
        let table = sample();
        let mut columns = table.columns();
        columns.push(Label::from("bad"));
        let mut data = table.data();
        data[0][0] = Value::Int(99);
        assert_eq!(table.columns(), labels(["a", "b", "c"]));
        assert_eq!(table.get_cell(&Label::from(10), &Label::from("a")).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_shape() {
        let table = sample();
        assert_eq!(table.shape(), (4, 3));
        assert!(table.check_invariants());
        assert!(Table::new().is_empty());
        assert_eq!(table.index_name(), DEFAULT_INDEX_NAME);
    }
}
