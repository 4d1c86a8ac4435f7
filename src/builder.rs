//! Construction of tables from columns, data and an index

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Axis, Error, Result};
use crate::index::LabelIndex;
use crate::model::{Label, Value};
use crate::store::ColumnStore;
use crate::table::{Table, DEFAULT_INDEX_NAME};

/// Builder for [`Table`]
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    /// Column label → values, in insertion order
    data: Option<IndexMap<Label, Vec<Value>>>,
    /// Explicit column order
    columns: Option<Vec<Label>>,
    /// Explicit row labels
    index: Option<Vec<Label>>,
    /// Display name of the index
    index_name: Option<String>,
}

impl TableBuilder {
    /// Create a builder for an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column data
    pub fn with_data(mut self, data: IndexMap<Label, Vec<Value>>) -> Self {
        self.data = Some(data);
        self
    }

    /// Add one column of data after those already given
    pub fn with_column(mut self, label: impl Into<Label>, values: Vec<Value>) -> Self {
        self.data
            .get_or_insert_with(IndexMap::new)
            .insert(label.into(), values);
        self
    }

    /// Set the column labels, or the column order when data is given
    pub fn with_columns<I, L>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the row labels
    pub fn with_index(mut self, index: Vec<Label>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the display name of the index
    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    /// Validate and build the table
    pub fn build(self) -> Result<Table> {
        let index_name = self
            .index_name
            .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());
        let index = self.index.filter(|labels| !labels.is_empty());

        let table = match self.data.filter(|data| !data.is_empty()) {
            Some(data) => build_from_data(data, self.columns, index, index_name)?,
            None => build_empty(self.columns.unwrap_or_default(), index, index_name)?,
        };
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "Built table"
        );
        Ok(table)
    }
}

fn build_empty(columns: Vec<Label>, index: Option<Vec<Label>>, index_name: String) -> Result<Table> {
    if index.is_some() && columns.is_empty() {
        return Err(Error::ShapeError(
            "cannot build a table with an index but no columns".to_string(),
        ));
    }
    let columns = LabelIndex::from_labels(Axis::Columns, columns)?;
    let index = LabelIndex::from_labels(Axis::Rows, index.unwrap_or_default())?;
    let store = ColumnStore::missing(columns.len(), index.len());
    Ok(Table::from_parts(columns, index, index_name, store))
}

fn build_from_data(
    mut data: IndexMap<Label, Vec<Value>>,
    columns: Option<Vec<Label>>,
    index: Option<Vec<Label>>,
    index_name: String,
) -> Result<Table> {
    if let Some(order) = columns {
        data = reorder(data, order)?;
    }

    let column_index = LabelIndex::from_labels(Axis::Columns, data.keys().cloned())?;
    let store = ColumnStore::from_columns(data.into_values().collect());

    let index = match index {
        Some(labels) => {
            if labels.len() != store.row_count() {
                return Err(Error::LengthMismatch {
                    what: "index labels",
                    expected: store.row_count(),
                    actual: labels.len(),
                });
            }
            LabelIndex::from_labels(Axis::Rows, labels)?
        }
        None => LabelIndex::range(Axis::Rows, store.row_count()),
    };

    Ok(Table::from_parts(column_index, index, index_name, store))
}

/// Put the data columns in the given order; both sides must name the same set
fn reorder(
    mut data: IndexMap<Label, Vec<Value>>,
    order: Vec<Label>,
) -> Result<IndexMap<Label, Vec<Value>>> {
    let order = LabelIndex::from_labels(Axis::Columns, order)?;
    if order.len() != data.len() || !order.iter().all(|c| data.contains_key(c)) {
        return Err(Error::ShapeError(
            "explicit columns must match the data columns exactly".to_string(),
        ));
    }
    let mut ordered = IndexMap::with_capacity(data.len());
    for label in order.iter() {
        if let Some(values) = data.shift_remove(label) {
            ordered.insert(label.clone(), values);
        }
    }
    Ok(ordered)
}
