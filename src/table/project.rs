//! Projections of a table into plain mappings and sequences

use indexmap::IndexMap;

use super::{Table, DEFAULT_INDEX_NAME};
use crate::builder::TableBuilder;
use crate::error::{Axis, Error, Result};
use crate::model::{Label, Value};

impl Table {
    /// Column label → values, in column order.
    ///
    /// With `include_index` the row labels come first under the reserved
    /// `"index"` key.
    pub fn to_mapping(&self, include_index: bool) -> Result<IndexMap<Label, Vec<Value>>> {
        let mut mapping = IndexMap::with_capacity(self.columns.len() + 1);
        if include_index {
            let key = Label::from(DEFAULT_INDEX_NAME);
            if self.columns.contains(&key) {
                return Err(Error::DuplicateLabel {
                    axis: Axis::Columns,
                    label: key,
                });
            }
            mapping.insert(key, self.index.iter().cloned().map(Value::from).collect());
        }
        for (label, values) in self.columns.iter().zip(self.store.to_columns()) {
            mapping.insert(label.clone(), values);
        }
        Ok(mapping)
    }

    /// Rebuild a table from [`Table::to_mapping`] output.
    ///
    /// `include_index` must match the flag the mapping was produced with: when
    /// set, the leading `"index"` key holds the row labels and is required;
    /// otherwise every key is a column and the index is `0..rows`.
    pub fn from_indexed_mapping(
        mut mapping: IndexMap<Label, Vec<Value>>,
        include_index: bool,
    ) -> Result<Self> {
        if !include_index {
            return TableBuilder::new().with_data(mapping).build();
        }
        let key = Label::from(DEFAULT_INDEX_NAME);
        let index = mapping.shift_remove(&key).ok_or(Error::NotFound {
            axis: Axis::Columns,
            label: key,
        })?;
        let index = index
            .into_iter()
            .map(Label::try_from)
            .collect::<Result<Vec<_>>>()?;
        TableBuilder::new().with_data(mapping).with_index(index).build()
    }

    /// Values of the only column, in row order
    pub fn to_sequence(&self) -> Result<Vec<Value>> {
        if self.columns.len() != 1 {
            return Err(Error::ShapeError(format!(
                "a sequence needs exactly one column, table has {}",
                self.columns.len()
            )));
        }
        Ok(self.store.column(0).map(<[Value]>::to_vec).unwrap_or_default())
    }
}
