//! Writes: cells, rows, columns and row subsets, with auto-expansion

use indexmap::IndexMap;
use tracing::debug;

use super::Table;
use crate::error::{Axis, Error, Result};
use crate::model::{Label, Value};
use crate::selector::{self, Selector, Target};

/// The value side of a write.
///
/// Broadcasting and element-wise assignment are separate variants so that a
/// list-valued cell can be broadcast without being mistaken for one value per
/// target.
#[derive(Debug, Clone, PartialEq)]
pub enum Assign {
    /// Write the same value to every target
    Broadcast(Value),
    /// Write one value per target, in target order
    Each(Vec<Value>),
    /// Update the named columns of one row
    Row(IndexMap<Label, Value>),
}

impl Assign {
    pub fn value(value: impl Into<Value>) -> Self {
        Assign::Broadcast(value.into())
    }

    pub fn each<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Assign::Each(values.into_iter().map(Into::into).collect())
    }

    pub fn row<I, L, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<Label>,
        V: Into<Value>,
    {
        Assign::Row(
            values
                .into_iter()
                .map(|(l, v)| (l.into(), v.into()))
                .collect(),
        )
    }
}

impl Table {
    /// Write through row and column selectors.
    ///
    /// At least one selector must be given. Labels that do not exist yet on
    /// either axis are appended before the write.
    pub fn set(
        &mut self,
        rows: impl Into<Selector>,
        columns: impl Into<Selector>,
        assign: Assign,
    ) -> Result<()> {
        let rows = rows.into();
        let columns = columns.into();
        match (rows, columns, assign) {
            (Selector::All, Selector::All, _) => Err(Error::MissingSelector),
            (Selector::Label(row), Selector::All, Assign::Row(values)) => self.set_row(row, values),
            (Selector::All, Selector::Label(column), Assign::Each(values)) => {
                self.set_column(column, values)
            }
            (Selector::All, Selector::Label(column), Assign::Broadcast(value)) => {
                self.broadcast_column(column, value)
            }
            (rows, Selector::Label(column), assign @ (Assign::Broadcast(_) | Assign::Each(_))) => {
                self.assign_rows(&rows, column, assign)
            }
            (_, Selector::Label(_), Assign::Row(_)) => Err(Error::ShapeError(
                "a row mapping cannot be combined with a column selector".to_string(),
            )),
            (_, Selector::All, _) => Err(Error::ShapeError(
                "writing every column needs a single row label and a row mapping".to_string(),
            )),
            (_, _, _) => Err(Error::ShapeError(
                "writes address a single column label".to_string(),
            )),
        }
    }

    /// Set one cell, appending the row and column if needed
    pub fn set_cell(
        &mut self,
        row: impl Into<Label>,
        column: impl Into<Label>,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.assign_rows(
            &Selector::Label(row.into()),
            column.into(),
            Assign::Broadcast(value.into()),
        )
    }

    /// Update some columns of one row, appending the row if needed.
    ///
    /// Every key must already be a column; columns not named keep their value.
    pub fn set_row(
        &mut self,
        row: impl Into<Label>,
        values: IndexMap<Label, Value>,
    ) -> Result<()> {
        let row = row.into();
        if let Some(unknown) = values.keys().find(|c| !self.columns.contains(c)) {
            return Err(Error::UnknownColumn(unknown.clone()));
        }
        let r = self.ensure_row(row)?;
        for (column, value) in values {
            let c = self.columns.require(&column)?;
            self.store.set(c, r, value);
        }
        Ok(())
    }

    /// Replace a whole column, creating it if needed.
    ///
    /// Fewer values than rows is an error. Extra values grow the table: the new
    /// rows get integer labels equal to their positions and missing cells in
    /// every other column.
    pub fn set_column(&mut self, column: impl Into<Label>, values: Vec<Value>) -> Result<()> {
        let column = column.into();
        let rows = self.index.len();
        if values.len() < rows {
            return Err(Error::LengthMismatch {
                what: "column values",
                expected: rows,
                actual: values.len(),
            });
        }
        let grown: Vec<Label> = (rows..values.len()).map(|p| Label::Int(p as i64)).collect();
        if let Some(taken) = grown.iter().find(|l| self.index.contains(l)) {
            return Err(Error::DuplicateLabel {
                axis: Axis::Rows,
                label: taken.clone(),
            });
        }

        let c = self.ensure_column(column)?;
        for label in grown {
            self.index.append(label)?;
        }
        self.store.replace_column(c, values)?;
        Ok(())
    }

    /// Write one value to every current row of a column, creating it if needed
    pub fn broadcast_column(
        &mut self,
        column: impl Into<Label>,
        value: impl Into<Value>,
    ) -> Result<()> {
        let column = column.into();
        let value = value.into();
        match self.columns.position_of(&column) {
            Some(c) => {
                for r in 0..self.index.len() {
                    self.store.set(c, r, value.clone());
                }
            }
            None => {
                self.columns.append(column.clone())?;
                self.store.append_column(value);
                debug!(column = %column, "Appended column");
            }
        }
        Ok(())
    }

    /// Write one value per selected row of a column
    pub fn set_column_at(
        &mut self,
        rows: impl Into<Selector>,
        column: impl Into<Label>,
        values: Vec<Value>,
    ) -> Result<()> {
        self.assign_rows(&rows.into(), column.into(), Assign::Each(values))
    }

    /// Append an empty row; the label must be new
    pub fn append_row(&mut self, row: impl Into<Label>) -> Result<()> {
        let row = row.into();
        self.index.append(row.clone())?;
        self.store.append_row();
        debug!(row = %row, "Appended row");
        Ok(())
    }

    /// Append a column of missing cells; the label must be new
    pub fn append_column(&mut self, column: impl Into<Label>) -> Result<()> {
        let column = column.into();
        self.columns.append(column.clone())?;
        self.store.append_column(Value::Missing);
        debug!(column = %column, "Appended column");
        Ok(())
    }

    fn assign_rows(&mut self, rows: &Selector, column: Label, assign: Assign) -> Result<()> {
        let targets = selector::resolve_for_write(&self.index, rows)?;
        let values = match assign {
            Assign::Broadcast(value) => vec![value; targets.len()],
            Assign::Each(values) => {
                if values.len() != targets.len() {
                    return Err(Error::LengthMismatch {
                        what: "values for selected rows",
                        expected: targets.len(),
                        actual: values.len(),
                    });
                }
                values
            }
            Assign::Row(_) => {
                return Err(Error::ShapeError(
                    "a row mapping cannot be written to a column".to_string(),
                ))
            }
        };

        let c = self.ensure_column(column)?;
        for label in selector::new_labels(&targets) {
            self.ensure_row(label)?;
        }
        for (target, value) in targets.iter().zip(values) {
            let r = match target {
                Target::Existing(position) => *position,
                Target::New(label) => self.index.require(label)?,
            };
            self.store.set(c, r, value);
        }
        Ok(())
    }

    fn ensure_row(&mut self, row: Label) -> Result<usize> {
        if let Some(r) = self.index.position_of(&row) {
            return Ok(r);
        }
        let r = self.index.append(row.clone())?;
        self.store.append_row();
        debug!(row = %row, position = r, "Appended row");
        Ok(r)
    }

    fn ensure_column(&mut self, column: Label) -> Result<usize> {
        if let Some(c) = self.columns.position_of(&column) {
            return Ok(c);
        }
        let c = self.columns.append(column.clone())?;
        self.store.append_column(Value::Missing);
        debug!(column = %column, position = c, "Appended column");
        Ok(c)
    }
}
