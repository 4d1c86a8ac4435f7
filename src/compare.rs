//! Structural comparison of two tables.
//!
//! Built only on the public table API, for test harnesses and callers that
//! need to know how two tables differ rather than just whether they do.

use serde::{Deserialize, Serialize};

use crate::model::{Label, Value};
use crate::table::Table;

/// One way in which two tables differ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Difference {
    /// Column only in the right table
    ColumnAdded { label: Label, position: usize },
    /// Column only in the left table
    ColumnRemoved { label: Label, position: usize },
    /// Column in both tables at different positions
    ColumnMoved { label: Label, from: usize, to: usize },
    /// Row label only in the right table
    RowAdded { label: Label, position: usize },
    /// Row label only in the left table
    RowRemoved { label: Label, position: usize },
    /// Row label in both tables at different positions
    RowMoved { label: Label, from: usize, to: usize },
    /// Cell addressed by the same labels in both tables holds different values
    CellChanged {
        row: Label,
        column: Label,
        left: Value,
        right: Value,
    },
}

impl std::fmt::Display for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difference::ColumnAdded { label, position } => {
                write!(f, "+ column {} (at position {})", label, position)
            }
            Difference::ColumnRemoved { label, position } => {
                write!(f, "- column {} (from position {})", label, position)
            }
            Difference::ColumnMoved { label, from, to } => {
                write!(f, "↔ column {} (moved from {} to {})", label, from, to)
            }
            Difference::RowAdded { label, position } => {
                write!(f, "+ row {} (at position {})", label, position)
            }
            Difference::RowRemoved { label, position } => {
                write!(f, "- row {} (from position {})", label, position)
            }
            Difference::RowMoved { label, from, to } => {
                write!(f, "↔ row {} (moved from {} to {})", label, from, to)
            }
            Difference::CellChanged {
                row,
                column,
                left,
                right,
            } => {
                write!(f, "~ [{}, {}]: {} → {}", row, column, left, right)
            }
        }
    }
}

/// Table comparator with configurable cell equality
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    numeric_tolerance: Option<f64>,
}

impl Comparator {
    /// Create a comparator using exact cell equality
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat floats within `tolerance` of each other as equal
    pub fn with_numeric_tolerance(mut self, tolerance: f64) -> Self {
        self.numeric_tolerance = Some(tolerance);
        self
    }

    /// Compare two cell values
    pub fn equal(&self, a: &Value, b: &Value) -> bool {
        if let Some(tolerance) = self.numeric_tolerance {
            let close = match (a, b) {
                (Value::Float(x), Value::Float(y)) => (x - y).abs() <= tolerance,
                (Value::Int(x), Value::Float(y)) => ((*x as f64) - y).abs() <= tolerance,
                (Value::Float(x), Value::Int(y)) => (x - (*y as f64)).abs() <= tolerance,
                _ => false,
            };
            if close {
                return true;
            }
        }
        a == b
    }

    /// Every difference between `left` and `right`
    pub fn differences(&self, left: &Table, right: &Table) -> Vec<Difference> {
        let mut differences = Vec::new();

        let left_columns = left.columns();
        let right_columns = right.columns();
        axis_differences(
            &left_columns,
            &right_columns,
            &mut differences,
            |label, position| Difference::ColumnRemoved { label, position },
            |label, position| Difference::ColumnAdded { label, position },
            |label, from, to| Difference::ColumnMoved { label, from, to },
        );

        let left_index = left.index();
        let right_index = right.index();
        axis_differences(
            &left_index,
            &right_index,
            &mut differences,
            |label, position| Difference::RowRemoved { label, position },
            |label, position| Difference::RowAdded { label, position },
            |label, from, to| Difference::RowMoved { label, from, to },
        );

        for column in left_columns.iter().filter(|c| right.column_position(c).is_some()) {
            for row in left_index.iter().filter(|r| right.row_position(r).is_some()) {
                let (Ok(a), Ok(b)) = (left.get_cell(row, column), right.get_cell(row, column))
                else {
                    continue;
                };
                if !self.equal(&a, &b) {
                    differences.push(Difference::CellChanged {
                        row: row.clone(),
                        column: column.clone(),
                        left: a,
                        right: b,
                    });
                }
            }
        }

        differences
    }
}

fn axis_differences(
    left: &[Label],
    right: &[Label],
    out: &mut Vec<Difference>,
    removed: impl Fn(Label, usize) -> Difference,
    added: impl Fn(Label, usize) -> Difference,
    moved: impl Fn(Label, usize, usize) -> Difference,
) {
    for (position, label) in left.iter().enumerate() {
        match right.iter().position(|r| r == label) {
            None => out.push(removed(label.clone(), position)),
            Some(to) if to != position => out.push(moved(label.clone(), position, to)),
            Some(_) => {}
        }
    }
    for (position, label) in right.iter().enumerate() {
        if !left.contains(label) {
            out.push(added(label.clone(), position));
        }
    }
}

/// Every difference between two tables, using exact cell equality
pub fn differences(left: &Table, right: &Table) -> Vec<Difference> {
    Comparator::new().differences(left, right)
}

/// Panic with a listing of the differences unless the tables are equal
#[track_caller]
pub fn assert_table_equal(left: &Table, right: &Table) {
    let differences = differences(left, right);
    if !differences.is_empty() {
        let listing = differences
            .iter()
            .map(|d| format!("  {}", d))
            .collect::<Vec<_>>()
            .join("\n");
        panic!(
            "tables differ:\n{}\nleft:\n{}right:\n{}",
            listing, left, right
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;
    use crate::model::labels;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&v| Value::Int(v)).collect()
    }

    fn table(columns: &[&str], index: &[i64]) -> Table {
        let mut builder = TableBuilder::new();
        for (i, column) in columns.iter().enumerate() {
            let values = index.iter().map(|r| r * 10 + i as i64).collect::<Vec<_>>();
            builder = builder.with_column(*column, ints(&values));
        }
        builder.with_index(labels(index.iter().copied())).build().unwrap()
    }

    #[test]
    fn test_equal_tables() {
        let left = table(&["a", "b"], &[1, 2]);
        assert!(differences(&left, &left.clone()).is_empty());
        assert_table_equal(&left, &left.clone());
    }

    #[test]
    fn test_axis_differences() {
        let left = table(&["a", "b", "c"], &[1, 2]);
        let right = table(&["b", "a", "d"], &[1, 3]);
        let found = differences(&left, &right);
        assert!(found.contains(&Difference::ColumnMoved {
            label: Label::from("a"),
            from: 0,
            to: 1
        }));
        assert!(found.contains(&Difference::ColumnRemoved {
            label: Label::from("c"),
            position: 2
        }));
        assert!(found.contains(&Difference::ColumnAdded {
            label: Label::from("d"),
            position: 2
        }));
        assert!(found.contains(&Difference::RowRemoved {
            label: Label::from(2),
            position: 1
        }));
        assert!(found.contains(&Difference::RowAdded {
            label: Label::from(3),
            position: 1
        }));
    }

    #[test]
    fn test_cell_changes() {
        let left = table(&["a"], &[1, 2]);
        let mut right = left.clone();
        right.set_cell(2, "a", 0.5).unwrap();
        right.set_index_name("idx");
        let found = differences(&left, &right);
        assert_eq!(
            found,
            vec![Difference::CellChanged {
                row: Label::from(2),
                column: Label::from("a"),
                left: Value::Int(20),
                right: Value::Float(0.5),
            }]
        );
    }

    #[test]
    fn test_numeric_tolerance() {
        let comparator = Comparator::new().with_numeric_tolerance(0.01);
        assert!(comparator.equal(&Value::Float(1.0), &Value::Float(1.005)));
        assert!(!comparator.equal(&Value::Float(1.0), &Value::Float(1.02)));
        assert!(comparator.equal(&Value::Int(1), &Value::Float(1.0)));
        assert!(!Comparator::new().equal(&Value::Int(1), &Value::Float(1.0)));
    }

    #[test]
    #[should_panic(expected = "tables differ")]
    fn test_assert_table_equal_panics() {
        assert_table_equal(&table(&["a"], &[1]), &table(&["b"], &[1]));
    }
}
