//! labelframe - Mutable labeled tables
//!
//! An in-memory two-dimensional table with labeled rows and columns and
//! heterogeneous cells. Reads and writes address cells through selectors on
//! each axis (a label, a list of labels, a boolean mask or an inclusive label
//! slice), and writes create rows and columns on demand.
//!
//! ```
//! use labelframe::{Assign, Selector, Table, Value};
//!
//! let mut table = Table::new();
//! table.set_cell(10, "a", 1).unwrap();
//! table.set(Selector::labels([11, 12]), "a", Assign::each([2, 3])).unwrap();
//! table.set(Selector::All, "b", Assign::value("x")).unwrap();
//!
//! assert_eq!(table.shape(), (3, 2));
//! assert_eq!(
//!     table.get(12, "a").unwrap().into_cell(),
//!     Some(Value::Int(3))
//! );
//! ```

pub mod builder;
pub mod compare;
pub mod error;
pub mod index;
pub mod model;
pub mod selector;
pub mod store;
pub mod table;

pub use builder::TableBuilder;
pub use error::{Axis, Error, Result};
pub use model::{labels, Label, Value};
pub use selector::Selector;
pub use table::{Assign, Selection, Table};
