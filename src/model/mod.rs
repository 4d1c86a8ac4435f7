//! Data model for labels and cell values

mod label;
mod value;

pub use label::{labels, Label};
pub use value::Value;
