//! Error types for table operations

use thiserror::Error;

use crate::model::Label;

/// Which axis of a table an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Rows => write!(f, "index"),
            Axis::Columns => write!(f, "columns"),
        }
    }
}

/// Errors raised by table operations.
///
/// Every operation validates before it mutates, so a returned error means the
/// table is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("label {label} not found in {axis}")]
    NotFound { axis: Axis, label: Label },

    #[error("{what}: expected length {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("label {label} already exists in {axis}")]
    DuplicateLabel { axis: Axis, label: Label },

    #[error("column {0} does not exist")]
    UnknownColumn(Label),

    #[error("either or both of a row selector or a column selector must be provided")]
    MissingSelector,

    #[error("shape error: {0}")]
    ShapeError(String),

    #[error("selector not supported here: {0}")]
    InvalidSelector(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
