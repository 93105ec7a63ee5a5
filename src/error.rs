use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::Axis;

// ---------------------------------------------------------------------------
// Grid loader errors
// ---------------------------------------------------------------------------

/// Failures while reading or querying an `x y z` grid table.
///
/// Line numbers are 1-based and count every physical line of the input,
/// blank ones included.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("file {} not found", path.display())]
    FileNotFound { path: PathBuf },

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}: '{content}'")]
    MalformedLine {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("line {line}: {axis} grid corrupted at index {index}, {found} instead of {expected}")]
    AxisGridCorrupted {
        axis: Axis,
        line: usize,
        index: usize,
        expected: f64,
        found: f64,
    },

    #[error("line {line}: {axis} value {value} already present in the grid")]
    DuplicateAxisValue { axis: Axis, line: usize, value: f64 },

    #[error("line {line}: irregular grid at ({x}, {y})")]
    IrregularGrid { line: usize, x: f64, y: f64 },

    #[error("not square matrix: size of row {row} is {len}, row 0 has {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("no order in file: fewer than two data lines")]
    NoOrderDetected,

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl GridError {
    /// Short name of the failure kind, stable across messages.
    pub fn kind(&self) -> &'static str {
        match self {
            GridError::FileNotFound { .. } => "FileNotFound",
            GridError::Io { .. } => "Io",
            GridError::MalformedLine { .. } => "MalformedLine",
            GridError::AxisGridCorrupted { .. } => "AxisGridCorrupted",
            GridError::DuplicateAxisValue { .. } => "DuplicateAxisValue",
            GridError::IrregularGrid { .. } => "IrregularGrid",
            GridError::NonSquareMatrix { .. } => "NonSquareMatrix",
            GridError::NoOrderDetected => "NoOrderDetected",
            GridError::IndexOutOfRange { .. } => "IndexOutOfRange",
        }
    }
}

// ---------------------------------------------------------------------------
// Spline errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    #[error("invalid spline input: {reason}")]
    InvalidInput { reason: String },

    /// The bracketing knots of a query coincide.
    #[error("degenerate interval [{lo}, {hi}] while evaluating at {x}")]
    DegenerateInterval { lo: usize, hi: usize, x: f64 },
}

impl SplineError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SplineError::InvalidInput {
            reason: reason.into(),
        }
    }
}
