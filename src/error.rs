// error.rs

//! Error type shared by the matrix core and the job runner.
//!
//! The core operations are total: out-of-range reads give zero, writes grow the
//! matrix and mismatched products truncate. Only the cases below are failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Invalid dimensions {rows}x{cols}: extents must be non-negative")]
    NegativeDimension { rows: i64, cols: i64 },
    #[error("Matrix of {rows}x{cols} entries is too large to address")]
    TooLarge { rows: usize, cols: usize },
    #[error("Invalid range [{min}, {max}]: bounds must be finite with min <= max")]
    InvalidRange { min: f64, max: f64 },
    #[error("Dimension mismatch for product: left has {left_cols} columns, right has {right_rows} rows")]
    DimensionMismatch { left_cols: usize, right_rows: usize },
    #[error("Could not parse '{value}' at row {row}, column {col}")]
    Parse { row: usize, col: usize, value: String },
    #[error("Missing operand: {0}")]
    MissingOperand(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, MatrixError>;
