//! Dense `f64` matrices with 1-based, zero-padded access and the core algebra:
//! sums, differences, component-wise and matrix products, scaling, transposition
//! and uniform random initialisation.

pub mod config;
pub mod csv_io;
pub mod error;
pub mod matrix;
pub mod random;

pub use error::{MatrixError, Result};
pub use matrix::{dot, Dot, Matrix, Shape};
pub use random::seed_global;

#[cfg(test)]
mod proptests;
