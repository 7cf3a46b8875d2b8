// matrix.rs

//! # Matrix Module
//!
//! This module provides the implementation of the `Matrix` struct and related items, including:
//! - `Dot`: For performing the matrix product
//! - `dot`: For contracting two plain sequences
//! - `Shape`: For validating extents that arrive as signed integers
//!
//! Logical coordinates are 1-based `(i, j)`. Reads outside the current shape see an
//! implicit zero, writes outside it grow the matrix, and the element-wise combinators
//! iterate over the shape of their left operand.
//!
//! ## Usage:
//! ```rust
//! use dense_matrix::matrix::{Dot, Matrix};
//!
//! let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
//! let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
//! assert_eq!(a.dot(&b).to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
//! ```

// traits
use std::fmt;
use std::ops::Add;
use std::ops::Div;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Sub;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result};

pub trait Dot<Rhs = Self> {
    type Output;

    fn dot(&self, rhs: &Rhs) -> Self::Output;
}

/// Dot product of two sequences.
///
/// The contraction runs over the shorter of the two; any excess on the longer
/// sequence is ignored.
pub fn dot(u: &[f64], v: &[f64]) -> f64 {
    u.iter().zip(v.iter()).map(|(a, b)| a * b).sum()
}

// Shape - (rows, cols) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    /// Validates extents coming from outside the crate (job files, foreign callers).
    ///
    /// # Errors
    /// `MatrixError::NegativeDimension` if either extent is negative,
    /// `MatrixError::TooLarge` if `rows * cols` overflows `usize`.
    pub fn new(rows: i64, cols: i64) -> Result<Self> {
        match (usize::try_from(rows), usize::try_from(cols)) {
            (Ok(rows), Ok(cols)) => {
                if rows.checked_mul(cols).is_none() {
                    return Err(MatrixError::TooLarge { rows, cols });
                }
                Ok(Self { rows, cols })
            }
            _ => Err(MatrixError::NegativeDimension { rows, cols }),
        }
    }
}

// Number of stored cells for a shape; overflow panics like Vec capacity overflow
fn cell_count(rows: usize, cols: usize) -> usize {
    match rows.checked_mul(cols) {
        Some(cells) => cells,
        None => panic!("matrix extents {}x{} overflow usize", rows, cols),
    }
}

/// Dense row-major matrix of `f64`.
///
/// Serializes as nested rows (`[[1.0, 2.0], [3.0, 4.0]]`). That form has no rows to
/// carry a column count, so a `0 x p` matrix serializes as `[]` and reads back as 0x0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>, // Flat row-major storage, always rows * cols long
}

impl Matrix {
    // Internal constructor, callers guarantee data.len() == rows * cols
    pub(crate) fn with_data(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(rows * cols, data.len(), "Data size mismatch");
        Self { rows, cols, data }
    }

    /// Builds a matrix from nested rows.
    ///
    /// The column count is the length of the longest row and shorter rows are padded
    /// with trailing zeros. An empty outer sequence gives the 0x0 matrix. Never fails.
    pub fn from_rows(rows_data: Vec<Vec<f64>>) -> Self {
        let rows = rows_data.len();
        let cols = rows_data.iter().map(Vec::len).max().unwrap_or(0);

        let mut data = Vec::with_capacity(rows * cols);
        for (index, mut row) in rows_data.into_iter().enumerate() {
            if row.len() < cols {
                log::trace!("padding row {} from {} to {} columns", index + 1, row.len(), cols);
                row.resize(cols, 0.0);
            }
            data.extend(row);
        }

        Self { rows, cols, data }
    }

    /// Zero-initialized `rows x cols` matrix.
    ///
    /// # Panics
    /// If `rows * cols` overflows `usize`. Use [`Shape::new`] to validate untrusted extents.
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; cell_count(rows, cols)],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape {
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |row| {
            let start = row * self.cols;
            let end = start + self.cols;
            &self.data[start..end]
        })
    }

    // The full nested representation
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows_iter().map(<[f64]>::to_vec).collect()
    }

    // Storage offset for a 1-based coordinate, None when outside the shape
    fn offset(&self, i: usize, j: usize) -> Option<usize> {
        if i < 1 || i > self.rows || j < 1 || j > self.cols {
            None
        } else {
            Some((i - 1) * self.cols + (j - 1))
        }
    }

    /// Entry at the 1-based coordinate `(i, j)`, or `0.0` outside the current shape.
    pub fn get_entry(&self, i: usize, j: usize) -> f64 {
        self.offset(i, j).map_or(0.0, |k| self.data[k])
    }

    /// Writes `val` at the 1-based coordinate `(i, j)`.
    ///
    /// A zero index is ignored. Coordinates past the current shape grow the matrix,
    /// zero-filling every new cell before `val` is written. The matrix never shrinks.
    ///
    /// # Panics
    /// If the grown shape has more cells than `usize` can count.
    pub fn set_entry(&mut self, val: f64, i: usize, j: usize) {
        if i < 1 || j < 1 {
            log::trace!("ignoring write at ({}, {})", i, j);
            return;
        }
        if i > self.rows || j > self.cols {
            self.grow(i.max(self.rows), j.max(self.cols));
        }
        let k = (i - 1) * self.cols + (j - 1);
        self.data[k] = val;
    }

    // Extend to rows x cols, keeping existing entries in place
    fn grow(&mut self, rows: usize, cols: usize) {
        log::debug!(
            "growing matrix from {}x{} to {}x{}",
            self.rows, self.cols, rows, cols
        );

        if cols == self.cols {
            // New rows go after the existing ones, no reshuffle needed
            self.data.resize(cell_count(rows, cols), 0.0);
        } else {
            let mut data = vec![0.0; cell_count(rows, cols)];
            for (row_index, row) in self.rows_iter().enumerate() {
                let start = row_index * cols;
                data[start..start + row.len()].copy_from_slice(row);
            }
            self.data = data;
        }

        self.rows = rows;
        self.cols = cols;
    }

    // Returns a slice for the 1-based row i
    pub fn row_slice(&self, i: usize) -> Option<&[f64]> {
        if i < 1 || i > self.rows {
            return None;
        }
        let start = (i - 1) * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    /// Copy of the 1-based row `i`; empty when `i` is out of range.
    pub fn get_row(&self, i: usize) -> Vec<f64> {
        self.row_slice(i).map(<[f64]>::to_vec).unwrap_or_default()
    }

    /// Copy of the 1-based column `j`; empty when `j` is out of range.
    pub fn get_column(&self, j: usize) -> Vec<f64> {
        if j < 1 || j > self.cols {
            return Vec::new();
        }
        (1..=self.rows).map(|i| self.get_entry(i, j)).collect()
    }

    // Element-wise combination over the shape of `a`; `b` is read through get_entry
    // so missing positions contribute zero and extra positions are dropped.
    fn combine<F>(a: &Matrix, b: &Matrix, op: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        if a.shape() == b.shape() {
            let data = a.data.iter().zip(b.data.iter()).map(|(&x, &y)| op(x, y)).collect();
            return Matrix::with_data(a.rows, a.cols, data);
        }

        log::trace!(
            "combining {}x{} with {}x{} over the left shape",
            a.rows, a.cols, b.rows, b.cols
        );
        let mut data = Vec::with_capacity(a.data.len());
        for i in 1..=a.rows {
            for j in 1..=a.cols {
                data.push(op(a.get_entry(i, j), b.get_entry(i, j)));
            }
        }
        Matrix::with_data(a.rows, a.cols, data)
    }

    /// Element-wise `a + b` over the shape of `a`.
    pub fn sum(a: &Matrix, b: &Matrix) -> Matrix {
        Self::combine(a, b, |x, y| x + y)
    }

    /// Element-wise `a - b` over the shape of `a`.
    pub fn difference(a: &Matrix, b: &Matrix) -> Matrix {
        Self::combine(a, b, |x, y| x - y)
    }

    /// Component-wise (Hadamard) product over the shape of `a`.
    pub fn cwise_product(a: &Matrix, b: &Matrix) -> Matrix {
        Self::combine(a, b, |x, y| x * y)
    }

    pub fn scale(a: &Matrix, k: f64) -> Matrix {
        a.apply(|x| x * k)
    }

    pub fn divide(a: &Matrix, k: f64) -> Matrix {
        a.apply(|x| x / k)
    }

    // Apply the function to every entry
    pub fn apply<F>(&self, func: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        let data: Vec<f64> = self.data.iter().map(|&x| func(x)).collect();
        Matrix::with_data(self.rows, self.cols, data)
    }

    /// Matrix product, shaped `a.rows x b.cols`.
    ///
    /// Entry `(i, j)` is `dot(row i of a, column j of b)`. When `a.cols != b.rows` the
    /// contraction is truncated to the shorter length instead of failing; use
    /// [`Matrix::checked_product`] to reject mismatched shapes.
    pub fn product(a: &Matrix, b: &Matrix) -> Matrix {
        if a.cols != b.rows {
            log::warn!(
                "product of {}x{} and {}x{}: contraction truncated to {}",
                a.rows,
                a.cols,
                b.rows,
                b.cols,
                a.cols.min(b.rows)
            );
        }

        let columns: Vec<Vec<f64>> = (1..=b.cols).map(|j| b.get_column(j)).collect();
        let mut data = Vec::with_capacity(a.rows * b.cols);
        for row in a.rows_iter() {
            for column in &columns {
                data.push(dot(row, column));
            }
        }

        Matrix::with_data(a.rows, b.cols, data)
    }

    /// Matrix product that rejects `a.cols != b.rows`.
    ///
    /// # Errors
    /// `MatrixError::DimensionMismatch` when the inner extents differ.
    pub fn checked_product(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.cols != b.rows {
            return Err(MatrixError::DimensionMismatch {
                left_cols: a.cols,
                right_rows: b.rows,
            });
        }
        Ok(Self::product(a, b))
    }

    // Transpose - flip rows and cols
    pub fn transposed(&self) -> Self {
        let mut transposed = Matrix::zero(self.cols, self.rows); // Swap rows and cols

        for i in 0..self.rows {
            for j in 0..self.cols {
                // element at (i, j) becomes (j, i)
                transposed.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }

        transposed
    }

    pub fn transpose_in_place(&mut self) {
        *self = self.transposed();
    }

    /// Same shape and every pair of entries within `tolerance`.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl From<Vec<Vec<f64>>> for Matrix {
    fn from(rows_data: Vec<Vec<f64>>) -> Self {
        Matrix::from_rows(rows_data)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(matrix: Matrix) -> Self {
        matrix.to_rows()
    }
}

// Print the matrix as matrix([ ...rows... ])
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows == 0 {
            return write!(f, "matrix([])");
        }
        let body: Vec<String> = self
            .rows_iter()
            .map(|row| format!("\t{:?}", row))
            .collect();
        write!(f, "matrix([\n{}\n])", body.join(",\n"))
    }
}

impl Dot for Matrix {
    type Output = Matrix;

    fn dot(&self, other: &Matrix) -> Self::Output {
        Matrix::product(self, other)
    }
}

// Implement Add for Matrix
impl Add for Matrix {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Matrix::sum(&self, &rhs)
    }
}

// Implement Add for &Matrix
impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        Matrix::sum(self, rhs)
    }
}

// Sub for owned matrices (Matrix - Matrix)
impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        Matrix::difference(&self, &rhs)
    }
}

// Sub for borrowing a matrix (&Matrix - &Matrix)
impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        Matrix::difference(self, rhs)
    }
}

// Element-wise multiplication, Owned × Owned
impl Mul for Matrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Matrix::cwise_product(&self, &rhs)
    }
}

// Reference × Reference
impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        Matrix::cwise_product(self, rhs)
    }
}

// Implement Scalar multiplication for Matrix
impl Mul<f64> for Matrix {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self::Output {
        Matrix::scale(&self, scalar)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Matrix {
        Matrix::scale(self, scalar)
    }
}

// Implement Scalar multiplication assign (*=) for Matrix
impl MulAssign<f64> for Matrix {
    fn mul_assign(&mut self, scalar: f64) {
        self.data.iter_mut().for_each(|x| *x *= scalar); // In-place scaling
    }
}

impl Div<f64> for Matrix {
    type Output = Matrix;

    fn div(self, scalar: f64) -> Matrix {
        Matrix::divide(&self, scalar)
    }
}

impl Div<f64> for &Matrix {
    type Output = Matrix;

    fn div(self, scalar: f64) -> Matrix {
        Matrix::divide(self, scalar)
    }
}
