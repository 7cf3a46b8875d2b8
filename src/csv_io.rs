// csv_io.rs

//! Reading and writing matrices as headerless CSV, one record per row.
//!
//! Records may have different lengths; they go through `Matrix::from_rows`, so short
//! rows are padded with zeros. Blank cells read as `0.0`.

use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

pub fn from_csv_reader<R: Read>(reader: R) -> Result<Matrix> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // ragged rows are padded, not rejected
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (row_index, record) in reader.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .enumerate()
            .map(|(col_index, value)| parse_cell(value, row_index + 1, col_index + 1))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    log::debug!("read {} csv records", rows.len());
    Ok(Matrix::from_rows(rows))
}

fn parse_cell(value: &str, row: usize, col: usize) -> Result<f64> {
    if value.is_empty() {
        return Ok(0.0);
    }
    value.parse::<f64>().map_err(|_| MatrixError::Parse {
        row,
        col,
        value: value.to_string(),
    })
}

pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let file = std::fs::File::open(path)?;
    from_csv_reader(file)
}

pub fn to_csv_writer<W: Write>(matrix: &Matrix, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);

    for row in matrix.rows_iter() {
        writer.write_record(row.iter().map(|x| x.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv<P: AsRef<Path>>(matrix: &Matrix, path: P) -> Result<()> {
    let file = std::fs::File::create(path)?;
    to_csv_writer(matrix, file)
}
