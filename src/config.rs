use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use serde_json::from_reader;

use crate::error::{MatrixError, Result};
use crate::matrix::{Matrix, Shape};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Zero,
    Randomize,
    Sum,
    Difference,
    CwiseProduct,
    Scale,
    Product,
    CheckedProduct,
    Transpose,
}

// A single matrix job read from json
#[derive(Debug, Deserialize, Clone)]
pub struct JobConfig {
    pub operation: Operation,

    // operands in nested form, ragged rows are padded on load
    pub left: Option<Matrix>,
    pub right: Option<Matrix>,

    #[serde(default = "default_scalar")]
    pub scalar: f64,

    // extents for zero / randomize, signed so bad input is reported rather than rejected by serde
    #[serde(default)]
    pub rows: i64,
    #[serde(default)]
    pub cols: i64,

    #[serde(default = "default_min_value")]
    pub min_value: f64,
    #[serde(default = "default_max_value")]
    pub max_value: f64,

    pub seed: Option<u64>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    // also write the result here as csv
    pub output_csv: Option<String>,
}

fn default_scalar() -> f64 {
    1.0
}

fn default_min_value() -> f64 {
    -1.0
}

fn default_max_value() -> f64 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl JobConfig {
    // get config from the json file
    pub fn from_json(path: &str) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut config: JobConfig = from_reader(reader)?;

        config.log_level = config.log_level.to_ascii_lowercase();

        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: JobConfig = serde_json::from_str(json)?;
        config.log_level = config.log_level.to_ascii_lowercase();
        Ok(config)
    }

    pub fn shape(&self) -> Result<Shape> {
        Shape::new(self.rows, self.cols)
    }

    fn left(&self) -> Result<&Matrix> {
        self.left.as_ref().ok_or(MatrixError::MissingOperand("left"))
    }

    fn right(&self) -> Result<&Matrix> {
        self.right.as_ref().ok_or(MatrixError::MissingOperand("right"))
    }

    /// Evaluates the configured operation.
    pub fn run(&self) -> Result<Matrix> {
        log::debug!("running {:?}", self.operation);
        let result = match self.operation {
            Operation::Zero => {
                let shape = self.shape()?;
                Matrix::zero(shape.rows, shape.cols)
            }
            Operation::Randomize => {
                let shape = self.shape()?;
                match self.seed {
                    Some(seed) => crate::random::seed_global(seed),
                    None => log::info!("No seed given, randomize output will differ between runs."),
                }
                Matrix::randomize(shape.rows, shape.cols, self.min_value, self.max_value)?
            }
            Operation::Sum => Matrix::sum(self.left()?, self.right()?),
            Operation::Difference => Matrix::difference(self.left()?, self.right()?),
            Operation::CwiseProduct => Matrix::cwise_product(self.left()?, self.right()?),
            Operation::Scale => Matrix::scale(self.left()?, self.scalar),
            Operation::Product => Matrix::product(self.left()?, self.right()?),
            Operation::CheckedProduct => Matrix::checked_product(self.left()?, self.right()?)?,
            Operation::Transpose => self.left()?.transposed(),
        };
        Ok(result)
    }
}
