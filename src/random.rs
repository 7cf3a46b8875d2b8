// random.rs

//! Uniform random matrices.
//!
//! `Matrix::randomize` draws from one generator per process, seeded from OS entropy the
//! first time it is used. `seed_global` replaces it with a seeded one for reproducible
//! runs, and `Matrix::randomize_with` takes any caller-owned `Rng`.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

static GLOBAL_RNG: Lazy<Mutex<StdRng>> = Lazy::new(|| Mutex::new(StdRng::from_entropy()));

/// Reseeds the process-wide generator used by [`Matrix::randomize`].
pub fn seed_global(seed: u64) {
    log::debug!("seeding process generator with {}", seed);
    let mut rng = GLOBAL_RNG.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *rng = StdRng::seed_from_u64(seed);
}

// Wider ranges are sampled on quarter-scale bounds and scaled back up, since
// Uniform needs the width (and width / (1 - eps)) to stay finite. Multiplying by
// 4.0 is exact, so drawn values still land inside [min_value, max_value].
const WIDE_RANGE: f64 = f64::MAX / 4.0;

// Bounds must be finite and ordered; min == max is allowed
fn uniform(min_value: f64, max_value: f64) -> Result<(Uniform<f64>, f64)> {
    if !(min_value.is_finite() && max_value.is_finite()) || min_value > max_value {
        return Err(MatrixError::InvalidRange {
            min: min_value,
            max: max_value,
        });
    }
    if max_value - min_value <= WIDE_RANGE {
        Ok((Uniform::new_inclusive(min_value, max_value), 1.0))
    } else {
        log::trace!("sampling [{}, {}] at quarter scale", min_value, max_value);
        Ok((Uniform::new_inclusive(min_value / 4.0, max_value / 4.0), 4.0))
    }
}

impl Matrix {
    /// `rows x cols` matrix with every entry drawn uniformly from `[min_value, max_value]`.
    ///
    /// # Errors
    /// `MatrixError::InvalidRange` if a bound is not finite or `min_value > max_value`,
    /// `MatrixError::TooLarge` if `rows * cols` overflows `usize`.
    pub fn randomize(rows: usize, cols: usize, min_value: f64, max_value: f64) -> Result<Matrix> {
        // The generator is never left mid-update, so a poisoned lock is still usable
        let mut rng = GLOBAL_RNG.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Self::randomize_with(&mut *rng, rows, cols, min_value, max_value)
    }

    /// Same as [`Matrix::randomize`], drawing from the supplied generator.
    pub fn randomize_with<R>(
        rng: &mut R,
        rows: usize,
        cols: usize,
        min_value: f64,
        max_value: f64,
    ) -> Result<Matrix>
    where
        R: Rng + ?Sized,
    {
        let cells = rows
            .checked_mul(cols)
            .ok_or(MatrixError::TooLarge { rows, cols })?;
        let (distribution, factor) = uniform(min_value, max_value)?;
        let data: Vec<f64> = (0..cells)
            .map(|_| distribution.sample(rng) * factor)
            .collect();

        Ok(Matrix::with_data(rows, cols, data))
    }
}
