use std::time::{Duration, Instant};

use log::info;
use mm_matrix::{
    fill_random, first_mismatch, BlockedKernel, DType, MatmulKernel, Matrix, NaiveKernel,
    DEFAULT_CACHE_SIZE,
};
use mm_strassen::{Strassen, StrassenConfig};
use rand::Rng;

use crate::args::Dimensions;
use crate::error::{BenchError, Result};

/// Upper bound (exclusive) for the random input values.
pub const FILL_BOUND: u32 = 8;

/// Owns the three algorithms under comparison.
pub struct Harness {
    naive: NaiveKernel,
    blocked: BlockedKernel,
    strassen: Strassen,
}

/// Wall-clock time of each algorithm for one run.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub naive: Duration,
    pub blocked: Duration,
    pub strassen: Duration,
}

impl Harness {
    pub fn new(config: StrassenConfig) -> Result<Self> {
        Ok(Harness {
            naive: NaiveKernel::new(),
            blocked: BlockedKernel::from_cache_size(DEFAULT_CACHE_SIZE)?,
            strassen: Strassen::new(config)?,
        })
    }

    /// Multiply random `f64` inputs with all three algorithms, check that the results
    /// agree, and return the timings.
    ///
    /// # Errors
    /// Returns `BenchError::Mismatch` if two algorithms disagree beyond rounding.
    pub fn run<R: Rng>(&self, dims: Dimensions, rng: &mut R) -> Result<Timings> {
        let Dimensions { m, n, l } = dims;
        info!(
            "multiplying [{}x{}] by [{}x{}], {} bytes of f64 operands and results",
            m,
            l,
            l,
            n,
            working_set_bytes(dims, DType::F64)
        );
        let mut a = Matrix::<f64>::zeros(m, l)?;
        let mut b = Matrix::<f64>::zeros(l, n)?;
        fill_random(&mut a, FILL_BOUND, rng)?;
        fill_random(&mut b, FILL_BOUND, rng)?;

        let mut c_naive = Matrix::zeros(m, n)?;
        let mut c_blocked = Matrix::zeros(m, n)?;
        let mut c_strassen = Matrix::zeros(m, n)?;

        let naive = timed(&self.naive, &a, &b, &mut c_naive)?;
        let blocked = timed(&self.blocked, &a, &b, &mut c_blocked)?;
        let strassen = timed(&self.strassen, &a, &b, &mut c_strassen)?;

        check(&self.naive, &c_naive, &self.blocked, &c_blocked)?;
        check(&self.blocked, &c_blocked, &self.strassen, &c_strassen)?;

        Ok(Timings {
            naive,
            blocked,
            strassen,
        })
    }
}

/// Bytes held by both inputs and the three result matrices, saturating on overflow.
pub fn working_set_bytes(dims: Dimensions, dtype: DType) -> usize {
    let Dimensions { m, n, l } = dims;
    let elements = m
        .saturating_mul(l)
        .saturating_add(l.saturating_mul(n))
        .saturating_add(m.saturating_mul(n).saturating_mul(3));
    elements.saturating_mul(dtype.size_in_bytes())
}

fn timed<K: MatmulKernel>(
    kernel: &K,
    a: &Matrix<f64>,
    b: &Matrix<f64>,
    c: &mut Matrix<f64>,
) -> Result<Duration> {
    let start = Instant::now();
    kernel.matmul(&a.as_view(), &b.as_view(), &mut c.as_view_mut())?;
    let elapsed = start.elapsed();
    info!("{}: {:?}", kernel.name(), elapsed);
    Ok(elapsed)
}

fn check<K1: MatmulKernel, K2: MatmulKernel>(
    left: &K1,
    c_left: &Matrix<f64>,
    right: &K2,
    c_right: &Matrix<f64>,
) -> Result<()> {
    match first_mismatch(c_left, c_right, DType::F64.default_tolerance())? {
        None => Ok(()),
        Some(mismatch) => Err(BenchError::Mismatch {
            left: left.name().to_string(),
            right: right.name().to_string(),
            row: mismatch.row,
            col: mismatch.col,
            left_value: mismatch.left,
            right_value: mismatch.right,
        }),
    }
}
