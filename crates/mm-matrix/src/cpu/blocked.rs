use crate::dtype::Element;
use crate::error::{MatrixError, Result};
use crate::kernel::MatmulKernel;
use crate::shape::Shape;
use crate::view::{MatrixView, MatrixViewMut, Rows, RowsMut};

/// Cache size, in elements, that the default tile is derived from.
pub const DEFAULT_CACHE_SIZE: usize = 64;

/// Cache-blocked multiplication over square `block_size` tiles.
///
/// Tiles at the right and bottom edges are clipped to the matrix extent. For each output
/// cell the `k` terms are still summed in ascending order, so the result matches
/// `multiply_naive` exactly even for floating point elements.
///
/// # Errors
/// `InvalidConfig` for a zero `block_size`, `MatmulMismatch` for incompatible shapes.
pub fn multiply_blocked<T, A, B, C>(a: &A, b: &B, c: &mut C, block_size: usize) -> Result<()>
where
    T: Element,
    A: Rows<T> + ?Sized,
    B: Rows<T> + ?Sized,
    C: RowsMut<T> + ?Sized,
{
    if block_size == 0 {
        return Err(MatrixError::InvalidConfig(
            "block size must be positive".to_string(),
        ));
    }
    let (m, n, l) = Shape::matmul_dims(a.shape(), b.shape(), c.shape())?;

    for i in 0..m {
        c.row_mut(i).fill(T::zero());
    }

    let t = block_size;
    for i0 in (0..m).step_by(t) {
        let i1 = (i0 + t).min(m);
        for j0 in (0..n).step_by(t) {
            let j1 = (j0 + t).min(n);
            for k0 in (0..l).step_by(t) {
                let k1 = (k0 + t).min(l);
                for p in i0..i1 {
                    let a_row = a.row(p);
                    let c_row = c.row_mut(p);
                    for (q, out) in c_row.iter_mut().enumerate().take(j1).skip(j0) {
                        let mut acc = *out;
                        for r in k0..k1 {
                            acc = acc.wrapping_add(a_row[r].wrapping_mul(b.row(r)[q]));
                        }
                        *out = acc;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Integer square root, rounded down.
fn isqrt(n: usize) -> usize {
    let mut r = (n as f64).sqrt() as usize;
    while r > 0 && r.checked_mul(r).map_or(true, |sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    r
}

/// Kernel wrapper around `multiply_blocked` with a fixed tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockedKernel {
    block_size: usize,
}

impl BlockedKernel {
    /// Tiles of `block_size x block_size` elements.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `block_size` is zero.
    pub fn new(block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(MatrixError::InvalidConfig(
                "block size must be positive".to_string(),
            ));
        }
        Ok(BlockedKernel { block_size })
    }

    /// Tiles whose area fits in `cache_size` elements: `block_size = floor(sqrt(cache_size))`.
    pub fn from_cache_size(cache_size: usize) -> Result<Self> {
        Self::new(isqrt(cache_size))
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }
}

impl Default for BlockedKernel {
    fn default() -> Self {
        BlockedKernel {
            block_size: isqrt(DEFAULT_CACHE_SIZE),
        }
    }
}

impl MatmulKernel for BlockedKernel {
    fn name(&self) -> &str {
        "blocked"
    }

    fn matmul<T: Element>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
    ) -> Result<()> {
        multiply_blocked(a, b, c, self.block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::multiply_naive;
    use crate::matrix::Matrix;

    fn sample(rows: usize, cols: usize, seed: i64) -> Matrix<i64> {
        Matrix::from_fn(rows, cols, |i, j| ((i as i64 * 7 + j as i64 * 3 + seed) % 11) - 5).unwrap()
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(63), 7);
        assert_eq!(isqrt(64), 8);
        assert_eq!(isqrt(65), 8);
        assert_eq!(isqrt(usize::MAX), (1usize << (usize::BITS / 2)) - 1);
    }

    #[test]
    fn test_block_size_from_cache() {
        assert_eq!(BlockedKernel::default().block_size(), 8);
        assert_eq!(BlockedKernel::from_cache_size(256).unwrap().block_size(), 16);
        assert_eq!(BlockedKernel::from_cache_size(10).unwrap().block_size(), 3);
        assert!(BlockedKernel::from_cache_size(0).is_err());
        assert!(BlockedKernel::new(0).is_err());
    }

    #[test]
    fn test_blocked_matches_naive_for_uneven_tiles() {
        let (m, n, l) = (13, 9, 17);
        let a = sample(m, l, 1);
        let b = sample(l, n, 4);
        let mut expected = Matrix::zeros(m, n).unwrap();
        multiply_naive(&a, &b, &mut expected).unwrap();

        for block in [1, 4, 16, m.max(n).max(l) + 1] {
            let mut c = Matrix::from_fn(m, n, |_, _| 123).unwrap();
            multiply_blocked(&a, &b, &mut c, block).unwrap();
            assert_eq!(c.as_slice(), expected.as_slice(), "block size {}", block);
        }
    }

    #[test]
    fn test_blocked_float_matches_naive_bitwise() {
        let a = Matrix::from_fn(10, 7, |i, j| (i as f64 + 0.1) / (j as f64 + 0.3)).unwrap();
        let b = Matrix::from_fn(7, 5, |i, j| (i as f64 * 0.7) - j as f64).unwrap();
        let mut naive = Matrix::zeros(10, 5).unwrap();
        let mut blocked = Matrix::zeros(10, 5).unwrap();
        multiply_naive(&a, &b, &mut naive).unwrap();
        BlockedKernel::new(3)
            .unwrap()
            .matmul(&a.as_view(), &b.as_view(), &mut blocked.as_view_mut())
            .unwrap();
        assert_eq!(naive.as_slice(), blocked.as_slice());
    }

    #[test]
    fn test_blocked_zero_block_leaves_destination() {
        let a = sample(2, 2, 0);
        let b = sample(2, 2, 1);
        let mut c = Matrix::from_vec(2, 2, vec![9i64, 9, 9, 9]).unwrap();
        assert!(multiply_blocked(&a, &b, &mut c, 0).is_err());
        assert_eq!(c.as_slice(), &[9, 9, 9, 9]);
    }
}
