use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dtype::Element;
use crate::error::{MatrixError, Result};
use crate::view::RowsMut;

/// Fill every cell with a uniformly drawn integer value in `[0, bound)`.
///
/// # Errors
/// Returns `InvalidConfig` if `bound` is zero.
pub fn fill_random<T, M, R>(matrix: &mut M, bound: u32, rng: &mut R) -> Result<()>
where
    T: Element,
    M: RowsMut<T> + ?Sized,
    R: Rng + ?Sized,
{
    if bound == 0 {
        return Err(MatrixError::InvalidConfig(
            "fill bound must be positive".to_string(),
        ));
    }
    for i in 0..matrix.shape().rows {
        for x in matrix.row_mut(i).iter_mut() {
            *x = T::from_u32(rng.gen_range(0..bound));
        }
    }
    Ok(())
}

/// `fill_random` with a `StdRng` seeded from `seed`, for reproducible inputs.
pub fn fill_random_seeded<T, M>(matrix: &mut M, bound: u32, seed: u64) -> Result<()>
where
    T: Element,
    M: RowsMut<T> + ?Sized,
{
    let mut rng = StdRng::seed_from_u64(seed);
    fill_random(matrix, bound, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;

    #[test]
    fn test_values_in_range() {
        let mut m = Matrix::<i32>::zeros(16, 16).unwrap();
        fill_random_seeded(&mut m, 8, 7).unwrap();
        assert!(m.as_slice().iter().all(|&x| (0..8).contains(&x)));
        assert!(m.as_slice().iter().any(|&x| x != 0));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = Matrix::<f64>::zeros(4, 5).unwrap();
        let mut b = Matrix::<f64>::zeros(4, 5).unwrap();
        fill_random_seeded(&mut a, 100, 42).unwrap();
        fill_random_seeded(&mut b, 100, 42).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn test_fill_through_view() {
        let mut m = Matrix::<i64>::zeros(4, 4).unwrap();
        {
            let mut v = m.view_mut(0, 0, 2, 2).unwrap();
            fill_random_seeded(&mut v, 1, 3).unwrap();
        }
        // bound 1 draws only zeros, so the matrix stays zero.
        assert!(m.as_slice().iter().all(|&x| x == 0));
    }

    #[test]
    fn test_zero_bound_rejected() {
        let mut m = Matrix::<i32>::zeros(1, 1).unwrap();
        assert!(fill_random_seeded(&mut m, 0, 1).is_err());
    }
}
