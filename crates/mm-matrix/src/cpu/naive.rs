use crate::dtype::Element;
use crate::error::Result;
use crate::kernel::MatmulKernel;
use crate::shape::Shape;
use crate::view::{MatrixView, MatrixViewMut, Rows, RowsMut};

/// Triple-loop multiplication: `c[i][j] = sum_k a[i][k] * b[k][j]`.
///
/// Each cell is zeroed before accumulation. Integer elements wrap on overflow.
pub fn multiply_naive<T, A, B, C>(a: &A, b: &B, c: &mut C) -> Result<()>
where
    T: Element,
    A: Rows<T> + ?Sized,
    B: Rows<T> + ?Sized,
    C: RowsMut<T> + ?Sized,
{
    let (m, n, l) = Shape::matmul_dims(a.shape(), b.shape(), c.shape())?;
    for i in 0..m {
        let a_row = a.row(i);
        for j in 0..n {
            let mut sum = T::zero();
            for (k, &x) in a_row.iter().enumerate().take(l) {
                sum = sum.wrapping_add(x.wrapping_mul(b.row(k)[j]));
            }
            c.row_mut(i)[j] = sum;
        }
    }
    Ok(())
}

/// Kernel wrapper around `multiply_naive`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaiveKernel;

impl NaiveKernel {
    pub fn new() -> Self {
        NaiveKernel
    }
}

impl MatmulKernel for NaiveKernel {
    fn name(&self) -> &str {
        "naive"
    }

    fn matmul<T: Element>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
    ) -> Result<()> {
        multiply_naive(a, b, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;
    use crate::matrix::Matrix;

    #[test]
    fn test_matmul_identity() {
        let a = Matrix::from_vec(2, 2, vec![1, 0, 0, 1]).unwrap();
        let x = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let mut c = Matrix::zeros(2, 2).unwrap();
        multiply_naive(&a, &x, &mut c).unwrap();
        assert_eq!(c.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_matmul_basic() {
        // [1,2;3,4] @ [5,6;7,8] = [19,22;43,50]
        let a = Matrix::from_vec(2, 2, vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![5.0f32, 6.0, 7.0, 8.0]).unwrap();
        let mut c = Matrix::zeros(2, 2).unwrap();
        NaiveKernel
            .matmul(&a.as_view(), &b.as_view(), &mut c.as_view_mut())
            .unwrap();
        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_matmul_rectangular_overwrites_destination() {
        // [1x3] @ [3x2]
        let a = Matrix::from_vec(1, 3, vec![1i64, 2, 3]).unwrap();
        let b = Matrix::from_vec(3, 2, vec![1i64, 4, 2, 5, 3, 6]).unwrap();
        let mut c = Matrix::from_vec(1, 2, vec![99i64, 99]).unwrap();
        multiply_naive(&a, &b, &mut c).unwrap();
        assert_eq!(c.as_slice(), &[14, 32]);
    }

    #[test]
    fn test_matmul_empty_inner_dimension_zeroes_output() {
        let a = Matrix::<i32>::zeros(2, 0).unwrap();
        let b = Matrix::<i32>::zeros(0, 2).unwrap();
        let mut c = Matrix::from_vec(2, 2, vec![5, 5, 5, 5]).unwrap();
        multiply_naive(&a, &b, &mut c).unwrap();
        assert_eq!(c.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_matmul_dimension_mismatch() {
        let a = Matrix::<i32>::zeros(1, 3).unwrap();
        let b = Matrix::<i32>::zeros(2, 2).unwrap();
        let mut c = Matrix::from_vec(1, 2, vec![1, 1]).unwrap();
        assert!(matches!(
            multiply_naive(&a, &b, &mut c),
            Err(MatrixError::MatmulMismatch { .. })
        ));
        assert_eq!(c.as_slice(), &[1, 1]);
    }

    #[test]
    fn test_name() {
        assert_eq!(NaiveKernel::new().name(), "naive");
    }
}
