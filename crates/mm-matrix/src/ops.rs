//! Elementwise kernels over equally shaped matrices or views.
//!
//! Every kernel validates all shapes before writing, so a `ShapeMismatch` leaves the
//! destination untouched. Integer elements wrap on overflow.

use crate::dtype::Element;
use crate::error::{MatrixError, Result};
use crate::view::{Rows, RowsMut};

/// Sign of a term in `signed_sum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

fn zip_with<T, A, B, C>(a: &A, b: &B, c: &mut C, f: impl Fn(T, T) -> T) -> Result<()>
where
    T: Element,
    A: Rows<T> + ?Sized,
    B: Rows<T> + ?Sized,
    C: RowsMut<T> + ?Sized,
{
    let shape = c.shape();
    shape.expect_eq(a.shape())?;
    shape.expect_eq(b.shape())?;
    for i in 0..shape.rows {
        let (ra, rb) = (a.row(i), b.row(i));
        for ((out, &x), &y) in c.row_mut(i).iter_mut().zip(ra).zip(rb) {
            *out = f(x, y);
        }
    }
    Ok(())
}

/// `c[i][j] = a[i][j] + b[i][j]`.
pub fn add<T, A, B, C>(a: &A, b: &B, c: &mut C) -> Result<()>
where
    T: Element,
    A: Rows<T> + ?Sized,
    B: Rows<T> + ?Sized,
    C: RowsMut<T> + ?Sized,
{
    zip_with(a, b, c, T::wrapping_add)
}

/// `c[i][j] = a[i][j] - b[i][j]`.
pub fn sub<T, A, B, C>(a: &A, b: &B, c: &mut C) -> Result<()>
where
    T: Element,
    A: Rows<T> + ?Sized,
    B: Rows<T> + ?Sized,
    C: RowsMut<T> + ?Sized,
{
    zip_with(a, b, c, T::wrapping_sub)
}

/// `dst[i][j] = src[i][j]`.
pub fn copy<T, A, C>(src: &A, dst: &mut C) -> Result<()>
where
    T: Element,
    A: Rows<T> + ?Sized,
    C: RowsMut<T> + ?Sized,
{
    dst.shape().expect_eq(src.shape())?;
    for i in 0..src.shape().rows {
        dst.row_mut(i).copy_from_slice(src.row(i));
    }
    Ok(())
}

/// `dst[i][j] = ±terms[0][i][j] ± terms[1][i][j] ...`, accumulated left to right.
pub fn signed_sum<T, A, C>(terms: &[(Sign, &A)], dst: &mut C) -> Result<()>
where
    T: Element,
    A: Rows<T> + ?Sized,
    C: RowsMut<T> + ?Sized,
{
    let shape = dst.shape();
    if terms.is_empty() {
        return Err(MatrixError::Other("signed_sum: no terms".to_string()));
    }
    for (_, term) in terms {
        shape.expect_eq(term.shape())?;
    }
    for i in 0..shape.rows {
        let out = dst.row_mut(i);
        for (j, x) in out.iter_mut().enumerate() {
            let mut acc = T::zero();
            for (sign, term) in terms {
                let v = term.row(i)[j];
                acc = match sign {
                    Sign::Plus => acc.wrapping_add(v),
                    Sign::Minus => acc.wrapping_sub(v),
                };
            }
            *x = acc;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;

    fn m(rows: usize, cols: usize, data: &[i32]) -> Matrix<i32> {
        Matrix::from_vec(rows, cols, data.to_vec()).unwrap()
    }

    #[test]
    fn test_add_sub() {
        let a = m(2, 2, &[1, 2, 3, 4]);
        let b = m(2, 2, &[10, 20, 30, 40]);
        let mut c = Matrix::zeros(2, 2).unwrap();
        add(&a, &b, &mut c).unwrap();
        assert_eq!(c.as_slice(), &[11, 22, 33, 44]);
        sub(&a, &b, &mut c).unwrap();
        assert_eq!(c.as_slice(), &[-9, -18, -27, -36]);
    }

    #[test]
    fn test_add_over_views() {
        let a = m(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let mut c = Matrix::zeros(3, 3).unwrap();
        {
            let lhs = a.view(0, 0, 2, 2).unwrap();
            let rhs = a.view(1, 1, 2, 2).unwrap();
            let mut out = c.view_mut(1, 0, 2, 2).unwrap();
            add(&lhs, &rhs, &mut out).unwrap();
        }
        assert_eq!(c.as_slice(), &[0, 0, 0, 6, 8, 0, 12, 14, 0]);
    }

    #[test]
    fn test_shape_mismatch_leaves_destination_untouched() {
        let a = m(2, 2, &[1, 2, 3, 4]);
        let b = m(2, 1, &[1, 2]);
        let mut c = m(2, 2, &[7, 7, 7, 7]);
        assert!(matches!(
            add(&a, &b, &mut c),
            Err(MatrixError::ShapeMismatch { .. })
        ));
        assert!(sub(&b, &a, &mut c).is_err());
        assert_eq!(c.as_slice(), &[7, 7, 7, 7]);
    }

    #[test]
    fn test_copy() {
        let a = m(2, 3, &[1, 2, 3, 4, 5, 6]);
        let mut c = Matrix::zeros(2, 3).unwrap();
        copy(&a, &mut c).unwrap();
        assert_eq!(c.as_slice(), a.as_slice());

        let mut wrong = Matrix::<i32>::zeros(3, 2).unwrap();
        assert!(copy(&a, &mut wrong).is_err());
    }

    #[test]
    fn test_signed_sum() {
        let p = m(1, 2, &[1, 2]);
        let q = m(1, 2, &[10, 10]);
        let r = m(1, 2, &[100, 200]);
        let mut out = Matrix::zeros(1, 2).unwrap();
        signed_sum(&[(Sign::Plus, &p), (Sign::Minus, &q), (Sign::Plus, &r)], &mut out).unwrap();
        assert_eq!(out.as_slice(), &[91, 192]);
    }

    #[test]
    fn test_intermediate_overflow_wraps_back() {
        let big = m(1, 2, &[1 << 30, i32::MAX]);
        let mut sum = Matrix::zeros(1, 2).unwrap();
        add(&big, &big, &mut sum).unwrap();
        let mut back = Matrix::zeros(1, 2).unwrap();
        sub(&sum, &big, &mut back).unwrap();
        assert_eq!(back.as_slice(), big.as_slice());

        let mut out = Matrix::zeros(1, 2).unwrap();
        signed_sum(
            &[(Sign::Plus, &big), (Sign::Plus, &big), (Sign::Minus, &big)],
            &mut out,
        )
        .unwrap();
        assert_eq!(out.as_slice(), big.as_slice());
    }

    #[test]
    fn test_signed_sum_rejects_empty_and_mismatched() {
        let mut out = Matrix::<i32>::zeros(1, 2).unwrap();
        let terms: [(Sign, &Matrix<i32>); 0] = [];
        assert!(signed_sum(&terms, &mut out).is_err());
        let wide = m(1, 3, &[1, 2, 3]);
        assert!(signed_sum(&[(Sign::Plus, &wide)], &mut out).is_err());
    }
}
