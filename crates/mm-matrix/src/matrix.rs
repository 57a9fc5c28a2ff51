use std::fmt;

use crate::dtype::{DType, Element};
use crate::error::{MatrixError, Result};
use crate::shape::Shape;
use crate::storage::Storage;
use crate::view::{MatrixView, MatrixViewMut, Rows, RowsMut};

/// A dense, row-major matrix that owns its storage.
///
/// The buffer length always equals `rows * cols`; matrices are never resized.
#[derive(Debug, Clone)]
pub struct Matrix<T: Element> {
    storage: Storage<T>,
    shape: Shape,
}

impl<T: Element> Matrix<T> {
    /// Allocate a zero-filled `rows x cols` matrix.
    ///
    /// # Errors
    /// Returns `AllocationFailure` if the buffer cannot be allocated.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        Ok(Matrix {
            storage: Storage::zeros(shape)?,
            shape,
        })
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        if shape.checked_numel() != Some(data.len()) {
            return Err(MatrixError::ShapeMismatch {
                expected: (rows, cols),
                got: (1, data.len()),
            });
        }
        Ok(Matrix {
            storage: Storage::from_vec(data),
            shape,
        })
    }

    /// Create a matrix whose element `(i, j)` is `f(i, j)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        let mut m = Self::zeros(rows, cols)?;
        for i in 0..rows {
            for (j, x) in m.row_mut(i).iter_mut().enumerate() {
                *x = f(i, j);
            }
        }
        Ok(m)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn nrows(&self) -> usize {
        self.shape.rows
    }

    pub fn ncols(&self) -> usize {
        self.shape.cols
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// # Panics
    /// Panics if `(i, j)` is outside the matrix.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.row(i)[j]
    }

    /// # Panics
    /// Panics if `(i, j)` is outside the matrix.
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.row_mut(i)[j] = value;
    }

    pub fn row(&self, i: usize) -> &[T] {
        assert!(i < self.shape.rows, "row {} out of range for {}", i, self.shape);
        let start = i * self.shape.cols;
        &self.storage.as_slice()[start..start + self.shape.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        assert!(i < self.shape.rows, "row {} out of range for {}", i, self.shape);
        let start = i * self.shape.cols;
        &mut self.storage.as_mut_slice()[start..start + self.shape.cols]
    }

    /// The whole buffer in row-major order.
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// A read-only window of `rows x cols` starting at `(row_offset, col_offset)`.
    ///
    /// # Errors
    /// Returns `OutOfBounds` if the window does not fit.
    pub fn view(
        &self,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixView<'_, T>> {
        MatrixView::new(self.as_slice(), self.shape, row_offset, col_offset, rows, cols)
    }

    /// A write-through window of `rows x cols` starting at `(row_offset, col_offset)`.
    ///
    /// # Errors
    /// Returns `OutOfBounds` if the window does not fit.
    pub fn view_mut(
        &mut self,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixViewMut<'_, T>> {
        let shape = self.shape;
        MatrixViewMut::new(
            self.storage.as_mut_slice(),
            shape,
            row_offset,
            col_offset,
            rows,
            cols,
        )
    }

    /// A view of the whole matrix.
    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView::full(self.storage.as_slice(), self.shape)
    }

    /// A mutable view of the whole matrix.
    pub fn as_view_mut(&mut self) -> MatrixViewMut<'_, T> {
        let shape = self.shape;
        MatrixViewMut::full(self.storage.as_mut_slice(), shape)
    }

    /// A `rows x cols` copy of `src` with `src` in the top-left corner and zeros elsewhere.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if `src` is larger than the requested shape.
    pub fn padded(src: &impl Rows<T>, rows: usize, cols: usize) -> Result<Self> {
        let from = src.shape();
        if from.rows > rows || from.cols > cols {
            return Err(MatrixError::ShapeMismatch {
                expected: (rows, cols),
                got: (from.rows, from.cols),
            });
        }
        let mut out = Self::zeros(rows, cols)?;
        for i in 0..from.rows {
            out.row_mut(i)[..from.cols].copy_from_slice(src.row(i));
        }
        Ok(out)
    }
}

impl<T: Element> Rows<T> for Matrix<T> {
    fn shape(&self) -> Shape {
        self.shape
    }

    fn row(&self, i: usize) -> &[T] {
        Matrix::row(self, i)
    }
}

impl<T: Element> RowsMut<T> for Matrix<T> {
    fn row_mut(&mut self, i: usize) -> &mut [T] {
        Matrix::row_mut(self, i)
    }
}

/// Tab-separated rows, one line per row.
impl<T: Element + fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nrows() {
            for x in self.row(i) {
                write!(f, "{}\t", x)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let m = Matrix::<f64>::zeros(2, 3).unwrap();
        assert_eq!(m.shape(), Shape::new(2, 3));
        assert_eq!(m.dtype(), DType::F64);
        assert_eq!(m.as_slice(), &[0.0; 6]);
    }

    #[test]
    fn test_from_vec_row_major() {
        let m = Matrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(m.row(1), &[4, 5, 6]);
        assert_eq!(m.get(0, 2), 3);
    }

    #[test]
    fn test_from_vec_mismatch() {
        assert!(matches!(
            Matrix::from_vec(2, 2, vec![1i32, 2, 3]),
            Err(MatrixError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_from_fn_and_set() {
        let mut m = Matrix::from_fn(3, 2, |i, j| (i * 10 + j) as i32).unwrap();
        assert_eq!(m.as_slice(), &[0, 1, 10, 11, 20, 21]);
        m.set(2, 0, -5);
        assert_eq!(m.get(2, 0), -5);
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_range_panics() {
        let m = Matrix::<i32>::zeros(2, 2).unwrap();
        let _ = m.row(2);
    }

    #[test]
    fn test_padded() {
        let m = Matrix::from_vec(1, 3, vec![1i64, 2, 3]).unwrap();
        let p = Matrix::padded(&m, 2, 4).unwrap();
        assert_eq!(p.as_slice(), &[1, 2, 3, 0, 0, 0, 0, 0]);
        assert!(Matrix::padded(&m, 1, 2).is_err());
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_vec(2, 2, vec![1i32, 2, 3, 4]).unwrap();
        assert_eq!(m.to_string(), "1\t2\t\n3\t4\t\n");
    }
}
