use crate::error::{MatrixError, Result};
use std::fmt;

/// Logical extent of a matrix or view: `rows` x `cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    /// Total number of elements, or `None` if `rows * cols` overflows.
    pub fn checked_numel(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Returns `ShapeMismatch` unless `self == other`.
    pub fn expect_eq(&self, other: Shape) -> Result<()> {
        if *self != other {
            return Err(MatrixError::ShapeMismatch {
                expected: (self.rows, self.cols),
                got: (other.rows, other.cols),
            });
        }
        Ok(())
    }

    /// Checks that a `[rows x cols]` window at `(row_offset, col_offset)` fits inside `self`.
    pub fn check_window(
        &self,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<()> {
        let fits = row_offset
            .checked_add(rows)
            .is_some_and(|end| end <= self.rows)
            && col_offset
                .checked_add(cols)
                .is_some_and(|end| end <= self.cols);
        if !fits {
            return Err(MatrixError::OutOfBounds {
                row_offset,
                col_offset,
                rows,
                cols,
                owner_rows: self.rows,
                owner_cols: self.cols,
            });
        }
        Ok(())
    }

    /// Validates the operands of `C = A @ B` and returns `(m, n, l)`.
    ///
    /// `a` must be `[m x l]`, `b` must be `[l x n]` and `c` must be `[m x n]`.
    pub fn matmul_dims(a: Shape, b: Shape, c: Shape) -> Result<(usize, usize, usize)> {
        let (m, l, n) = (a.rows, a.cols, b.cols);
        if b.rows != l || c.rows != m || c.cols != n {
            return Err(MatrixError::MatmulMismatch {
                m,
                k: l,
                k2: b.rows,
                n,
                c_rows: c.rows,
                c_cols: c.cols,
            });
        }
        Ok((m, n, l))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}x{}]", self.rows, self.cols)
    }
}
