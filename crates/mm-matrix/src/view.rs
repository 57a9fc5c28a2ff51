//! Zero-copy windows into a matrix.
//!
//! A view keeps one slice per aliased row: construction costs O(rows) and never copies
//! elements. The borrow checker ties every view to the buffer it aliases, and mutable
//! views are only handed out over pairwise-disjoint regions.

use crate::dtype::Element;
use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;
use crate::shape::Shape;

/// Row-indexed read access shared by owned matrices and views.
pub trait Rows<T> {
    /// Logical extent.
    fn shape(&self) -> Shape;

    /// Row `i`, exactly `shape().cols` elements long.
    ///
    /// # Panics
    /// Panics if `i >= shape().rows`.
    fn row(&self, i: usize) -> &[T];

    fn get(&self, i: usize, j: usize) -> T
    where
        T: Copy,
    {
        self.row(i)[j]
    }
}

/// Row-indexed write access shared by owned matrices and mutable views.
pub trait RowsMut<T>: Rows<T> {
    fn row_mut(&mut self, i: usize) -> &mut [T];

    fn set(&mut self, i: usize, j: usize, value: T) {
        self.row_mut(i)[j] = value;
    }
}

/// A read-only `rows x cols` window into a larger row-major buffer.
#[derive(Debug, Clone)]
pub struct MatrixView<'a, T> {
    rows: Vec<&'a [T]>,
    cols: usize,
}

impl<'a, T> MatrixView<'a, T> {
    /// Build a view over `data`, which is laid out row-major with shape `owner`.
    pub fn new(
        data: &'a [T],
        owner: Shape,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        owner.check_window(row_offset, col_offset, rows, cols)?;
        let stride = owner.cols;
        let rows = (row_offset..row_offset + rows)
            .map(|r| {
                let start = r * stride + col_offset;
                &data[start..start + cols]
            })
            .collect();
        Ok(MatrixView { rows, cols })
    }

    /// View all of `data`, laid out row-major with shape `shape`.
    pub(crate) fn full(data: &'a [T], shape: Shape) -> Self {
        let rows = (0..shape.rows)
            .map(|r| &data[r * shape.cols..(r + 1) * shape.cols])
            .collect();
        MatrixView {
            rows,
            cols: shape.cols,
        }
    }

    /// A window into this view; offsets are relative to the view's own origin.
    pub fn subview(
        &self,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixView<'a, T>> {
        Rows::shape(self).check_window(row_offset, col_offset, rows, cols)?;
        let rows = self.rows[row_offset..row_offset + rows]
            .iter()
            .map(|&row| &row[col_offset..col_offset + cols])
            .collect();
        Ok(MatrixView { rows, cols })
    }

    /// Split into `[top-left, top-right, bottom-left, bottom-right]`, each
    /// `half_rows x half_cols`.
    pub fn quadrants(&self, half_rows: usize, half_cols: usize) -> Result<[MatrixView<'a, T>; 4]> {
        Ok([
            self.subview(0, 0, half_rows, half_cols)?,
            self.subview(0, half_cols, half_rows, half_cols)?,
            self.subview(half_rows, 0, half_rows, half_cols)?,
            self.subview(half_rows, half_cols, half_rows, half_cols)?,
        ])
    }
}

impl<T: Element> MatrixView<'_, T> {
    /// Copy the viewed region into a freshly allocated matrix.
    pub fn to_matrix(&self) -> Result<Matrix<T>> {
        let mut out = Matrix::zeros(self.rows.len(), self.cols)?;
        crate::ops::copy(self, &mut out)?;
        Ok(out)
    }
}

impl<T> Rows<T> for MatrixView<'_, T> {
    fn shape(&self) -> Shape {
        Shape::new(self.rows.len(), self.cols)
    }

    fn row(&self, i: usize) -> &[T] {
        self.rows[i]
    }
}

/// A write-through `rows x cols` window into a larger row-major buffer.
#[derive(Debug)]
pub struct MatrixViewMut<'a, T> {
    rows: Vec<&'a mut [T]>,
    cols: usize,
}

impl<'a, T> MatrixViewMut<'a, T> {
    /// Build a mutable view over `data`, which is laid out row-major with shape `owner`.
    pub fn new(
        data: &'a mut [T],
        owner: Shape,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        owner.check_window(row_offset, col_offset, rows, cols)?;
        if owner.cols == 0 {
            let rows = (0..rows).map(|_| <&mut [T] as Default>::default()).collect();
            return Ok(MatrixViewMut { rows, cols });
        }
        let rows = data
            .chunks_exact_mut(owner.cols)
            .skip(row_offset)
            .take(rows)
            .map(|row| &mut row[col_offset..col_offset + cols])
            .collect();
        Ok(MatrixViewMut { rows, cols })
    }

    /// View all of `data`, laid out row-major with shape `shape`.
    pub(crate) fn full(data: &'a mut [T], shape: Shape) -> Self {
        if shape.cols == 0 {
            let rows = (0..shape.rows)
                .map(|_| <&mut [T] as Default>::default())
                .collect();
            return MatrixViewMut { rows, cols: 0 };
        }
        MatrixViewMut {
            rows: data.chunks_exact_mut(shape.cols).collect(),
            cols: shape.cols,
        }
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView {
            rows: self.rows.iter().map(|row| &**row).collect(),
            cols: self.cols,
        }
    }

    /// Reborrow the whole view for a shorter lifetime.
    pub fn reborrow(&mut self) -> MatrixViewMut<'_, T> {
        MatrixViewMut {
            rows: self.rows.iter_mut().map(|row| &mut **row).collect(),
            cols: self.cols,
        }
    }

    /// Reborrow a window of this view for a shorter lifetime.
    pub fn subview_mut(
        &mut self,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixViewMut<'_, T>> {
        Rows::shape(self).check_window(row_offset, col_offset, rows, cols)?;
        let rows = self.rows[row_offset..row_offset + rows]
            .iter_mut()
            .map(|row| &mut row[col_offset..col_offset + cols])
            .collect();
        Ok(MatrixViewMut { rows, cols })
    }

    /// Split into four pairwise-disjoint mutable quadrants
    /// `[top-left, top-right, bottom-left, bottom-right]`, each `half_rows x half_cols`.
    ///
    /// Rows and columns beyond `2 * half_rows` / `2 * half_cols` are not covered.
    pub fn into_quadrants(
        self,
        half_rows: usize,
        half_cols: usize,
    ) -> Result<[MatrixViewMut<'a, T>; 4]> {
        let shape = Rows::shape(&self);
        if half_rows * 2 > shape.rows || half_cols * 2 > shape.cols {
            return Err(MatrixError::OutOfBounds {
                row_offset: half_rows,
                col_offset: half_cols,
                rows: half_rows,
                cols: half_cols,
                owner_rows: shape.rows,
                owner_cols: shape.cols,
            });
        }

        let quadrant = || MatrixViewMut {
            rows: Vec::with_capacity(half_rows),
            cols: half_cols,
        };
        let [mut q11, mut q12, mut q21, mut q22] = [quadrant(), quadrant(), quadrant(), quadrant()];

        for (i, row) in self.rows.into_iter().take(half_rows * 2).enumerate() {
            let (left, right) = row.split_at_mut(half_cols);
            let right = &mut right[..half_cols];
            if i < half_rows {
                q11.rows.push(left);
                q12.rows.push(right);
            } else {
                q21.rows.push(left);
                q22.rows.push(right);
            }
        }
        Ok([q11, q12, q21, q22])
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Copy,
    {
        for row in self.rows.iter_mut() {
            row.fill(value);
        }
    }
}

impl<T> Rows<T> for MatrixViewMut<'_, T> {
    fn shape(&self) -> Shape {
        Shape::new(self.rows.len(), self.cols)
    }

    fn row(&self, i: usize) -> &[T] {
        &self.rows[i]
    }
}

impl<T> RowsMut<T> for MatrixViewMut<'_, T> {
    fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.rows[i]
    }
}
