use crate::dtype::Element;
use crate::error::Result;
use crate::view::Rows;

/// First cell at which two matrices disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch<T> {
    pub row: usize,
    pub col: usize,
    pub left: T,
    pub right: T,
}

/// Find the first cell where `a` and `b` differ by more than `tolerance`.
///
/// Integer elements compare exactly regardless of `tolerance`.
///
/// # Errors
/// Returns `ShapeMismatch` if the shapes differ.
pub fn first_mismatch<T, A, B>(a: &A, b: &B, tolerance: f64) -> Result<Option<Mismatch<T>>>
where
    T: Element,
    A: Rows<T> + ?Sized,
    B: Rows<T> + ?Sized,
{
    a.shape().expect_eq(b.shape())?;
    for i in 0..a.shape().rows {
        for (j, (&left, &right)) in a.row(i).iter().zip(b.row(i)).enumerate() {
            if !left.approx_eq(right, tolerance) {
                return Ok(Some(Mismatch {
                    row: i,
                    col: j,
                    left,
                    right,
                }));
            }
        }
    }
    Ok(None)
}

/// Whether `a` and `b` agree using the element type's default tolerance:
/// exact for integers, relative for floating point.
pub fn matrices_match<T, A, B>(a: &A, b: &B) -> Result<bool>
where
    T: Element,
    A: Rows<T> + ?Sized,
    B: Rows<T> + ?Sized,
{
    Ok(first_mismatch(a, b, T::DTYPE.default_tolerance())?.is_none())
}
