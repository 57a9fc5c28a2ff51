use std::fmt::Debug;

use crate::dtype::Element;
use crate::error::Result;
use crate::view::{MatrixView, MatrixViewMut};

/// A matrix multiplication algorithm: `C = A @ B`.
///
/// - `a`: `[m x l]`
/// - `b`: `[l x n]`
/// - `c`: `[m x n]`, fully overwritten on success
///
/// Implementations validate every shape before writing, so on error `c` is unchanged.
pub trait MatmulKernel: Send + Sync + Debug {
    /// Returns the name of this kernel (e.g., "naive", "blocked", "strassen").
    fn name(&self) -> &str;

    fn matmul<T: Element>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
    ) -> Result<()>;
}
