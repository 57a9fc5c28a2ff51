use std::sync::atomic::{AtomicUsize, Ordering};

use crate::dtype::Element;
use crate::error::{MatrixError, Result};
use crate::shape::Shape;

static LIVE_BUFFERS: AtomicUsize = AtomicUsize::new(0);

/// Number of matrix buffers currently alive in this process.
///
/// Every `Storage` increments the count on construction and decrements it on drop,
/// so the value returns to its starting point once all scratch buffers are released.
pub fn live_matrices() -> usize {
    LIVE_BUFFERS.load(Ordering::SeqCst)
}

/// Contiguous, row-major element buffer owned by a `Matrix`.
///
/// The length is fixed at construction and always equals `rows * cols`.
#[derive(Debug)]
pub struct Storage<T> {
    data: Vec<T>,
}

impl<T: Element> Storage<T> {
    /// Allocate zero-filled storage for `shape`.
    ///
    /// # Errors
    /// Returns `AllocationFailure` if `rows * cols` overflows or the allocator refuses
    /// the request.
    pub fn zeros(shape: Shape) -> Result<Self> {
        let failure = || MatrixError::AllocationFailure {
            rows: shape.rows,
            cols: shape.cols,
        };
        let n = shape.checked_numel().ok_or_else(failure)?;
        #[cfg(feature = "fault-injection")]
        if fault::should_fail() {
            return Err(failure());
        }
        let mut data = Vec::new();
        data.try_reserve_exact(n).map_err(|_| failure())?;
        data.resize(n, T::zero());
        Ok(Self::track(data))
    }

    /// Wrap an existing vector. The caller guarantees the length matches its shape.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self::track(data)
    }

    fn track(data: Vec<T>) -> Self {
        LIVE_BUFFERS.fetch_add(1, Ordering::SeqCst);
        Storage { data }
    }

    /// Number of elements in this storage.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the storage contains no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Element> Clone for Storage<T> {
    fn clone(&self) -> Self {
        Self::track(self.data.clone())
    }
}

impl<T> Drop for Storage<T> {
    fn drop(&mut self) {
        LIVE_BUFFERS.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Deterministic allocation failures, for exercising error paths deep inside callers.
#[cfg(feature = "fault-injection")]
pub mod fault {
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DISARMED: usize = usize::MAX;

    static REMAINING: AtomicUsize = AtomicUsize::new(DISARMED);

    /// Let the next `successes` calls to `Storage::zeros` succeed, then fail exactly one.
    ///
    /// The counter is process-wide and shared by all threads.
    pub fn fail_allocation_after(successes: usize) {
        REMAINING.store(successes, Ordering::SeqCst);
    }

    /// Cancel a pending failure.
    pub fn disarm() {
        REMAINING.store(DISARMED, Ordering::SeqCst);
    }

    pub(crate) fn should_fail() -> bool {
        let previous = REMAINING.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |r| match r {
            DISARMED => None,
            0 => Some(DISARMED),
            r => Some(r - 1),
        });
        previous == Ok(0)
    }
}
