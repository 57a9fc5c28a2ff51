use mm_matrix::{
    BlockedKernel, Element, MatmulKernel, MatrixError, MatrixView, MatrixViewMut, NaiveKernel,
};

/// Problem volume (`m * n * l`) below which the engine stops recursing: 64^3.
pub const DEFAULT_THRESHOLD: usize = 64 * 64 * 64;
/// Worker threads in the engine's pool.
pub const DEFAULT_THREADS: usize = 4;

/// Algorithm used once the recursion reaches its base case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseKernel {
    Naive(NaiveKernel),
    Blocked(BlockedKernel),
}

impl Default for BaseKernel {
    fn default() -> Self {
        BaseKernel::Naive(NaiveKernel)
    }
}

impl MatmulKernel for BaseKernel {
    fn name(&self) -> &str {
        match self {
            BaseKernel::Naive(k) => k.name(),
            BaseKernel::Blocked(k) => k.name(),
        }
    }

    fn matmul<T: Element>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
    ) -> mm_matrix::Result<()> {
        match self {
            BaseKernel::Naive(k) => k.matmul(a, b, c),
            BaseKernel::Blocked(k) => k.matmul(a, b, c),
        }
    }
}

/// What to do when a level that recurses has an odd dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OddDimensionPolicy {
    /// Pad the operands with zero rows/columns to the next even size, then crop the result.
    #[default]
    Pad,
    /// Fail with `DimensionPolicyViolation` before doing any work.
    Reject,
}

/// Configuration for the Strassen engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrassenConfig {
    /// Recursion stops once `m * n * l < threshold`. Must be positive.
    pub threshold: usize,
    /// Size of the worker pool. Must be positive.
    pub threads: usize,
    /// Base-case algorithm.
    pub base: BaseKernel,
    /// Handling of odd dimensions.
    pub odd_policy: OddDimensionPolicy,
}

impl Default for StrassenConfig {
    fn default() -> Self {
        StrassenConfig {
            threshold: DEFAULT_THRESHOLD,
            threads: DEFAULT_THREADS,
            base: BaseKernel::default(),
            odd_policy: OddDimensionPolicy::default(),
        }
    }
}

impl StrassenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_base(mut self, base: BaseKernel) -> Self {
        self.base = base;
        self
    }

    pub fn with_odd_policy(mut self, odd_policy: OddDimensionPolicy) -> Self {
        self.odd_policy = odd_policy;
        self
    }

    /// # Errors
    /// Returns `InvalidConfig` for a zero threshold or a zero thread count.
    pub fn validate(&self) -> mm_matrix::Result<()> {
        if self.threshold == 0 {
            return Err(MatrixError::InvalidConfig(
                "threshold must be positive".to_string(),
            ));
        }
        if self.threads == 0 {
            return Err(MatrixError::InvalidConfig(
                "thread count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
