// Reference CPU kernels. Both are sequential: parallelism lives one level up,
// in the recursive engines that call these as their base case.
mod blocked;
mod naive;

pub use blocked::{multiply_blocked, BlockedKernel, DEFAULT_CACHE_SIZE};
pub use naive::{multiply_naive, NaiveKernel};
