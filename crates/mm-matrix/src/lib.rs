//! `mm-matrix` - Dense matrices and base multiplication kernels for the mm workspace.
//!
//! This crate provides:
//! - A `Matrix` type owning a contiguous row-major buffer
//! - `MatrixView` / `MatrixViewMut` zero-copy windows (quadrants, sub-blocks)
//! - Elementwise add/sub/copy kernels over matrices and views
//! - Naive and cache-blocked multiplication behind the `MatmulKernel` trait
//! - Element types (`i32`, `i64`, `f16`, `f32`, `f64`), random fill and tolerant comparison

pub mod compare;
pub mod cpu;
pub mod dtype;
pub mod error;
pub mod fill;
pub mod kernel;
pub mod matrix;
pub mod ops;
pub mod shape;
pub mod storage;
pub mod view;

// Re-export primary types at the crate root for convenience.
pub use compare::{first_mismatch, matrices_match, Mismatch};
pub use cpu::{multiply_blocked, multiply_naive, BlockedKernel, NaiveKernel, DEFAULT_CACHE_SIZE};
pub use dtype::{DType, Element};
pub use error::{MatrixError, Result};
pub use fill::{fill_random, fill_random_seeded};
pub use kernel::MatmulKernel;
pub use matrix::Matrix;
pub use ops::Sign;
pub use shape::Shape;
pub use storage::live_matrices;

#[cfg(feature = "fault-injection")]
pub use storage::fault;
pub use view::{MatrixView, MatrixViewMut, Rows, RowsMut};
