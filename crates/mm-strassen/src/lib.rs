//! `mm-strassen` - Parallel recursive Strassen multiplication.
//!
//! The engine splits each operand into quadrant views (no copies), computes Strassen's
//! seven products as independent tasks on a rayon pool sized once per engine, joins them,
//! and recombines. Below a volume threshold it falls back to a base kernel from
//! `mm-matrix`.
//!
//! ```no_run
//! use mm_matrix::Matrix;
//! use mm_strassen::{Strassen, StrassenConfig};
//!
//! let a = Matrix::<f64>::zeros(256, 256)?;
//! let b = Matrix::<f64>::zeros(256, 256)?;
//! let mut c = Matrix::<f64>::zeros(256, 256)?;
//! let engine = Strassen::new(StrassenConfig::default())?;
//! engine.multiply(&a, &b, &mut c)?;
//! # Ok::<(), mm_strassen::StrassenError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod recursion;

pub use config::{
    BaseKernel, OddDimensionPolicy, StrassenConfig, DEFAULT_THREADS, DEFAULT_THRESHOLD,
};
pub use engine::{multiply, Strassen};
pub use error::{Result, StrassenError};
