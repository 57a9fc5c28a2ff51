use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("matmul dimension mismatch: [{m}x{k}] @ [{k2}x{n}] -> [{c_rows}x{c_cols}]")]
    MatmulMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
        c_rows: usize,
        c_cols: usize,
    },
    #[error(
        "view [{rows}x{cols}] at offset ({row_offset}, {col_offset}) exceeds owner [{owner_rows}x{owner_cols}]"
    )]
    OutOfBounds {
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
        owner_rows: usize,
        owner_cols: usize,
    },
    #[error("cannot allocate a [{rows}x{cols}] matrix")]
    AllocationFailure { rows: usize, cols: usize },
    #[error("dimension policy violation at level {level}: cannot halve [{m}, {n}, {l}]")]
    DimensionPolicyViolation {
        level: usize,
        m: usize,
        n: usize,
        l: usize,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MatrixError>;
