use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrassenError {
    #[error("matrix error: {0}")]
    Matrix(#[from] mm_matrix::MatrixError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, StrassenError>;
