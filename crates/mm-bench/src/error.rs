use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("{0}")]
    Matrix(#[from] mm_matrix::MatrixError),
    #[error("{0}")]
    Strassen(#[from] mm_strassen::StrassenError),
    #[error("{left} and {right} disagree at ({row}, {col}): {left_value} vs {right_value}")]
    Mismatch {
        left: String,
        right: String,
        row: usize,
        col: usize,
        left_value: f64,
        right_value: f64,
    },
}

pub type Result<T> = std::result::Result<T, BenchError>;
