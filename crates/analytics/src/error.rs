use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("input matrix is empty")]
    EmptyInput,

    #[error("k must be between 1 and {max}, got {got}")]
    InvalidK { got: usize, max: usize },

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("invalid dissimilarity matrix: {0}")]
    InvalidDissimilarity(String),
}
