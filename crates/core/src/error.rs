use thiserror::Error;

#[derive(Error, Debug)]
pub enum VizlabError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Inconsistent row length: expected {expected}, got {got}")]
    RaggedRow { expected: usize, got: usize },

    #[error("{0}")]
    Other(String),
}
