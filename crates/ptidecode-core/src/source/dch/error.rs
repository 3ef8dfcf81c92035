use thiserror::Error;

#[derive(Debug, Error)]
pub enum DchSourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("empty capture ({context})")]
    Empty { context: String },
}
