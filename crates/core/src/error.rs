use thiserror::Error;

pub type BidderResult<T> = Result<T, BidderError>;

#[derive(Error, Debug)]
pub enum BidderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Optimizer backend rejected the request: {0}")]
    Backend(String),

    #[error("Optimizer backend unreachable: {0}")]
    Unreachable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
