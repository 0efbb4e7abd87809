use thiserror::Error;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Please enter a topic!")]
    EmptyTopic,

    #[error("a roadmap is already being generated")]
    Busy,

    #[error("no task labelled {0:?} in this roadmap")]
    UnknownTask(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure of the outbound generation call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Server responded with status: {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}
