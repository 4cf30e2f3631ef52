use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Unknown randomization interval: {0}")]
    UnknownInterval(String),
}
