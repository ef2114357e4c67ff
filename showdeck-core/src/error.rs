use thiserror::Error;

use crate::providers::ProviderError;

#[derive(Error, Debug)]
pub enum ShowError {
    #[error("{0} was not found")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ProviderError> for ShowError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound => ShowError::NotFound("series".to_string()),
            ProviderError::Network(e) => ShowError::Transport(e.to_string()),
            ProviderError::ApiError(msg) => ShowError::Transport(msg),
            ProviderError::Parse(msg) => ShowError::Parse(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShowError>;
