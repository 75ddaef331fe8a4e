use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("History disabled by configuration")]
    Disabled,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response shape: {0}")]
    Shape(String),
}

impl From<reqwest::Error> for HistoryError {
    fn from(err: reqwest::Error) -> Self {
        HistoryError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HistoryError>;
