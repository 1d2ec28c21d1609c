// src/errors.rs

use thiserror::Error;

pub type ChatPalResult<T> = Result<T, ChatPalError>;

#[derive(Debug, Error)]
pub enum ChatPalError {
    /// The backend could not be reached at all (connect/send/read failure).
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered, but the body carried nothing displayable.
    #[error("malformed backend response: {message}")]
    MalformedResponse { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ChatPalError {
    pub fn malformed_response(message: impl Into<String>) -> Self {
        ChatPalError::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        ChatPalError::Config {
            message: message.into(),
        }
    }

    /// True for failures where the backend was never reached.
    pub fn is_transport(&self) -> bool {
        matches!(self, ChatPalError::Transport(_))
    }
}
