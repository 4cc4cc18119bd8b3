//! Error types for the odds feed handler

use thiserror::Error;

/// Odds feed handler errors
///
/// Wire-level junk is never an error: the decoder coerces or drops malformed
/// records (see `state::manager`). These variants cover the transport and
/// configuration boundaries only.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("WebSocket connection error: {0}")]
    Connection(String),

    #[error("WebSocket message error: {0}")]
    Message(String),

    #[error("Handshake error: {0}")]
    Handshake(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for FeedError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        FeedError::Connection(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
