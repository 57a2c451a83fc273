pub mod config;
pub mod format;
pub mod messages;
pub mod reveal;
pub mod session;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum GenbotError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl From<std::io::Error> for GenbotError {
    fn from(e: std::io::Error) -> Self {
        GenbotError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for GenbotError {
    fn from(e: serde_json::Error) -> Self {
        GenbotError::SessionError(e.to_string())
    }
}

impl GenbotError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Caller handed us something we can't reveal; retrying won't help
            GenbotError::InvalidInput(_) => false,
            // The message is still shown, just without the image
            GenbotError::ImageDecode(_) => true,
            // A broken session file just means logging in again
            GenbotError::SessionError(_) => true,
            GenbotError::IOError(_) => false,
            GenbotError::ConfigError(_) => false,
            GenbotError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            GenbotError::InvalidInput(_) => {
                "The response could not be displayed.".to_string()
            }
            GenbotError::ImageDecode(_) => {
                "The generated image could not be decoded.".to_string()
            }
            GenbotError::SessionError(_) => {
                "Your saved session could not be restored. Please log in again.".to_string()
            }
            GenbotError::IOError(_) => "File system error occurred.".to_string(),
            GenbotError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            GenbotError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GenbotError>;
