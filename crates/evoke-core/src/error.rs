//! Error types for Evoke

use thiserror::Error;

/// Result type alias using Evoke's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Evoke error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Evaluation errors (E001-E099)
    #[error("Expected answer is empty. Prompts must carry a non-empty expected answer.")]
    EmptyExpectedAnswer,

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Generic errors
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyExpectedAnswer => "E001",
            Self::ConfigError(_) => "E600",
            Self::InvalidInput(_) => "E800",
            Self::Other(_) | Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ConfigError(_) => Some("evoke config list".to_string()),
            _ => None,
        }
    }
}
