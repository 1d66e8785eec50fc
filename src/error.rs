//! Error types for the Biblioteca client

use serde::Deserialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The request never got a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Message to show the user, without the variant prefix for server errors
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api { message, .. } => message.clone(),
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::BusinessRule(msg) => {
                msg.clone()
            }
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error body as produced by the server (Spring style)
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Pick the most useful message out of an error response body.
///
/// Order: non-empty `message`, non-empty `error`, raw text, then a generic fallback.
pub fn extract_error_message(body: &str) -> String {
    let structured = serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| {
        b.message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| b.error.filter(|e| !e.trim().is_empty()))
    });

    match structured {
        Some(msg) => msg,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => "Unknown error".to_string(),
    }
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
