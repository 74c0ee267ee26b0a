//! Error types for wfm-core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias using wfm-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Fixed message for a forecast response that is not a sequence of numbers.
pub const INVALID_PREDICTION_FORMAT: &str = "Received invalid prediction format";

/// Fixed message for a schedule response that is not a sequence of blocks.
pub const INVALID_SCHEDULE_FORMAT: &str = "Received invalid schedule format";

/// Core error types for planning operations
#[derive(Error, Debug)]
pub enum Error {
    // Local input errors
    #[error("{0}")]
    Validation(#[from] ValidationError),

    // Remote call failed or answered with a non-success status
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    // Remote call succeeded but the body had the wrong structure
    #[error("{message}")]
    Shape { message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Structural classification of a stage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Transport,
    Shape,
    Config,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Transport => "transport",
            ErrorKind::Shape => "shape",
            ErrorKind::Config => "config",
        };
        write!(f, "{}", s)
    }
}

impl Error {
    /// Create a transport error for a non-success HTTP status.
    pub fn http_status(status: u16, body: impl AsRef<str>) -> Self {
        Self::Transport {
            status: Some(status),
            message: format!("HTTP error! Status: {}, Message: {}", status, body.as_ref()),
        }
    }

    /// Create a transport error for a request that never produced a status.
    pub fn network(reason: impl std::fmt::Display) -> Self {
        Self::Transport {
            status: None,
            message: format!("Request failed: {}", reason),
        }
    }

    /// Create a shape error with a fixed message.
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    /// Structural kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Shape { .. } => ErrorKind::Shape,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    /// HTTP status reported by the remote side, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message_carries_status_and_body() {
        let err = Error::http_status(500, "internal error");
        let msg = err.to_string();

        assert!(msg.contains("500"));
        assert!(msg.contains("internal error"));
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_shape_error_uses_fixed_message() {
        let err = Error::shape(INVALID_PREDICTION_FORMAT);
        assert_eq!(err.to_string(), "Received invalid prediction format");
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_validation_error_converts() {
        let err: Error = ValidationError::InvalidRange.into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "End week must be greater than or equal to start week"
        );
    }
}
