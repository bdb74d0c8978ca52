//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// No connectivity, connect failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response (rejected transition, unknown order, 5xx ...)
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Success status but the body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credentials missing, expired or refused
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Client could not be built from its configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the caller must re-authenticate before trying again
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Whether the failure is expected to clear up on a later attempt
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Server { .. } | Self::InvalidResponse(_)
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::InvalidResponse(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::Server {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        if err.is_builder() {
            return Self::Config(err.to_string());
        }
        // connect / timeout / request / body transport failures
        Self::Network(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
