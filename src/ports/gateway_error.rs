//! Boundary failure shared by every remote and storage port.

use thiserror::Error;

/// Failure reported by a port implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The remote side no longer accepts the session (401-equivalent).
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    /// The remote side refused the request.
    #[error("Rejected: {reason}")]
    Rejected { reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl GatewayError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        GatewayError::Rejected {
            reason: reason.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        GatewayError::Network(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        GatewayError::Storage(message.into())
    }

    /// Returns true when the caller's session must be discarded.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, GatewayError::Unauthorized)
    }

    /// Returns true for failures a user may retry unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(self, GatewayError::Network(_) | GatewayError::Timeout)
    }
}
