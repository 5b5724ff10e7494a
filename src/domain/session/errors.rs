//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by session lifecycle operations.
///
/// Restore never fails outward and logout always completes locally, so the
/// only fallible path is persisting a fresh login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Durable storage refused the write.
    Storage(String),
}

impl SessionError {
    pub fn storage(message: impl Into<String>) -> Self {
        SessionError::Storage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::Storage(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::Storage(msg) => format!("Could not persist session: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<SessionError> for DomainError {
    fn from(err: SessionError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
