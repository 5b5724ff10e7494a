//! Session token value object.
//!
//! The token is an opaque bearer credential issued by the portal backend.
//! It is held inside a `SecretString` so it never leaks through `Debug`
//! output or log lines; callers that must send it over the wire use
//! [`SessionToken::expose`].

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use super::ValidationError;

/// Opaque, non-empty bearer token for an authenticated session.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Creates a token, returning error if empty or whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ValidationError::empty_field("token"));
        }
        Ok(Self(SecretString::new(token)))
    }

    /// Exposes the raw token (for persisting or sending as a bearer header).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SessionToken {}
