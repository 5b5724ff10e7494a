//! In-memory session state.

use crate::domain::foundation::SessionToken;
use crate::domain::user::User;

/// Storage key under which the bearer token is persisted.
pub const PERSISTED_TOKEN_KEY: &str = "token";

/// Storage key under which the serialized [`User`] is persisted.
pub const PERSISTED_USER_KEY: &str = "user";

/// Authentication state of the process.
///
/// # Invariants
///
/// - `is_authenticated()` holds iff both token and user are present
///   (both are non-empty by construction of their types)
/// - `loading` is true only before the startup restore has settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<SessionToken>,
    user: Option<User>,
    loading: bool,
}

impl Session {
    /// State before the startup restore has run.
    pub fn restoring() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
        }
    }

    /// Settled, unauthenticated state.
    pub fn signed_out() -> Self {
        Self {
            token: None,
            user: None,
            loading: false,
        }
    }

    /// Settled, authenticated state.
    pub fn authenticated(token: SessionToken, user: User) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
            loading: false,
        }
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns true iff both a token and a user are present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::restoring()
    }
}
