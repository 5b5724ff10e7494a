//! Session Store - the process-wide authentication state.
//!
//! One instance is created at startup, restored once from durable storage
//! and then shared (`Arc<SessionStore>`) with everything that needs to know
//! who the learner is.
//!
//! ```text
//!   restoring ──restore()──► signed out ◄──logout()/force_logout()──┐
//!        │                       │                                   │
//!        └──────restore()────────┴──────────login()──────► authenticated
//! ```
//!
//! `restore`, `login` and `logout` are serialized: a login or logout issued
//! while the restore is still reading storage waits for it to settle and
//! then applies on top of it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

use crate::domain::foundation::{SessionToken, UserId};
use crate::domain::session::{Session, SessionError, PERSISTED_TOKEN_KEY, PERSISTED_USER_KEY};
use crate::domain::user::User;
use crate::ports::SessionStorage;

/// Outcome of the startup restore, for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Token and user were found and parsed.
    Restored,
    /// Nothing usable was persisted.
    NoSession,
    /// Persisted values were unreadable and have been discarded.
    Discarded,
    /// `restore` had already run; nothing was done.
    AlreadyRestored,
}

pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: RwLock<Session>,
    restored: AtomicBool,
    /// Held across the storage round trips of a session transition.
    transition: Mutex<()>,
}

impl SessionStore {
    /// Creates a store in the `loading` state.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            state: RwLock::new(Session::restoring()),
            restored: AtomicBool::new(false),
            transition: Mutex::new(()),
        }
    }

    /// Re-establishes the persisted session. Runs at most once.
    ///
    /// Never fails: unreadable or corrupt values are discarded and the
    /// store settles signed out.
    pub async fn restore(&self) -> RestoreOutcome {
        if self.restored.swap(true, Ordering::SeqCst) {
            tracing::warn!("Session restore requested more than once; ignoring");
            return RestoreOutcome::AlreadyRestored;
        }
        let _transition = self.transition.lock().await;

        let token = self.storage.get(PERSISTED_TOKEN_KEY).await;
        let user = self.storage.get(PERSISTED_USER_KEY).await;

        let outcome = match (token, user) {
            (Ok(Some(raw_token)), Ok(Some(raw_user))) => {
                match (
                    SessionToken::new(raw_token),
                    serde_json::from_str::<User>(&raw_user),
                ) {
                    (Ok(token), Ok(user)) => {
                        tracing::info!(user_id = %user.id, "Restored persisted session");
                        self.replace(Session::authenticated(token, user));
                        RestoreOutcome::Restored
                    }
                    (token, user) => {
                        tracing::warn!(
                            token_valid = token.is_ok(),
                            user_error = ?user.err(),
                            "Discarding corrupt persisted session"
                        );
                        self.discard_persisted().await;
                        RestoreOutcome::Discarded
                    }
                }
            }
            (Ok(_), Ok(_)) => {
                tracing::debug!("No persisted session");
                RestoreOutcome::NoSession
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "Could not read persisted session; discarding");
                self.discard_persisted().await;
                RestoreOutcome::Discarded
            }
        };

        if outcome != RestoreOutcome::Restored {
            self.replace(Session::signed_out());
        }
        outcome
    }

    /// Persists the credentials, then marks the session authenticated.
    ///
    /// Replaces any current session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the credentials could not be
    /// persisted; the in-memory session is left unchanged.
    pub async fn login(&self, token: SessionToken, user: User) -> Result<(), SessionError> {
        let _transition = self.transition.lock().await;
        let serialized_user =
            serde_json::to_string(&user).map_err(|e| SessionError::storage(e.to_string()))?;

        self.storage
            .set(PERSISTED_TOKEN_KEY, token.expose())
            .await
            .map_err(|e| SessionError::storage(e.to_string()))?;
        self.storage
            .set(PERSISTED_USER_KEY, &serialized_user)
            .await
            .map_err(|e| SessionError::storage(e.to_string()))?;

        tracing::info!(user_id = %user.id, role = %user.role, "Signed in");
        self.restored.store(true, Ordering::SeqCst);
        self.replace(Session::authenticated(token, user));
        Ok(())
    }

    /// Clears persisted credentials and signs out.
    ///
    /// Always completes locally; a storage failure is logged.
    pub async fn logout(&self) {
        let _transition = self.transition.lock().await;
        self.discard_persisted().await;
        self.restored.store(true, Ordering::SeqCst);
        self.replace(Session::signed_out());
        tracing::info!("Signed out");
    }

    /// Signs out after a remote call rejected the session.
    pub async fn force_logout(&self) {
        tracing::warn!(
            user_id = ?self.user_id().map(|id| id.to_string()),
            "Session rejected by server; signing out"
        );
        self.logout().await;
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading()
    }

    pub fn current_user(&self) -> Option<User> {
        self.read().user().cloned()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.read().user().map(|user| user.id.clone())
    }

    pub fn token(&self) -> Option<SessionToken> {
        self.read().token().cloned()
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    async fn discard_persisted(&self) {
        for key in [PERSISTED_TOKEN_KEY, PERSISTED_USER_KEY] {
            if let Err(e) = self.storage.remove(key).await {
                tracing::warn!(key, error = %e, "Failed to clear persisted session value");
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, session: Session) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = session;
    }
}
