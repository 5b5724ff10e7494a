//! Session domain module.
//!
//! Holds the in-memory authentication state for the single process-wide
//! session and the errors raised while persisting it.

mod errors;
mod state;

pub use errors::SessionError;
pub use state::{Session, PERSISTED_TOKEN_KEY, PERSISTED_USER_KEY};
