//! User module - Portal accounts and registration payloads.
//!
//! - `account` - The authenticated identity held by the Session Store
//! - `registration` - Role-discriminated sign-up payloads

mod account;
mod registration;

pub use account::{Role, User};
pub use registration::{CoachingProfile, Registration, RegistrationProfile, StudentProfile};
