//! Domain layer containing business rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `user` - Portal accounts and registration payloads
//! - `session` - Authentication state of the process
//! - `course` - Catalog entries, lessons and enrollment deadlines
//! - `enrollment` - Eligibility rules and the enrollment lifecycle
//! - `progress` - Lesson completion rollups

pub mod course;
pub mod enrollment;
pub mod foundation;
pub mod progress;
pub mod session;
pub mod user;
