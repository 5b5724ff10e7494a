//! Application layer - the stateful services of the portal core.
//!
//! This layer orchestrates domain rules and coordinates between ports.
//!
//! - `SessionStore` - authentication lifecycle, restored once at startup
//! - `EnrollmentEngine` - eligibility and the enroll/unenroll lifecycle
//! - `ProgressAggregator` - lesson completion and progress rollups
//! - `RouteGuard` - navigation gate for learner-only views
//!
//! The Session Store is shared by reference (`Arc`) with the other three;
//! none of them mutate another's state.

mod enrollment_engine;
mod in_flight;
mod progress_aggregator;
mod route_guard;
mod session_store;

pub use enrollment_engine::EnrollmentEngine;
pub use progress_aggregator::ProgressAggregator;
pub use route_guard::{Access, RouteGuard, RouteKind, LOGIN_ROUTE};
pub use session_store::{RestoreOutcome, SessionStore};
