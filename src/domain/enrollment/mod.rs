//! Enrollment domain module.
//!
//! Eligibility rules and the per-learner, per-course enrollment lifecycle:
//!
//! ```text
//! NotEnrolled ──enroll──▶ Enrolled ──request──▶ PendingUnenrollConfirmation
//!                            ▲   ◀──────cancel──────┘        │
//!                            │                             confirm
//!                            └────────enroll──── Unenrolled ◀┘
//! ```

mod aggregate;
mod eligibility;
mod errors;
mod status;

pub use aggregate::Enrollment;
pub use eligibility::{can_enroll, can_unenroll, Eligibility, IneligibleReason};
pub use errors::EnrollmentError;
pub use status::EnrollmentStatus;
