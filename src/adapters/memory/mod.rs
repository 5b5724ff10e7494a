//! In-memory implementations of the remote ports.
//!
//! Used by tests and by offline runs of the binary.

mod course_catalog;
mod enrollment_gateway;
mod lesson_store;

pub use course_catalog::InMemoryCourseCatalog;
pub use enrollment_gateway::{InMemoryEnrollmentGateway, Submission};
pub use lesson_store::InMemoryLessonStore;
