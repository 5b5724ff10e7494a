//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the core and the outside world. Adapters implement these ports.
//!
//! - `SessionStorage` - Durable key-value store for the persisted session
//! - `CourseReader` - Authoritative course records
//! - `EnrollmentGateway` - Enroll/unenroll submission
//! - `LessonRepository` - Lesson lists and completion writes
//! - `Registrar` - Account registration
//!
//! Every port fails with the shared [`GatewayError`].

mod course_reader;
mod enrollment_gateway;
mod gateway_error;
mod lesson_repository;
mod registrar;
mod session_storage;

pub use course_reader::CourseReader;
pub use enrollment_gateway::{EnrollmentAction, EnrollmentGateway};
pub use gateway_error::GatewayError;
pub use lesson_repository::LessonRepository;
pub use registrar::Registrar;
pub use session_storage::SessionStorage;
