//! Course read port.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::course::Course;
use crate::domain::foundation::CourseId;

/// Reads the authoritative course record.
#[async_trait]
pub trait CourseReader: Send + Sync {
    /// Fetches a course by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the course does not exist
    /// - `Unauthorized` if the session was rejected
    /// - `Network`/`Timeout` on transport failure
    async fn fetch_course(&self, id: &CourseId) -> Result<Course, GatewayError>;
}
