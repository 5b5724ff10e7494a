//! In-memory course catalog.
//!
//! Configurable implementation of the CourseReader port for tests and
//! offline runs.
//!
//! # Example
//!
//! ```ignore
//! let catalog = InMemoryCourseCatalog::new()
//!     .with_course(Course::new(course_id, "Rust 101").with_capacity(30, 12));
//!
//! let course = catalog.fetch_course(&course_id).await?;
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::course::Course;
use crate::domain::foundation::CourseId;
use crate::ports::{CourseReader, GatewayError};

/// Course catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseCatalog {
    courses: Arc<Mutex<HashMap<CourseId, Course>>>,
    /// Errors returned by upcoming fetches, consumed in order.
    errors: Arc<Mutex<VecDeque<GatewayError>>>,
    fetches: Arc<Mutex<Vec<CourseId>>>,
}

impl InMemoryCourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a course.
    pub fn with_course(self, course: Course) -> Self {
        self.upsert(course);
        self
    }

    /// Queues an error for the next fetch.
    pub fn with_error(self, error: GatewayError) -> Self {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(error);
        self
    }

    /// Replaces the authoritative record, as another learner's enrollment would.
    pub fn upsert(&self, course: Course) {
        self.courses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(course.id.clone(), course);
    }

    /// Number of fetches served, including failed ones.
    pub fn fetch_count(&self) -> usize {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl CourseReader for InMemoryCourseCatalog {
    async fn fetch_course(&self, id: &CourseId) -> Result<Course, GatewayError> {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id.clone());

        if let Some(error) = self
            .errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
        {
            return Err(error);
        }

        self.courses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }
}
