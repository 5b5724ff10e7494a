//! In-memory lesson store.
//!
//! Implements the LessonRepository port over a map of course id to
//! lessons. Completion writes update the stored lesson so later lists
//! reflect them.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::course::Lesson;
use crate::domain::foundation::{CourseId, LessonId};
use crate::ports::{GatewayError, LessonRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryLessonStore {
    lessons: Arc<Mutex<HashMap<CourseId, Vec<Lesson>>>>,
    /// Errors returned by upcoming completion writes, consumed in order.
    errors: Arc<Mutex<VecDeque<GatewayError>>>,
    delay: Duration,
    writes: Arc<Mutex<Vec<(LessonId, bool)>>>,
}

impl InMemoryLessonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds lessons, grouping them by their course.
    pub fn with_lessons(self, lessons: impl IntoIterator<Item = Lesson>) -> Self {
        {
            let mut by_course = self.lessons.lock().unwrap_or_else(PoisonError::into_inner);
            for lesson in lessons {
                by_course
                    .entry(lesson.course_id.clone())
                    .or_default()
                    .push(lesson);
            }
        }
        self
    }

    /// Queues an error for the next completion write.
    pub fn with_error(self, error: GatewayError) -> Self {
        self.push_error(error);
        self
    }

    /// Sets simulated latency per completion write.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn push_error(&self, error: GatewayError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(error);
    }

    /// Completion writes received, including failed ones.
    pub fn writes(&self) -> Vec<(LessonId, bool)> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The stored completion flag of a lesson.
    pub fn is_completed(&self, lesson_id: &LessonId) -> Option<bool> {
        self.lessons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .flatten()
            .find(|lesson| &lesson.id == lesson_id)
            .map(|lesson| lesson.completed)
    }
}

#[async_trait]
impl LessonRepository for InMemoryLessonStore {
    async fn list_lessons(&self, course_id: &CourseId) -> Result<Vec<Lesson>, GatewayError> {
        self.lessons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(course_id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn set_completion(
        &self,
        lesson_id: &LessonId,
        completed: bool,
    ) -> Result<(), GatewayError> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((lesson_id.clone(), completed));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if let Some(error) = self
            .errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
        {
            return Err(error);
        }

        let mut by_course = self.lessons.lock().unwrap_or_else(PoisonError::into_inner);
        let lesson = by_course
            .values_mut()
            .flatten()
            .find(|lesson| &lesson.id == lesson_id)
            .ok_or(GatewayError::NotFound)?;
        lesson.completed = completed;
        Ok(())
    }
}
