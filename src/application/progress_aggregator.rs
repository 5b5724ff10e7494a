//! Progress Aggregator - lesson completion and progress rollups.
//!
//! Lessons are loaded per course and held here; this is the only place a
//! lesson's `completed` flag changes, and only after the repository has
//! accepted the write. Rollups are recomputed from the held lessons on
//! every call.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::in_flight::InFlight;
use super::SessionStore;
use crate::domain::course::Lesson;
use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{CourseId, LessonId};
use crate::domain::progress::{self, CourseProgress, LearnerProgress, ProgressError};
use crate::ports::{GatewayError, LessonRepository};

pub struct ProgressAggregator {
    session: Arc<SessionStore>,
    repository: Arc<dyn LessonRepository>,
    lessons: Mutex<HashMap<CourseId, Vec<Lesson>>>,
    toggling: InFlight<LessonId>,
}

impl ProgressAggregator {
    pub fn new(session: Arc<SessionStore>, repository: Arc<dyn LessonRepository>) -> Self {
        Self {
            session,
            repository,
            lessons: Mutex::new(HashMap::new()),
            toggling: InFlight::new(),
        }
    }

    /// Loads a course's lessons, ordered by `order`, replacing any held copy.
    pub async fn load_lessons(&self, course_id: &CourseId) -> Result<Vec<Lesson>, ProgressError> {
        let mut lessons = match self.repository.list_lessons(course_id).await {
            Ok(lessons) => lessons,
            Err(GatewayError::NotFound) => {
                return Err(ProgressError::CourseNotFound(course_id.clone()))
            }
            Err(e) => return Err(self.remote_failure(e).await),
        };
        lessons.retain(|lesson| &lesson.course_id == course_id);
        lessons.sort_by_key(|lesson| lesson.order);

        tracing::debug!(%course_id, count = lessons.len(), "Loaded lessons");
        self.lock().insert(course_id.clone(), lessons.clone());
        Ok(lessons)
    }

    /// Flips one lesson's completion flag.
    ///
    /// The flag changes locally only after the repository accepts the
    /// write; on failure the caller observes the pre-toggle state.
    ///
    /// # Errors
    ///
    /// - `NotAuthenticated` without a session
    /// - `LessonNotFound` if the lesson's course has not been loaded
    /// - `ToggleInProgress` while a toggle of the same lesson is outstanding
    /// - `Rejected`, `Transient`, `SessionExpired` from the repository
    pub async fn toggle_lesson_completion(&self, lesson_id: &LessonId) -> Result<Lesson, ProgressError> {
        if !self.session.is_authenticated() {
            return Err(ProgressError::NotAuthenticated);
        }

        let _guard = self
            .toggling
            .try_begin(lesson_id.clone())
            .ok_or_else(|| ProgressError::toggle_in_progress(lesson_id.clone()))?;

        let target = !self
            .find_lesson(lesson_id)
            .ok_or_else(|| ProgressError::lesson_not_found(lesson_id.clone()))?
            .completed;

        if let Err(e) = self.repository.set_completion(lesson_id, target).await {
            tracing::warn!(%lesson_id, completed = target, error = %e, "Lesson toggle failed");
            return Err(match e {
                GatewayError::NotFound => ProgressError::lesson_not_found(lesson_id.clone()),
                other => self.remote_failure(other).await,
            });
        }

        let mut lessons = self.lock();
        let lesson = lessons
            .values_mut()
            .flatten()
            .find(|lesson| &lesson.id == lesson_id)
            .ok_or_else(|| ProgressError::lesson_not_found(lesson_id.clone()))?;
        lesson.completed = target;

        tracing::info!(%lesson_id, completed = target, "Lesson completion updated");
        Ok(lesson.clone())
    }

    /// The held lessons of a course, ordered by `order`.
    pub fn lessons(&self, course_id: &CourseId) -> Vec<Lesson> {
        self.lock().get(course_id).cloned().unwrap_or_default()
    }

    pub fn course_progress(&self, course_id: &CourseId) -> CourseProgress {
        match self.lock().get(course_id) {
            Some(lessons) => progress::course_progress(course_id, lessons),
            None => CourseProgress::empty(course_id.clone()),
        }
    }

    /// Dashboard rollup over every course in `enrollments` ever enrolled in.
    pub fn learner_progress(&self, enrollments: &[Enrollment]) -> LearnerProgress {
        progress::learner_progress(enrollments, &self.lock())
    }

    /// Courses whose lessons are all completed, usable as completed
    /// prerequisites when checking eligibility.
    pub fn completed_course_ids(&self, enrollments: &[Enrollment]) -> BTreeSet<CourseId> {
        progress::completed_course_ids(enrollments, &self.lock())
    }

    /// First incomplete lesson of a course.
    pub fn next_lesson(&self, course_id: &CourseId) -> Option<Lesson> {
        self.lock()
            .get(course_id)
            .and_then(|lessons| progress::next_lesson(lessons).cloned())
    }

    pub fn is_toggling(&self, lesson_id: &LessonId) -> bool {
        self.toggling.contains(lesson_id)
    }

    fn find_lesson(&self, lesson_id: &LessonId) -> Option<Lesson> {
        self.lock()
            .values()
            .flatten()
            .find(|lesson| &lesson.id == lesson_id)
            .cloned()
    }

    async fn remote_failure(&self, error: GatewayError) -> ProgressError {
        match error {
            GatewayError::Unauthorized => {
                self.session.force_logout().await;
                ProgressError::SessionExpired
            }
            GatewayError::Rejected { reason } => ProgressError::rejected(reason),
            other => ProgressError::transient(other.to_string()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CourseId, Vec<Lesson>>> {
        self.lessons.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
