//! Lesson list read and completion write port.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::course::Lesson;
use crate::domain::foundation::{CourseId, LessonId};

#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Fetches every lesson of a course. Order is not guaranteed.
    async fn list_lessons(&self, course_id: &CourseId) -> Result<Vec<Lesson>, GatewayError>;

    /// Persists a lesson's completion flag.
    ///
    /// Only after this returns `Ok` may the caller apply the flag locally.
    async fn set_completion(&self, lesson_id: &LessonId, completed: bool)
        -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn LessonRepository) {}
    }
}
