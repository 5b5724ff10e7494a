//! Lesson entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseId, LessonId};

/// A single lesson of a course.
///
/// `completed` is only ever flipped through the Progress Aggregator, after
/// the remote store has accepted the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub course_id: CourseId,
    #[serde(default)]
    pub title: String,
    pub order: u32,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub completed: bool,
}

impl Lesson {
    pub fn new(id: LessonId, course_id: CourseId, order: u32, duration_minutes: u32) -> Self {
        Self {
            id,
            course_id,
            title: String::new(),
            order,
            duration_minutes,
            completed: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lesson_is_incomplete() {
        let lesson = Lesson::new(
            LessonId::new("l-1").unwrap(),
            CourseId::new("c-1").unwrap(),
            1,
            15,
        );
        assert!(!lesson.completed);
        assert!(lesson.title.is_empty());
    }

    #[test]
    fn lesson_deserializes_from_wire_shape() {
        let raw = r#"{"id":"l-2","courseId":"c-1","title":"Ownership","order":2,"durationMinutes":25,"completed":true}"#;
        let lesson: Lesson = serde_json::from_str(raw).unwrap();
        assert_eq!(lesson.order, 2);
        assert_eq!(lesson.duration_minutes, 25);
        assert!(lesson.completed);
    }
}
