//! Progress rollups.
//!
//! Snapshots are derived on every read from the current lesson and
//! enrollment collections. Nothing here is cached or patched in place.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::domain::course::Lesson;
use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{CourseId, Percentage};

/// Completion of a single course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course_id: CourseId,
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub percent_complete: Percentage,
}

impl CourseProgress {
    /// Zero progress for a course with no lessons.
    pub fn empty(course_id: CourseId) -> Self {
        Self {
            course_id,
            completed_lessons: 0,
            total_lessons: 0,
            percent_complete: Percentage::ZERO,
        }
    }

    /// A course is complete when it has lessons and all of them are done.
    pub fn is_complete(&self) -> bool {
        self.total_lessons > 0 && self.completed_lessons == self.total_lessons
    }
}

/// Dashboard-level rollup for one learner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProgress {
    pub completed_courses: usize,
    pub total_courses: usize,
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub overall_percent: Percentage,
}

/// Rolls a course's lessons up into a [`CourseProgress`].
///
/// Lessons belonging to other courses are ignored.
pub fn course_progress(course_id: &CourseId, lessons: &[Lesson]) -> CourseProgress {
    let (completed, total) = lessons
        .iter()
        .filter(|lesson| &lesson.course_id == course_id)
        .fold((0usize, 0usize), |(completed, total), lesson| {
            (completed + usize::from(lesson.completed), total + 1)
        });

    CourseProgress {
        course_id: course_id.clone(),
        completed_lessons: completed,
        total_lessons: total,
        percent_complete: Percentage::from_ratio(completed, total),
    }
}

/// Distinct courses the learner has enrolled in at least once.
fn enrolled_course_ids(enrollments: &[Enrollment]) -> BTreeSet<&CourseId> {
    enrollments
        .iter()
        .filter(|enrollment| enrollment.has_ever_enrolled())
        .map(|enrollment| &enrollment.course_id)
        .collect()
}

/// Rolls every course the learner has ever enrolled in into a dashboard
/// snapshot.
///
/// A course counts as completed when all of its lessons are completed,
/// whatever its current enrollment status.
pub fn learner_progress(
    enrollments: &[Enrollment],
    lessons_by_course: &HashMap<CourseId, Vec<Lesson>>,
) -> LearnerProgress {
    let mut progress = LearnerProgress::default();

    for course_id in enrolled_course_ids(enrollments) {
        let lessons = lessons_by_course
            .get(course_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let course = course_progress(course_id, lessons);

        progress.total_courses += 1;
        progress.completed_courses += usize::from(course.is_complete());
        progress.completed_lessons += course.completed_lessons;
        progress.total_lessons += course.total_lessons;
    }

    progress.overall_percent =
        Percentage::from_ratio(progress.completed_lessons, progress.total_lessons);
    progress
}

/// Ids of enrolled courses whose lessons are all completed.
pub fn completed_course_ids(
    enrollments: &[Enrollment],
    lessons_by_course: &HashMap<CourseId, Vec<Lesson>>,
) -> BTreeSet<CourseId> {
    enrolled_course_ids(enrollments)
        .into_iter()
        .filter(|course_id| {
            let lessons = lessons_by_course
                .get(*course_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            course_progress(course_id, lessons).is_complete()
        })
        .cloned()
        .collect()
}

/// First incomplete lesson by `order`.
pub fn next_lesson(lessons: &[Lesson]) -> Option<&Lesson> {
    lessons
        .iter()
        .filter(|lesson| !lesson.completed)
        .min_by_key(|lesson| lesson.order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{LessonId, UserId};

    fn course(id: &str) -> CourseId {
        CourseId::new(id).unwrap()
    }

    fn lessons(course_id: &str, completed: usize, total: usize) -> Vec<Lesson> {
        (0..total)
            .map(|i| {
                let lesson = Lesson::new(
                    LessonId::new(format!("{}-{}", course_id, i)).unwrap(),
                    course(course_id),
                    i as u32 + 1,
                    10,
                );
                if i < completed {
                    lesson.completed()
                } else {
                    lesson
                }
            })
            .collect()
    }

    fn enrolled(course_id: &str) -> Enrollment {
        let mut e = Enrollment::not_enrolled(UserId::new("u-1").unwrap(), course(course_id));
        e.enroll().unwrap();
        e
    }

    #[test]
    fn course_with_no_lessons_is_all_zero() {
        let progress = course_progress(&course("empty"), &[]);
        assert_eq!(progress, CourseProgress::empty(course("empty")));
        assert!(!progress.is_complete());
    }

    #[test]
    fn course_progress_rounds_percentage() {
        let progress = course_progress(&course("react"), &lessons("react", 9, 12));
        assert_eq!(progress.completed_lessons, 9);
        assert_eq!(progress.total_lessons, 12);
        assert_eq!(progress.percent_complete.value(), 75);
    }

    #[test]
    fn course_progress_ignores_foreign_lessons() {
        let mut mixed = lessons("a", 1, 2);
        mixed.extend(lessons("b", 3, 3));
        let progress = course_progress(&course("a"), &mixed);
        assert_eq!(progress.total_lessons, 2);
        assert_eq!(progress.completed_lessons, 1);
    }

    #[test]
    fn learner_progress_sums_over_enrolled_courses() {
        let enrollments = vec![enrolled("react"), enrolled("js"), enrolled("node")];
        let by_course: HashMap<_, _> = [
            (course("react"), lessons("react", 12, 12)),
            (course("js"), lessons("js", 7, 15)),
            (course("node"), lessons("node", 1, 20)),
        ]
        .into_iter()
        .collect();

        let progress = learner_progress(&enrollments, &by_course);
        assert_eq!(progress.total_courses, 3);
        assert_eq!(progress.completed_courses, 1);
        assert_eq!(progress.completed_lessons, 20);
        assert_eq!(progress.total_lessons, 47);
        assert_eq!(progress.overall_percent.value(), 43);
    }

    #[test]
    fn never_enrolled_courses_are_excluded() {
        let never = Enrollment::not_enrolled(UserId::new("u-1").unwrap(), course("skip"));
        let by_course: HashMap<_, _> = [(course("skip"), lessons("skip", 2, 2))].into_iter().collect();
        let progress = learner_progress(&[never], &by_course);
        assert_eq!(progress, LearnerProgress::default());
    }

    #[test]
    fn unenrolled_course_still_counts_once() {
        let mut left = enrolled("rust");
        left.request_unenroll().unwrap();
        left.confirm_unenroll().unwrap();
        let by_course: HashMap<_, _> = [(course("rust"), lessons("rust", 4, 4))].into_iter().collect();

        let progress = learner_progress(&[left.clone(), left], &by_course);
        assert_eq!(progress.total_courses, 1);
        assert_eq!(progress.completed_courses, 1);
    }

    #[test]
    fn enrolled_course_without_loaded_lessons_counts_as_empty() {
        let progress = learner_progress(&[enrolled("new")], &HashMap::new());
        assert_eq!(progress.total_courses, 1);
        assert_eq!(progress.completed_courses, 0);
        assert_eq!(progress.overall_percent.value(), 0);
    }

    #[test]
    fn completed_course_ids_lists_fully_done_courses() {
        let enrollments = vec![enrolled("a"), enrolled("b")];
        let by_course: HashMap<_, _> = [
            (course("a"), lessons("a", 3, 3)),
            (course("b"), lessons("b", 2, 3)),
        ]
        .into_iter()
        .collect();
        let done: Vec<_> = completed_course_ids(&enrollments, &by_course).into_iter().collect();
        assert_eq!(done, vec![course("a")]);
    }

    #[test]
    fn next_lesson_is_lowest_order_incomplete() {
        let mut list = lessons("a", 2, 5);
        list.reverse();
        let next = next_lesson(&list).unwrap();
        assert_eq!(next.order, 3);
        assert!(next_lesson(&lessons("a", 5, 5)).is_none());
    }
}
