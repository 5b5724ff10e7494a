//! Property tests for eligibility ordering and progress rollups.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use proptest::prelude::*;

use course_portal::adapters::memory::InMemoryLessonStore;
use course_portal::adapters::storage::InMemorySessionStorage;
use course_portal::application::{ProgressAggregator, SessionStore};
use course_portal::domain::course::{Course, Lesson};
use course_portal::domain::enrollment::{can_enroll, EnrollmentStatus, IneligibleReason};
use course_portal::domain::foundation::{CourseId, LessonId, SessionToken, Timestamp, UserId};
use course_portal::domain::progress::{course_progress, next_lesson};
use course_portal::domain::user::{Role, User};

fn course_id(n: u8) -> CourseId {
    CourseId::new(format!("c-{}", n)).unwrap()
}

fn id_set(ids: &[u8]) -> BTreeSet<CourseId> {
    ids.iter().copied().map(course_id).collect()
}

fn seatless_status() -> impl Strategy<Value = EnrollmentStatus> {
    prop_oneof![
        Just(EnrollmentStatus::NotEnrolled),
        Just(EnrollmentStatus::Unenrolled)
    ]
}

fn lessons_from(flags: &[bool]) -> Vec<Lesson> {
    flags
        .iter()
        .enumerate()
        .map(|(i, &done)| {
            let lesson = Lesson::new(
                LessonId::new(format!("l-{}", i)).unwrap(),
                course_id(0),
                i as u32,
                5,
            );
            if done {
                lesson.completed()
            } else {
                lesson
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn full_course_reports_capacity_before_other_rules(
        capacity in 0u32..50,
        overflow in 0u32..5,
        deadline_offset in -30i64..30,
        prerequisites in prop::collection::vec(1u8..20, 0..5),
        completed in prop::collection::vec(1u8..20, 0..5),
        status in seatless_status(),
    ) {
        let now = Timestamp::now();
        let course = Course::new(course_id(0), "Full")
            .with_capacity(capacity, capacity + overflow)
            .with_deadline(now.plus_days(deadline_offset))
            .with_prerequisites(id_set(&prerequisites));

        let result = can_enroll(&course, status, &id_set(&completed), &now);
        let is_capacity_full = matches!(
            result.reason(),
            Some(IneligibleReason::CapacityFull { .. })
        );
        prop_assert!(is_capacity_full);
    }

    #[test]
    fn passed_deadline_refuses_open_course(
        days_late in 1i64..365,
        prerequisites in prop::collection::vec(1u8..20, 0..5),
        status in seatless_status(),
    ) {
        let now = Timestamp::now();
        let deadline = now.minus_days(days_late);
        let course = Course::new(course_id(0), "Closed")
            .with_deadline(deadline)
            .with_prerequisites(id_set(&prerequisites));

        let result = can_enroll(&course, status, &BTreeSet::new(), &now);
        prop_assert_eq!(
            result.reason(),
            Some(&IneligibleReason::DeadlinePassed { deadline })
        );
    }

    #[test]
    fn eligible_exactly_when_prerequisites_are_covered(
        prerequisites in prop::collection::vec(1u8..12, 0..6),
        completed in prop::collection::vec(1u8..12, 0..10),
    ) {
        let required = id_set(&prerequisites);
        let done = id_set(&completed);
        let course = Course::new(course_id(0), "Open").with_prerequisites(required.clone());

        let result = can_enroll(&course, EnrollmentStatus::NotEnrolled, &done, &Timestamp::now());
        prop_assert_eq!(result.is_eligible(), required.is_subset(&done));
        if let Some(IneligibleReason::PrerequisitesUnmet { missing }) = result.reason() {
            let expected: BTreeSet<CourseId> = required.difference(&done).cloned().collect();
            prop_assert_eq!(missing, &expected);
        }
    }

    #[test]
    fn seat_holders_are_always_already_enrolled(
        capacity in 0u32..5,
        days_late in 1i64..10,
    ) {
        let now = Timestamp::now();
        let course = Course::new(course_id(0), "Any")
            .with_capacity(capacity, capacity)
            .with_deadline(now.minus_days(days_late));

        for status in [EnrollmentStatus::Enrolled, EnrollmentStatus::PendingUnenrollConfirmation] {
            let result = can_enroll(&course, status, &BTreeSet::new(), &now);
            prop_assert_eq!(result.reason(), Some(&IneligibleReason::AlreadyEnrolled));
        }
    }

    #[test]
    fn course_percentage_stays_in_range_and_tracks_counts(
        flags in prop::collection::vec(any::<bool>(), 0..40),
    ) {
        let lessons = lessons_from(&flags);
        let progress = course_progress(&course_id(0), &lessons);
        let done = flags.iter().filter(|f| **f).count();

        prop_assert_eq!(progress.total_lessons, flags.len());
        prop_assert_eq!(progress.completed_lessons, done);
        prop_assert!(progress.percent_complete.value() <= 100);
        prop_assert_eq!(progress.percent_complete.value() == 100, done == flags.len() && !flags.is_empty());
        prop_assert_eq!(progress.percent_complete.value() == 0, done * 200 < flags.len() || flags.is_empty());
        prop_assert_eq!(progress.is_complete(), !flags.is_empty() && done == flags.len());
    }

    #[test]
    fn next_lesson_is_lowest_ordered_incomplete(
        flags in prop::collection::vec(any::<bool>(), 0..20),
    ) {
        let lessons = lessons_from(&flags);
        let expected = flags.iter().position(|done| !done);
        prop_assert_eq!(next_lesson(&lessons).map(|l| l.order as usize), expected);
    }

    #[test]
    fn toggling_a_lesson_twice_restores_its_state(
        flags in prop::collection::vec(any::<bool>(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let lessons = lessons_from(&flags);
        let target = lessons[pick.index(lessons.len())].clone();

        let (before, after_one, after_two) = runtime.block_on(async {
            let session = Arc::new(SessionStore::new(Arc::new(InMemorySessionStorage::new())));
            session
                .login(
                    SessionToken::new("tok").unwrap(),
                    User::new(UserId::new("u-1").unwrap(), "Ada", "ada@example.com", Role::Student)
                        .unwrap(),
                )
                .await
                .unwrap();
            let store = InMemoryLessonStore::new().with_lessons(lessons.clone());
            let aggregator = ProgressAggregator::new(session, Arc::new(store));
            aggregator.load_lessons(&course_id(0)).await.unwrap();

            let before = aggregator.course_progress(&course_id(0));
            aggregator.toggle_lesson_completion(&target.id).await.unwrap();
            let after_one = aggregator.course_progress(&course_id(0));
            aggregator.toggle_lesson_completion(&target.id).await.unwrap();
            let after_two = aggregator.course_progress(&course_id(0));
            (before, after_one, after_two)
        });

        let delta = if target.completed { -1 } else { 1 };
        prop_assert_eq!(
            after_one.completed_lessons as i64,
            before.completed_lessons as i64 + delta
        );
        prop_assert_eq!(after_two, before);
    }
}

#[test]
fn dashboard_counts_each_course_once() {
    use course_portal::domain::enrollment::Enrollment;
    use course_portal::domain::progress::learner_progress;

    let user = UserId::new("u-1").unwrap();
    let mut enrolled = Enrollment::not_enrolled(user.clone(), course_id(0));
    enrolled.enroll().unwrap();
    let never = Enrollment::not_enrolled(user, course_id(1));

    let mut lessons = HashMap::new();
    lessons.insert(course_id(0), lessons_from(&[true, false]));
    lessons.insert(course_id(1), lessons_from(&[true]));

    let progress = learner_progress(&[enrolled.clone(), enrolled, never], &lessons);
    assert_eq!(progress.total_courses, 1);
    assert_eq!(progress.total_lessons, 2);
    assert_eq!(progress.overall_percent.value(), 50);
}
