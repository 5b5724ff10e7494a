//! Enrollment eligibility rules.
//!
//! Checks run in a fixed order and only the first failing reason is
//! reported:
//!
//! 1. already enrolled
//! 2. capacity full
//! 3. deadline passed
//! 4. prerequisites unmet (with the missing set)

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::EnrollmentStatus;
use crate::domain::course::Course;
use crate::domain::foundation::{CourseId, Timestamp};

/// Why a learner may not enroll right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IneligibleReason {
    AlreadyEnrolled,
    CapacityFull { capacity: u32, current_enrollments: u32 },
    DeadlinePassed { deadline: Timestamp },
    PrerequisitesUnmet { missing: BTreeSet<CourseId> },
}

impl IneligibleReason {
    /// Short machine-stable label for the reason.
    pub fn label(&self) -> &'static str {
        match self {
            IneligibleReason::AlreadyEnrolled => "already enrolled",
            IneligibleReason::CapacityFull { .. } => "capacity full",
            IneligibleReason::DeadlinePassed { .. } => "deadline passed",
            IneligibleReason::PrerequisitesUnmet { .. } => "prerequisites unmet",
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibleReason::PrerequisitesUnmet { missing } => {
                let ids: Vec<&str> = missing.iter().map(CourseId::as_str).collect();
                write!(f, "{}: {}", self.label(), ids.join(", "))
            }
            _ => f.write_str(self.label()),
        }
    }
}

/// Outcome of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Ineligible(IneligibleReason),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    pub fn reason(&self) -> Option<&IneligibleReason> {
        match self {
            Eligibility::Eligible => None,
            Eligibility::Ineligible(reason) => Some(reason),
        }
    }
}

/// Decides whether a learner in `status` may enroll in `course` at `now`.
///
/// A pending unenroll confirmation still counts as enrolled.
pub fn can_enroll(
    course: &Course,
    status: EnrollmentStatus,
    completed_prerequisites: &BTreeSet<CourseId>,
    now: &Timestamp,
) -> Eligibility {
    if status.holds_seat() {
        return Eligibility::Ineligible(IneligibleReason::AlreadyEnrolled);
    }

    if let Some(capacity) = course.capacity.filter(|_| course.is_full()) {
        return Eligibility::Ineligible(IneligibleReason::CapacityFull {
            capacity,
            current_enrollments: course.current_enrollments,
        });
    }

    if let Some(deadline) = course
        .enrollment_deadline
        .filter(|_| course.is_deadline_passed(now))
    {
        return Eligibility::Ineligible(IneligibleReason::DeadlinePassed { deadline });
    }

    let missing = course.missing_prerequisites(completed_prerequisites);
    if !missing.is_empty() {
        return Eligibility::Ineligible(IneligibleReason::PrerequisitesUnmet { missing });
    }

    Eligibility::Eligible
}

/// A learner may start unenrolling only while enrolled.
pub fn can_unenroll(status: EnrollmentStatus) -> bool {
    status == EnrollmentStatus::Enrolled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CourseId {
        CourseId::new(s).unwrap()
    }

    fn set(ids: &[&str]) -> BTreeSet<CourseId> {
        ids.iter().map(|s| id(s)).collect()
    }

    fn course() -> Course {
        Course::new(id("react-201"), "React")
    }

    #[test]
    fn unconstrained_course_is_eligible() {
        let result = can_enroll(&course(), EnrollmentStatus::NotEnrolled, &set(&[]), &Timestamp::now());
        assert!(result.is_eligible());
        assert_eq!(result.reason(), None);
    }

    #[test]
    fn already_enrolled_is_reported_first() {
        let now = Timestamp::now();
        let c = course()
            .with_capacity(1, 1)
            .with_deadline(now.minus_days(1))
            .with_prerequisites([id("js-101")]);
        let result = can_enroll(&c, EnrollmentStatus::Enrolled, &set(&[]), &now);
        assert_eq!(result, Eligibility::Ineligible(IneligibleReason::AlreadyEnrolled));
    }

    #[test]
    fn pending_confirmation_counts_as_enrolled() {
        let result = can_enroll(
            &course(),
            EnrollmentStatus::PendingUnenrollConfirmation,
            &set(&[]),
            &Timestamp::now(),
        );
        assert_eq!(result, Eligibility::Ineligible(IneligibleReason::AlreadyEnrolled));
    }

    #[test]
    fn capacity_is_checked_before_deadline_and_prerequisites() {
        let now = Timestamp::now();
        let c = course()
            .with_capacity(2, 2)
            .with_deadline(now.minus_days(1))
            .with_prerequisites([id("js-101")]);
        let result = can_enroll(&c, EnrollmentStatus::NotEnrolled, &set(&[]), &now);
        assert_eq!(result.reason().map(IneligibleReason::label), Some("capacity full"));
    }

    #[test]
    fn deadline_is_checked_before_prerequisites() {
        let now = Timestamp::now();
        let c = course()
            .with_deadline(now.minus_days(1))
            .with_prerequisites([id("js-101")]);
        let result = can_enroll(&c, EnrollmentStatus::Unenrolled, &set(&[]), &now);
        assert_eq!(result.reason().map(IneligibleReason::label), Some("deadline passed"));
    }

    #[test]
    fn unmet_prerequisites_report_missing_set() {
        let c = course().with_prerequisites([id("html"), id("css"), id("js")]);
        let result = can_enroll(&c, EnrollmentStatus::NotEnrolled, &set(&["css"]), &Timestamp::now());
        assert_eq!(
            result,
            Eligibility::Ineligible(IneligibleReason::PrerequisitesUnmet {
                missing: set(&["html", "js"]),
            })
        );
        assert_eq!(
            result.reason().unwrap().to_string(),
            "prerequisites unmet: html, js"
        );
    }

    #[test]
    fn superset_of_prerequisites_is_eligible() {
        let c = course().with_prerequisites([id("html"), id("css")]);
        let result = can_enroll(
            &c,
            EnrollmentStatus::NotEnrolled,
            &set(&["html", "css", "extra"]),
            &Timestamp::now(),
        );
        assert!(result.is_eligible());
    }

    #[test]
    fn future_deadline_with_free_seats_is_eligible() {
        let now = Timestamp::now();
        let c = course().with_capacity(2, 1).with_deadline(now.plus_days(2));
        assert!(can_enroll(&c, EnrollmentStatus::NotEnrolled, &set(&[]), &now).is_eligible());
    }

    #[test]
    fn can_unenroll_only_when_enrolled() {
        assert!(can_unenroll(EnrollmentStatus::Enrolled));
        assert!(!can_unenroll(EnrollmentStatus::PendingUnenrollConfirmation));
        assert!(!can_unenroll(EnrollmentStatus::NotEnrolled));
        assert!(!can_unenroll(EnrollmentStatus::Unenrolled));
    }

    #[test]
    fn zero_capacity_course_is_full_for_eligibility_too() {
        let c = course().with_capacity(0, 0);
        assert!(c.is_full());
        let result = can_enroll(&c, EnrollmentStatus::NotEnrolled, &set(&[]), &Timestamp::now());
        assert_eq!(
            result.reason(),
            Some(&IneligibleReason::CapacityFull {
                capacity: 0,
                current_enrollments: 0
            })
        );
    }

    #[test]
    fn enrolling_at_the_deadline_instant_is_allowed() {
        let now = Timestamp::now();
        let c = course().with_deadline(now);
        assert!(!c.is_deadline_passed(&now));
        assert!(can_enroll(&c, EnrollmentStatus::Unenrolled, &set(&[]), &now).is_eligible());
    }
}
