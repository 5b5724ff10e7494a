//! Enrollment status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle of one learner's relationship to one course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Never enrolled.
    #[default]
    NotEnrolled,

    /// Enrolled; the learner asked to leave and a local confirmation is
    /// outstanding. Nothing has been sent to the server yet.
    PendingUnenrollConfirmation,

    /// Enrolled.
    Enrolled,

    /// Left the course. May enroll again.
    Unenrolled,
}

impl EnrollmentStatus {
    /// Returns true while the learner holds a seat.
    ///
    /// A pending unenroll still holds its seat until confirmed.
    pub fn holds_seat(&self) -> bool {
        matches!(
            self,
            EnrollmentStatus::Enrolled | EnrollmentStatus::PendingUnenrollConfirmation
        )
    }

    /// Returns true once the learner has enrolled at least once.
    pub fn has_ever_enrolled(&self) -> bool {
        !matches!(self, EnrollmentStatus::NotEnrolled)
    }
}

impl StateMachine for EnrollmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EnrollmentStatus::*;
        matches!(
            (self, target),
            (NotEnrolled, Enrolled)
                | (Enrolled, PendingUnenrollConfirmation)
                | (PendingUnenrollConfirmation, Unenrolled)
                | (PendingUnenrollConfirmation, Enrolled)
                | (Unenrolled, Enrolled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EnrollmentStatus::*;
        match self {
            NotEnrolled => vec![Enrolled],
            Enrolled => vec![PendingUnenrollConfirmation],
            PendingUnenrollConfirmation => vec![Unenrolled, Enrolled],
            Unenrolled => vec![Enrolled],
        }
    }
}
