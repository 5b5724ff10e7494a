//! Enrollment aggregate.
//!
//! One `Enrollment` ties one learner to one course. Status changes go
//! through the `EnrollmentStatus` state machine; seat counting lives on the
//! `Course` and is applied by the Enrollment Engine.

use serde::{Deserialize, Serialize};

use super::{EnrollmentError, EnrollmentStatus};
use crate::domain::foundation::{CourseId, StateMachine, Timestamp, UserId};

/// A learner's relationship to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub status: EnrollmentStatus,

    /// When the learner most recently enrolled.
    pub enrolled_at: Option<Timestamp>,

    pub updated_at: Timestamp,
}

impl Enrollment {
    /// A learner who has never enrolled in the course.
    pub fn not_enrolled(user_id: UserId, course_id: CourseId) -> Self {
        Self {
            user_id,
            course_id,
            status: EnrollmentStatus::NotEnrolled,
            enrolled_at: None,
            updated_at: Timestamp::now(),
        }
    }

    /// Records a confirmed enrollment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the learner is `NotEnrolled` or
    /// `Unenrolled`.
    pub fn enroll(&mut self) -> Result<(), EnrollmentError> {
        if self.status.holds_seat() {
            return Err(EnrollmentError::invalid_state(
                format!("{:?}", self.status),
                "enroll",
            ));
        }
        self.transition_to(EnrollmentStatus::Enrolled, "enroll")?;
        self.enrolled_at = Some(self.updated_at);
        Ok(())
    }

    /// Opens the local confirmation gate before unenrolling.
    pub fn request_unenroll(&mut self) -> Result<(), EnrollmentError> {
        self.transition_to(EnrollmentStatus::PendingUnenrollConfirmation, "request unenroll")
    }

    /// Closes the confirmation gate without leaving the course.
    pub fn cancel_unenroll(&mut self) -> Result<(), EnrollmentError> {
        self.require(EnrollmentStatus::PendingUnenrollConfirmation, "cancel unenroll")?;
        self.transition_to(EnrollmentStatus::Enrolled, "cancel unenroll")
    }

    /// Records a confirmed unenrollment.
    pub fn confirm_unenroll(&mut self) -> Result<(), EnrollmentError> {
        self.transition_to(EnrollmentStatus::Unenrolled, "confirm unenroll")
    }

    pub fn has_ever_enrolled(&self) -> bool {
        self.status.has_ever_enrolled()
    }

    fn require(&self, expected: EnrollmentStatus, attempted: &str) -> Result<(), EnrollmentError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(EnrollmentError::invalid_state(
                format!("{:?}", self.status),
                attempted,
            ))
        }
    }

    fn transition_to(
        &mut self,
        target: EnrollmentStatus,
        attempted: &str,
    ) -> Result<(), EnrollmentError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| EnrollmentError::invalid_state(format!("{:?}", self.status), attempted))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
