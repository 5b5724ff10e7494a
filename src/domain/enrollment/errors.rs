//! Enrollment-specific error types.
//!
//! | Error | Kind |
//! |-------|------|
//! | NotAuthenticated | caller must sign in |
//! | CourseNotFound | catalog miss |
//! | Ineligible | eligibility rule, no state change |
//! | OperationInProgress | double submission rejected locally |
//! | InvalidState | illegal state machine move |
//! | Rejected | server refused the submission |
//! | Transient | network failure or timeout, retry allowed |
//! | SessionExpired | forced logout already performed |

use crate::domain::foundation::{CourseId, DomainError, ErrorCode};

use super::IneligibleReason;

/// Enrollment-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    /// No authenticated session.
    NotAuthenticated,

    /// The course could not be read.
    CourseNotFound(CourseId),

    /// An eligibility rule failed.
    Ineligible(IneligibleReason),

    /// Another enroll/unenroll for this course is still outstanding.
    OperationInProgress(CourseId),

    /// The requested move is not valid from the current status.
    InvalidState { current: String, attempted: String },

    /// The server refused the submission.
    Rejected { reason: String },

    /// Network failure or timeout.
    Transient(String),

    /// The server reported the session as no longer valid.
    SessionExpired,
}

impl EnrollmentError {
    pub fn not_authenticated() -> Self {
        EnrollmentError::NotAuthenticated
    }

    pub fn course_not_found(id: CourseId) -> Self {
        EnrollmentError::CourseNotFound(id)
    }

    pub fn ineligible(reason: IneligibleReason) -> Self {
        EnrollmentError::Ineligible(reason)
    }

    pub fn operation_in_progress(id: CourseId) -> Self {
        EnrollmentError::OperationInProgress(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        EnrollmentError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        EnrollmentError::Rejected {
            reason: reason.into(),
        }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        EnrollmentError::Transient(message.into())
    }

    pub fn session_expired() -> Self {
        EnrollmentError::SessionExpired
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EnrollmentError::NotAuthenticated => ErrorCode::Unauthorized,
            EnrollmentError::CourseNotFound(_) => ErrorCode::CourseNotFound,
            EnrollmentError::Ineligible(_) => ErrorCode::NotEligible,
            EnrollmentError::OperationInProgress(_) => ErrorCode::OperationInProgress,
            EnrollmentError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            EnrollmentError::Rejected { .. } => ErrorCode::RemoteRejected,
            EnrollmentError::Transient(_) => ErrorCode::NetworkError,
            EnrollmentError::SessionExpired => ErrorCode::SessionExpired,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            EnrollmentError::NotAuthenticated => "Please sign in to manage enrollments".to_string(),
            EnrollmentError::CourseNotFound(id) => format!("Course not found: {}", id),
            EnrollmentError::Ineligible(reason) => format!("Cannot enroll: {}", reason),
            EnrollmentError::OperationInProgress(id) => {
                format!("An enrollment change for course {} is already in progress", id)
            }
            EnrollmentError::InvalidState { current, attempted } => {
                format!("Cannot {} while {}", attempted, current)
            }
            EnrollmentError::Rejected { reason } => reason.clone(),
            EnrollmentError::Transient(msg) => {
                format!("Network error. Please check your connection: {}", msg)
            }
            EnrollmentError::SessionExpired => {
                "Your session has expired. Please sign in again".to_string()
            }
        }
    }

    /// Returns true if the learner may simply try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EnrollmentError::Transient(_))
    }
}

impl std::fmt::Display for EnrollmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EnrollmentError {}

impl From<EnrollmentError> for DomainError {
    fn from(err: EnrollmentError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn course_id() -> CourseId {
        CourseId::new("c-1").unwrap()
    }

    #[test]
    fn ineligible_message_includes_reason() {
        let err = EnrollmentError::ineligible(IneligibleReason::PrerequisitesUnmet {
            missing: [CourseId::new("basics").unwrap()].into_iter().collect::<BTreeSet<_>>(),
        });
        assert_eq!(err.code(), ErrorCode::NotEligible);
        assert_eq!(err.to_string(), "Cannot enroll: prerequisites unmet: basics");
    }

    #[test]
    fn operation_in_progress_names_course() {
        let err = EnrollmentError::operation_in_progress(course_id());
        assert!(err.message().contains("c-1"));
        assert_eq!(err.code(), ErrorCode::OperationInProgress);
    }

    #[test]
    fn rejected_surfaces_server_reason_verbatim() {
        let err = EnrollmentError::rejected("Course is archived");
        assert_eq!(err.to_string(), "Course is archived");
    }

    #[test]
    fn only_transient_errors_are_retryable() {
        assert!(EnrollmentError::transient("timeout").is_retryable());
        assert!(!EnrollmentError::rejected("no").is_retryable());
        assert!(!EnrollmentError::session_expired().is_retryable());
        assert!(!EnrollmentError::ineligible(IneligibleReason::AlreadyEnrolled).is_retryable());
    }

    #[test]
    fn converts_to_domain_error() {
        let domain: DomainError = EnrollmentError::course_not_found(course_id()).into();
        assert_eq!(domain.code, ErrorCode::CourseNotFound);
    }
}
