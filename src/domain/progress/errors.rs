//! Progress-specific error types.

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, LessonId};

/// Errors from lesson loading and completion toggling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    /// No authenticated session.
    NotAuthenticated,

    /// The course's lessons could not be found remotely.
    CourseNotFound(CourseId),

    /// The lesson is not among the loaded lessons.
    LessonNotFound(LessonId),

    /// A toggle for this lesson is still outstanding.
    ToggleInProgress(LessonId),

    /// The server refused the change.
    Rejected { reason: String },

    /// Network failure or timeout.
    Transient(String),

    /// The server reported the session as no longer valid.
    SessionExpired,
}

impl ProgressError {
    pub fn lesson_not_found(id: LessonId) -> Self {
        ProgressError::LessonNotFound(id)
    }

    pub fn toggle_in_progress(id: LessonId) -> Self {
        ProgressError::ToggleInProgress(id)
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        ProgressError::Rejected {
            reason: reason.into(),
        }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        ProgressError::Transient(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProgressError::NotAuthenticated => ErrorCode::Unauthorized,
            ProgressError::CourseNotFound(_) => ErrorCode::CourseNotFound,
            ProgressError::LessonNotFound(_) => ErrorCode::LessonNotFound,
            ProgressError::ToggleInProgress(_) => ErrorCode::OperationInProgress,
            ProgressError::Rejected { .. } => ErrorCode::RemoteRejected,
            ProgressError::Transient(_) => ErrorCode::NetworkError,
            ProgressError::SessionExpired => ErrorCode::SessionExpired,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ProgressError::NotAuthenticated => "Please sign in to track progress".to_string(),
            ProgressError::CourseNotFound(id) => format!("Course not found: {}", id),
            ProgressError::LessonNotFound(id) => format!("Lesson not found: {}", id),
            ProgressError::ToggleInProgress(id) => {
                format!("Lesson {} is already being updated", id)
            }
            ProgressError::Rejected { reason } => reason.clone(),
            ProgressError::Transient(msg) => format!("Failed to update lesson status: {}", msg),
            ProgressError::SessionExpired => {
                "Your session has expired. Please sign in again".to_string()
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ProgressError::Transient(_))
    }
}

impl std::fmt::Display for ProgressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProgressError {}

impl From<ProgressError> for DomainError {
    fn from(err: ProgressError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
