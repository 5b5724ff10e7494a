//! Enroll/unenroll submission port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::GatewayError;
use crate::domain::foundation::{CourseId, UserId};

/// What the learner asked the server to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentAction {
    Enroll,
    Unenroll,
}

impl fmt::Display for EnrollmentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentAction::Enroll => write!(f, "enroll"),
            EnrollmentAction::Unenroll => write!(f, "unenroll"),
        }
    }
}

/// Submits enrollment changes to the remote side.
///
/// # Contract
///
/// A retried enroll on an already-enrolled course must not double-count
/// capacity. The remote side enforces this; callers only guarantee that
/// they never have two submissions for the same course outstanding.
#[async_trait]
pub trait EnrollmentGateway: Send + Sync {
    async fn submit(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        action: EnrollmentAction,
    ) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn EnrollmentGateway) {}
    }

    #[test]
    fn action_displays_lowercase() {
        assert_eq!(EnrollmentAction::Enroll.to_string(), "enroll");
        assert_eq!(EnrollmentAction::Unenroll.to_string(), "unenroll");
    }
}
