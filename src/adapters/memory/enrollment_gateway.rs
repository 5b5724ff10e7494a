//! In-memory enrollment gateway.
//!
//! Records every submission and answers from a queue of configured
//! outcomes. Success is the default.
//!
//! # Features
//!
//! - Error injection for failure-path testing
//! - Simulated latency so overlapping submissions can be observed
//! - Call tracking for verification

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::{CourseId, UserId};
use crate::ports::{EnrollmentAction, EnrollmentGateway, GatewayError};

/// One recorded submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub action: EnrollmentAction,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryEnrollmentGateway {
    errors: Arc<Mutex<VecDeque<GatewayError>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<Submission>>>,
}

impl InMemoryEnrollmentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an error for the next submission.
    pub fn with_error(self, error: GatewayError) -> Self {
        self.push_error(error);
        self
    }

    /// Sets simulated latency per submission.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues an error on a gateway already shared with an engine.
    pub fn push_error(&self, error: GatewayError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn get_calls(&self) -> Vec<Submission> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl EnrollmentGateway for InMemoryEnrollmentGateway {
    async fn submit(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        action: EnrollmentAction,
    ) -> Result<(), GatewayError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Submission {
                user_id: user_id.clone(),
                course_id: course_id.clone(),
                action,
            });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self
            .errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
