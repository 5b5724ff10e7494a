//! Enrollment Engine - eligibility and the enroll/unenroll lifecycle.
//!
//! The engine owns every `Enrollment` of the signed-in learner and a cache
//! of the `Course` records it has read. Remote submissions go through the
//! `EnrollmentGateway`; local state changes only after the gateway
//! confirms.
//!
//! At most one enroll/unenroll may be outstanding per (learner, course).
//! A request arriving while one is outstanding is refused with
//! `OperationInProgress` before anything is sent.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::in_flight::InFlight;
use super::SessionStore;
use crate::domain::course::Course;
use crate::domain::enrollment::{
    can_enroll, can_unenroll, Eligibility, Enrollment, EnrollmentError, EnrollmentStatus,
};
use crate::domain::foundation::{CourseId, Timestamp, UserId};
use crate::ports::{CourseReader, EnrollmentAction, EnrollmentGateway, GatewayError};

type EnrollmentKey = (UserId, CourseId);

#[derive(Default)]
struct EngineState {
    courses: HashMap<CourseId, Course>,
    enrollments: HashMap<EnrollmentKey, Enrollment>,
}

pub struct EnrollmentEngine {
    session: Arc<SessionStore>,
    courses: Arc<dyn CourseReader>,
    gateway: Arc<dyn EnrollmentGateway>,
    state: Mutex<EngineState>,
    in_flight: InFlight<EnrollmentKey>,
}

impl EnrollmentEngine {
    pub fn new(
        session: Arc<SessionStore>,
        courses: Arc<dyn CourseReader>,
        gateway: Arc<dyn EnrollmentGateway>,
    ) -> Self {
        Self {
            session,
            courses,
            gateway,
            state: Mutex::new(EngineState::default()),
            in_flight: InFlight::new(),
        }
    }

    // === Commands ===

    /// Enrolls the signed-in learner in a course.
    ///
    /// Eligibility is evaluated against the cached course record and
    /// `completed_prerequisites`. On success the enrollment becomes
    /// `Enrolled` and the course's enrollment count rises by one.
    ///
    /// # Errors
    ///
    /// - `NotAuthenticated` without a session
    /// - `OperationInProgress` while another change for the course is outstanding
    /// - `Ineligible` with the first failing rule
    /// - `Rejected`, `Transient`, `SessionExpired` from the submission;
    ///   state is unchanged in every case
    pub async fn enroll(
        &self,
        course_id: &CourseId,
        completed_prerequisites: &BTreeSet<CourseId>,
    ) -> Result<Enrollment, EnrollmentError> {
        let user_id = self.require_user()?;
        let key = (user_id.clone(), course_id.clone());
        let _guard = self.in_flight.try_begin(key.clone()).ok_or_else(|| {
            tracing::debug!(%course_id, "Enroll refused: change already in flight");
            EnrollmentError::operation_in_progress(course_id.clone())
        })?;

        let course = self.load_course(course_id).await?;
        let status = self.status_for(&key);

        if let Eligibility::Ineligible(reason) =
            can_enroll(&course, status, completed_prerequisites, &Timestamp::now())
        {
            tracing::debug!(%course_id, %reason, "Enroll refused: not eligible");
            return Err(EnrollmentError::ineligible(reason));
        }

        tracing::info!(%user_id, %course_id, "Submitting enrollment");
        if let Err(e) = self
            .gateway
            .submit(&user_id, course_id, EnrollmentAction::Enroll)
            .await
        {
            return Err(self.submission_failed(e, course_id, EnrollmentAction::Enroll).await);
        }

        let mut state = self.lock();
        let enrollment = state
            .enrollments
            .entry(key.clone())
            .or_insert_with(|| Enrollment::not_enrolled(key.0.clone(), key.1.clone()));
        enrollment.enroll()?;
        let enrollment = enrollment.clone();
        if let Some(course) = state.courses.get_mut(course_id) {
            course.record_enrollment();
        }

        tracing::info!(%user_id, %course_id, "Enrolled");
        Ok(enrollment)
    }

    /// Opens the local confirmation gate before unenrolling.
    ///
    /// Nothing is sent to the server.
    pub fn request_unenroll(&self, course_id: &CourseId) -> Result<Enrollment, EnrollmentError> {
        let key = self.local_change_key(course_id)?;
        let mut state = self.lock();
        match state.enrollments.get_mut(&key) {
            Some(enrollment) if can_unenroll(enrollment.status) => {
                enrollment.request_unenroll()?;
                tracing::debug!(%course_id, "Unenroll awaiting confirmation");
                Ok(enrollment.clone())
            }
            other => Err(EnrollmentError::invalid_state(
                format!("{:?}", other.map(|e| e.status).unwrap_or_default()),
                "unenroll",
            )),
        }
    }

    /// Closes the confirmation gate and stays enrolled.
    pub fn cancel_unenroll(&self, course_id: &CourseId) -> Result<Enrollment, EnrollmentError> {
        let key = self.local_change_key(course_id)?;
        let mut state = self.lock();
        let enrollment = state.enrollments.get_mut(&key).ok_or_else(|| {
            EnrollmentError::invalid_state(
                format!("{:?}", EnrollmentStatus::NotEnrolled),
                "cancel unenroll",
            )
        })?;
        enrollment.cancel_unenroll()?;
        tracing::debug!(%course_id, "Unenroll cancelled");
        Ok(enrollment.clone())
    }

    /// Submits a confirmed unenrollment.
    ///
    /// On success the enrollment becomes `Unenrolled` and the course's
    /// enrollment count drops by one. On any failure the confirmation gate
    /// is closed again and the learner stays `Enrolled`.
    pub async fn confirm_unenroll(&self, course_id: &CourseId) -> Result<Enrollment, EnrollmentError> {
        let user_id = self.require_user()?;
        let key = (user_id.clone(), course_id.clone());
        let _guard = self.in_flight.try_begin(key.clone()).ok_or_else(|| {
            tracing::debug!(%course_id, "Unenroll refused: change already in flight");
            EnrollmentError::operation_in_progress(course_id.clone())
        })?;

        let status = self.status_for(&key);
        if status != EnrollmentStatus::PendingUnenrollConfirmation {
            return Err(EnrollmentError::invalid_state(
                format!("{:?}", status),
                "confirm unenroll",
            ));
        }

        tracing::info!(%user_id, %course_id, "Submitting unenrollment");
        let submitted = self
            .gateway
            .submit(&user_id, course_id, EnrollmentAction::Unenroll)
            .await;

        let outcome = {
            let mut state = self.lock();
            let enrollment = state.enrollments.get_mut(&key).ok_or_else(|| {
                EnrollmentError::invalid_state(
                    format!("{:?}", EnrollmentStatus::NotEnrolled),
                    "confirm unenroll",
                )
            })?;

            match submitted {
                Ok(()) => {
                    enrollment.confirm_unenroll()?;
                    let enrollment = enrollment.clone();
                    if let Some(course) = state.courses.get_mut(course_id) {
                        course.record_unenrollment();
                    }
                    Ok(enrollment)
                }
                Err(e) => {
                    enrollment.cancel_unenroll()?;
                    Err(e)
                }
            }
        };

        match outcome {
            Ok(enrollment) => {
                tracing::info!(%user_id, %course_id, "Unenrolled");
                Ok(enrollment)
            }
            Err(e) => Err(self
                .submission_failed(e, course_id, EnrollmentAction::Unenroll)
                .await),
        }
    }

    /// Re-reads the authoritative course record, replacing the cached one.
    pub async fn refresh_course(&self, course_id: &CourseId) -> Result<Course, EnrollmentError> {
        let course = self.fetch_course(course_id).await?;
        self.lock()
            .courses
            .insert(course_id.clone(), course.clone());
        Ok(course)
    }

    // === Queries ===

    /// Evaluates eligibility without enrolling.
    ///
    /// Without a session the learner is treated as never enrolled.
    pub async fn check_eligibility(
        &self,
        course_id: &CourseId,
        completed_prerequisites: &BTreeSet<CourseId>,
    ) -> Result<Eligibility, EnrollmentError> {
        let course = self.load_course(course_id).await?;
        Ok(can_enroll(
            &course,
            self.status(course_id),
            completed_prerequisites,
            &Timestamp::now(),
        ))
    }

    /// Status of the signed-in learner in a course.
    pub fn status(&self, course_id: &CourseId) -> EnrollmentStatus {
        match self.session.user_id() {
            Some(user_id) => self.status_for(&(user_id, course_id.clone())),
            None => EnrollmentStatus::NotEnrolled,
        }
    }

    pub fn enrollment(&self, course_id: &CourseId) -> Option<Enrollment> {
        let user_id = self.session.user_id()?;
        self.lock()
            .enrollments
            .get(&(user_id, course_id.clone()))
            .cloned()
    }

    /// Every enrollment of the signed-in learner.
    pub fn enrollments(&self) -> Vec<Enrollment> {
        let Some(user_id) = self.session.user_id() else {
            return Vec::new();
        };
        let mut enrollments: Vec<_> = self
            .lock()
            .enrollments
            .values()
            .filter(|enrollment| enrollment.user_id == user_id)
            .cloned()
            .collect();
        enrollments.sort_by(|a, b| a.course_id.cmp(&b.course_id));
        enrollments
    }

    /// Returns true while an enroll/unenroll for the course is outstanding.
    pub fn is_in_flight(&self, course_id: &CourseId) -> bool {
        self.session
            .user_id()
            .map(|user_id| self.in_flight.contains(&(user_id, course_id.clone())))
            .unwrap_or(false)
    }

    /// The cached course record, if it has been read.
    pub fn course(&self, course_id: &CourseId) -> Option<Course> {
        self.lock().courses.get(course_id).cloned()
    }

    // === Internals ===

    fn require_user(&self) -> Result<UserId, EnrollmentError> {
        self.session
            .user_id()
            .ok_or_else(EnrollmentError::not_authenticated)
    }

    /// Key for a purely local change, refused while a submission is outstanding.
    fn local_change_key(&self, course_id: &CourseId) -> Result<EnrollmentKey, EnrollmentError> {
        let key = (self.require_user()?, course_id.clone());
        if self.in_flight.contains(&key) {
            return Err(EnrollmentError::operation_in_progress(course_id.clone()));
        }
        Ok(key)
    }

    fn status_for(&self, key: &EnrollmentKey) -> EnrollmentStatus {
        self.lock()
            .enrollments
            .get(key)
            .map(|enrollment| enrollment.status)
            .unwrap_or_default()
    }

    async fn load_course(&self, course_id: &CourseId) -> Result<Course, EnrollmentError> {
        if let Some(course) = self.course(course_id) {
            return Ok(course);
        }
        let course = self.fetch_course(course_id).await?;
        Ok(self
            .lock()
            .courses
            .entry(course_id.clone())
            .or_insert(course)
            .clone())
    }

    async fn fetch_course(&self, course_id: &CourseId) -> Result<Course, EnrollmentError> {
        match self.courses.fetch_course(course_id).await {
            Ok(course) => Ok(course),
            Err(GatewayError::NotFound) => Err(EnrollmentError::course_not_found(course_id.clone())),
            Err(e) => Err(self.remote_failure(e).await),
        }
    }

    async fn submission_failed(
        &self,
        error: GatewayError,
        course_id: &CourseId,
        action: EnrollmentAction,
    ) -> EnrollmentError {
        tracing::warn!(%course_id, %action, error = %error, "Enrollment submission failed");
        match error {
            GatewayError::NotFound => EnrollmentError::course_not_found(course_id.clone()),
            other => self.remote_failure(other).await,
        }
    }

    async fn remote_failure(&self, error: GatewayError) -> EnrollmentError {
        match error {
            GatewayError::Unauthorized => {
                self.session.force_logout().await;
                EnrollmentError::session_expired()
            }
            GatewayError::Rejected { reason } => EnrollmentError::rejected(reason),
            other => EnrollmentError::transient(other.to_string()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
