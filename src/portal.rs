//! Composition root: one Session Store shared by the other services.

use std::sync::Arc;

use crate::adapters::http::HttpPortalClient;
use crate::adapters::storage::{FileSessionStorage, InMemorySessionStorage};
use crate::application::{
    EnrollmentEngine, ProgressAggregator, RestoreOutcome, RouteGuard, SessionStore,
};
use crate::config::{PortalConfig, SessionBackend};
use crate::domain::progress::LearnerProgress;
use crate::domain::user::Registration;
use crate::ports::{
    CourseReader, EnrollmentGateway, GatewayError, LessonRepository, Registrar, SessionStorage,
};

/// The wired portal core.
pub struct Portal {
    pub session: Arc<SessionStore>,
    pub enrollment: EnrollmentEngine,
    pub progress: ProgressAggregator,
    pub routes: RouteGuard,
    registrar: Arc<dyn Registrar>,
}

/// Remote collaborators of the core.
pub struct Remotes {
    pub courses: Arc<dyn CourseReader>,
    pub enrollments: Arc<dyn EnrollmentGateway>,
    pub lessons: Arc<dyn LessonRepository>,
    pub registrar: Arc<dyn Registrar>,
}

impl Portal {
    /// Wires the services around an existing Session Store.
    pub fn new(session: Arc<SessionStore>, remotes: Remotes) -> Self {
        Self {
            enrollment: EnrollmentEngine::new(
                session.clone(),
                remotes.courses,
                remotes.enrollments,
            ),
            progress: ProgressAggregator::new(session.clone(), remotes.lessons),
            routes: RouteGuard::new(session.clone()),
            registrar: remotes.registrar,
            session,
        }
    }

    /// Builds the configured session storage and the HTTP backend client.
    pub fn from_config(config: &PortalConfig) -> Result<Self, GatewayError> {
        let storage: Arc<dyn SessionStorage> = match config.session.backend {
            SessionBackend::Memory => Arc::new(InMemorySessionStorage::new()),
            SessionBackend::File => Arc::new(FileSessionStorage::new(&config.session.path)),
        };
        let session = Arc::new(SessionStore::new(storage));
        let client = Arc::new(HttpPortalClient::from_config(&config.api, session.clone())?);

        Ok(Self::new(
            session,
            Remotes {
                courses: client.clone(),
                enrollments: client.clone(),
                lessons: client.clone(),
                registrar: client,
            },
        ))
    }

    /// Restores the persisted session. Call once at startup.
    pub async fn start(&self) -> RestoreOutcome {
        self.session.restore().await
    }

    /// Dashboard rollup for the signed-in learner.
    pub fn dashboard(&self) -> LearnerProgress {
        self.progress
            .learner_progress(&self.enrollment.enrollments())
    }

    /// Submits a new account registration.
    pub async fn register(&self, registration: &Registration) -> Result<(), GatewayError> {
        tracing::info!(role = %registration.role(), "Submitting registration");
        self.registrar.register(registration).await.map_err(|e| {
            tracing::warn!(error = %e, "Registration failed");
            e
        })
    }
}
