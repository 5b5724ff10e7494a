//! HTTP client for the portal backend.
//!
//! Implements the remote ports over the backend's JSON API. The bearer
//! token is read from the Session Store on every request, so a login or
//! logout takes effect immediately.
//!
//! # Endpoints
//!
//! | Port call | Request |
//! |-----------|---------|
//! | `fetch_course` | `GET /courses/{id}` |
//! | `submit(Enroll)` | `POST /courses/{id}/enroll` |
//! | `submit(Unenroll)` | `DELETE /courses/{id}/unenroll` |
//! | `list_lessons` | `GET /courses/{id}/lessons` |
//! | `set_completion` | `PATCH /lessons/{id}/toggle-completion` |
//! | `register` | `POST /auth/register` |

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::application::SessionStore;
use crate::config::ApiConfig;
use crate::domain::course::{Course, Lesson};
use crate::domain::foundation::{CourseId, LessonId, UserId};
use crate::domain::user::{Registration, RegistrationProfile};
use crate::ports::{
    CourseReader, EnrollmentAction, EnrollmentGateway, GatewayError, LessonRepository, Registrar,
};

/// Fallback when a refusal carries no readable `message`.
const DEFAULT_REJECTION: &str = "Request failed. Please try again.";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    completed: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(flatten)]
    profile: &'a RegistrationProfile,
}

/// Maps a non-success status and its body to a gateway error.
fn error_for_status(status: StatusCode, body: &str) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED => GatewayError::Unauthorized,
        StatusCode::NOT_FOUND => GatewayError::NotFound,
        _ => {
            let reason = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
            GatewayError::rejected(reason)
        }
    }
}

/// Maps a transport failure to a gateway error.
fn error_for_transport(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::network(format!("Connection failed: {}", error))
    } else {
        GatewayError::network(error.to_string())
    }
}

/// Portal backend client.
pub struct HttpPortalClient {
    base_url: Url,
    client: Client,
    session: Arc<SessionStore>,
}

impl HttpPortalClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `Network` if `base_url` is not an absolute http(s) URL or
    /// the underlying HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<SessionStore>,
    ) -> Result<Self, GatewayError> {
        let base_url: String = base_url.into();
        let base_url = Url::parse(&base_url)
            .map_err(|e| GatewayError::network(format!("Invalid base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::network(format!(
                "Invalid base URL {}: not a hierarchical URL",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            client,
            session,
        })
    }

    pub fn from_config(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self, GatewayError> {
        Self::new(config.base_url.clone(), config.timeout(), session)
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked hierarchical in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/json");
        match self.session.token() {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    /// Sends a request and fails on any non-success status.
    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(error_for_transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = error_for_status(status, &body);
        tracing::debug!(status = status.as_u16(), error = %error, "Portal request failed");
        Err(error)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::network(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl CourseReader for HttpPortalClient {
    async fn fetch_course(&self, id: &CourseId) -> Result<Course, GatewayError> {
        self.send_json(self.client.get(self.url(&["courses", id.as_str()])))
            .await
    }
}

#[async_trait]
impl EnrollmentGateway for HttpPortalClient {
    async fn submit(
        &self,
        _user_id: &UserId,
        course_id: &CourseId,
        action: EnrollmentAction,
    ) -> Result<(), GatewayError> {
        // The backend identifies the learner from the bearer token.
        let request = match action {
            EnrollmentAction::Enroll => self
                .client
                .post(self.url(&["courses", course_id.as_str(), "enroll"])),
            EnrollmentAction::Unenroll => self
                .client
                .delete(self.url(&["courses", course_id.as_str(), "unenroll"])),
        };
        self.send(request).await.map(|_| ())
    }
}

#[async_trait]
impl LessonRepository for HttpPortalClient {
    async fn list_lessons(&self, course_id: &CourseId) -> Result<Vec<Lesson>, GatewayError> {
        self.send_json(
            self.client
                .get(self.url(&["courses", course_id.as_str(), "lessons"])),
        )
        .await
    }

    async fn set_completion(
        &self,
        lesson_id: &LessonId,
        completed: bool,
    ) -> Result<(), GatewayError> {
        let request = self
            .client
            .patch(self.url(&["lessons", lesson_id.as_str(), "toggle-completion"]))
            .json(&CompletionRequest { completed });
        self.send(request).await.map(|_| ())
    }
}

#[async_trait]
impl Registrar for HttpPortalClient {
    async fn register(&self, registration: &Registration) -> Result<(), GatewayError> {
        let body = RegisterRequest {
            name: &registration.name,
            email: &registration.email,
            password: registration.password(),
            profile: &registration.profile,
        };
        let request = self.client.post(self.url(&["auth", "register"])).json(&body);
        self.send(request).await.map(|_| ())
    }
}
