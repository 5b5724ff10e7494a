//! Navigation guard for learner-only views.

use serde::Serialize;
use std::sync::Arc;

use super::SessionStore;

/// Where an unauthenticated learner is sent.
pub const LOGIN_ROUTE: &str = "/login";

/// Whether a route needs a signed-in learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Public,
    LearnerOnly,
}

/// Decision for one navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum Access {
    Granted,
    RedirectToLogin { login: String, return_to: String },
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }
}

/// Gates learner-only routes on the Session Store.
pub struct RouteGuard {
    session: Arc<SessionStore>,
    learner_prefixes: Vec<String>,
}

impl RouteGuard {
    /// Guard protecting the portal's learner views.
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self::with_learner_prefixes(session, ["/dashboard", "/my-courses", "/lessons", "/profile"])
    }

    pub fn with_learner_prefixes<S: Into<String>>(
        session: Arc<SessionStore>,
        prefixes: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            session,
            learner_prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, route: &str) -> RouteKind {
        let protected = self.learner_prefixes.iter().any(|prefix| {
            route == prefix
                || route
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
        });
        if protected {
            RouteKind::LearnerOnly
        } else {
            RouteKind::Public
        }
    }

    /// Synchronous check before entering `route`.
    pub fn check(&self, route: &str) -> Access {
        match self.classify(route) {
            RouteKind::Public => Access::Granted,
            RouteKind::LearnerOnly if self.session.is_authenticated() => Access::Granted,
            RouteKind::LearnerOnly => {
                tracing::debug!(route, "Redirecting unauthenticated navigation to login");
                Access::RedirectToLogin {
                    login: LOGIN_ROUTE.to_string(),
                    return_to: route.to_string(),
                }
            }
        }
    }
}
