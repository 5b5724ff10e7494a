//! Account registration port.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::user::Registration;

/// Creates new portal accounts.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Submits a validated registration.
    ///
    /// A server-side refusal (duplicate email, etc.) surfaces as
    /// `GatewayError::Rejected` carrying the server's message.
    async fn register(&self, registration: &Registration) -> Result<(), GatewayError>;
}
