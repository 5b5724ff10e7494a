//! Durable key-value storage for the persisted session.
//!
//! The Session Store writes two keys: the raw token and the serialized
//! user record. Absent keys read as `None`.

use async_trait::async_trait;

use super::GatewayError;

#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads a value. Missing keys return `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>, GatewayError>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), GatewayError>;

    /// Removes a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_storage_is_object_safe() {
        fn _accepts_dyn(_storage: &dyn SessionStorage) {}
    }
}
