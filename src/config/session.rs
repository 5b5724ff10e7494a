//! Persisted session configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the persisted session lives
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Process-local; nothing survives a restart
    Memory,
    #[default]
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: SessionBackend,

    /// JSON file used by the file backend
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl SessionConfig {
    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == SessionBackend::File && self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingSessionPath);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from(".course-portal/session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.backend, SessionBackend::File);
        assert_eq!(config.path, PathBuf::from(".course-portal/session.json"));
    }

    #[test]
    fn test_file_backend_requires_path() {
        let config = SessionConfig {
            backend: SessionBackend::File,
            path: PathBuf::new(),
        };
        assert_eq!(config.validate(), Err(ValidationError::MissingSessionPath));
    }

    #[test]
    fn test_memory_backend_ignores_path() {
        let config = SessionConfig {
            backend: SessionBackend::Memory,
            path: PathBuf::new(),
        };
        assert!(config.validate().is_ok());
    }
}
