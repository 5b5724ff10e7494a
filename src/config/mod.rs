//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `COURSE_PORTAL` prefix
//! and nested values are separated by double underscores. Every value has
//! a default, so an empty environment yields a usable configuration.
//!
//! # Example
//!
//! ```no_run
//! use course_portal::config::PortalConfig;
//!
//! let config = PortalConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Backend at {}", config.api.base_url);
//! ```

mod api;
mod error;
mod logging;
mod session;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use session::{SessionBackend, SessionConfig};

use serde::Deserialize;

/// Root configuration of the course portal core
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortalConfig {
    /// Portal backend (base URL, timeout)
    #[serde(default)]
    pub api: ApiConfig,

    /// Persisted session storage
    #[serde(default)]
    pub session: SessionConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PortalConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COURSE_PORTAL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `COURSE_PORTAL__API__BASE_URL=https://portal.example.com/api`
    /// - `COURSE_PORTAL__SESSION__BACKEND=memory`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COURSE_PORTAL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.session.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
