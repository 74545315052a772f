//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables carry the `ADVISOR_PLACE` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use advisor_place::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod chat;
mod database;
mod email;
mod error;
mod server;

pub use auth::AuthConfig;
pub use chat::ChatConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use std::collections::HashMap;

use serde::Deserialize;

const ENV_PREFIX: &str = "ADVISOR_PLACE";

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub email: EmailConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// Loads `.env` when present, then reads `ADVISOR_PLACE__*` variables:
    ///
    /// - `ADVISOR_PLACE__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `ADVISOR_PLACE__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(None)
    }

    /// Load configuration from an explicit variable map instead of the
    /// process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::build(Some(vars))
    }

    fn build(source: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(source),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first section that fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.chat.validate()?;
        self.email.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        let mut vars: HashMap<String, String> = [
            ("ADVISOR_PLACE__DATABASE__URL", "postgresql://test@localhost/test"),
            ("ADVISOR_PLACE__CHAT__PRIVATE_KEY", "pk-test"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in pairs {
            vars.insert(k.to_string(), v.to_string());
        }
        vars
    }

    #[test]
    fn loads_minimal_configuration() {
        let config = AppConfig::from_vars(vars(&[])).unwrap();

        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.auth.reset_link_ttl_hours, 24);
        assert!(!config.email.send_emails);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_values_override_defaults() {
        let config = AppConfig::from_vars(vars(&[
            ("ADVISOR_PLACE__SERVER__PORT", "3000"),
            ("ADVISOR_PLACE__SERVER__ENVIRONMENT", "production"),
            ("ADVISOR_PLACE__EMAIL__MAX_RETRIES", "5"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.email.max_retries, 5);
    }

    #[test]
    fn missing_database_url_fails_to_load() {
        let result = AppConfig::from_vars(HashMap::new());
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn production_rejects_plain_http_site_url() {
        let config = AppConfig::from_vars(vars(&[(
            "ADVISOR_PLACE__SERVER__ENVIRONMENT",
            "production",
        )]))
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(ValidationError::SiteUrlMustBeHttps)
        ));
    }
}
