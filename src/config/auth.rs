//! Account link configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::application::handlers::AuthSettings;

/// Where emailed links point and how long reset links stay valid
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Front-end origin used to build emailed links
    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default = "default_reset_link_ttl_hours")]
    pub reset_link_ttl_hours: i64,
}

impl AuthConfig {
    /// Validate link configuration
    ///
    /// Production links must be HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.site_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SITE_URL"));
        }
        if *environment == Environment::Production && !self.site_url.starts_with("https://") {
            return Err(ValidationError::SiteUrlMustBeHttps);
        }
        if !(1..=168).contains(&self.reset_link_ttl_hours) {
            return Err(ValidationError::InvalidResetLinkTtl);
        }
        Ok(())
    }

    pub fn settings(&self) -> AuthSettings {
        AuthSettings {
            site_url: self.site_url.trim_end_matches('/').to_string(),
            reset_link_ttl_hours: self.reset_link_ttl_hours,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            reset_link_ttl_hours: default_reset_link_ttl_hours(),
        }
    }
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_reset_link_ttl_hours() -> i64 {
    24
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_requires_https() {
        let config = AuthConfig::default();
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::SiteUrlMustBeHttps)
        ));
    }

    #[test]
    fn reset_ttl_is_bounded() {
        let config = AuthConfig {
            reset_link_ttl_hours: 0,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn settings_strip_trailing_slash() {
        let config = AuthConfig {
            site_url: "https://advisor.place/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.settings().site_url, "https://advisor.place");
    }
}
