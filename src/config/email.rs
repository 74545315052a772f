//! Email configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::email::{MailerSettings, ResendConfig};

/// Outbound email settings (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub resend_api_key: String,

    #[serde(default = "default_from_email")]
    pub from_email: String,

    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// BCC'd on every message and notified of misconduct reports
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// When false, messages are logged instead of sent
    #[serde(default)]
    pub send_emails: bool,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl EmailConfig {
    /// Formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    ///
    /// The API key is only required when sending is enabled.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.send_emails {
            if self.resend_api_key.is_empty() {
                return Err(ValidationError::MissingRequired("EMAIL__RESEND_API_KEY"));
            }
            if !self.resend_api_key.starts_with("re_") {
                return Err(ValidationError::InvalidResendKey);
            }
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidEmailAddress("from_email"));
        }
        if !self.admin_email.contains('@') {
            return Err(ValidationError::InvalidEmailAddress("admin_email"));
        }
        Ok(())
    }

    pub fn resend_config(&self) -> ResendConfig {
        ResendConfig::new(self.resend_api_key.clone(), self.from_header())
    }

    pub fn mailer_settings(&self) -> MailerSettings {
        MailerSettings {
            admin_email: self.admin_email.clone(),
            send_emails: self.send_emails,
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            admin_email: default_admin_email(),
            send_emails: false,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

fn default_from_email() -> String {
    "noreply@advisor.place".to_string()
}

fn default_from_name() -> String {
    "Advisor Place".to_string()
}

fn default_admin_email() -> String {
    "admin@advisor.place".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_only_required_when_sending() {
        let mut config = EmailConfig::default();
        assert!(config.validate().is_ok());

        config.send_emails = true;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));

        config.resend_api_key = "sk_wrong".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidResendKey)));

        config.resend_api_key = "re_123".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn mailer_settings_carry_policy() {
        let config = EmailConfig {
            retry_delay_ms: 250,
            ..Default::default()
        };
        let settings = config.mailer_settings();
        assert_eq!(settings.admin_email, "admin@advisor.place");
        assert_eq!(settings.retry_delay, Duration::from_millis(250));
        assert_eq!(settings.max_retries, 3);
    }

    #[test]
    fn from_header_combines_name_and_address() {
        assert_eq!(
            EmailConfig::default().from_header(),
            "Advisor Place <noreply@advisor.place>"
        );
    }
}
