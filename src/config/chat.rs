//! Chat provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::chat::ChatEngineConfig;

/// ChatEngine project credentials
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Project private key, sent as the `PRIVATE-KEY` header
    #[serde(default)]
    pub private_key: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ChatConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.private_key.is_empty() {
            return Err(ValidationError::MissingRequired("CHAT__PRIVATE_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidChatUrl);
        }
        Ok(())
    }

    pub fn engine_config(&self) -> ChatEngineConfig {
        ChatEngineConfig::new(self.private_key.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            private_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.chatengine.io/".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_is_required() {
        assert!(ChatConfig::default().validate().is_err());

        let config = ChatConfig {
            private_key: "pk".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.engine_config().base_url, "https://api.chatengine.io/");
    }
}
