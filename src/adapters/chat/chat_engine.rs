//! ChatEngine client - Implementation of ChatProvider over ChatEngine's REST API.
//!
//! Every request carries the project's `PRIVATE-KEY` header. Payloads are
//! form encoded; responses are JSON.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ChatEngineConfig::new(secret_key)
//!     .with_base_url("https://api.chatengine.io/");
//!
//! let provider = ChatEngineProvider::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::foundation::ChatEngineId;
use crate::ports::{ChatError, ChatProvider, ProviderChatUser};

/// Configuration for the ChatEngine client.
#[derive(Debug, Clone)]
pub struct ChatEngineConfig {
    private_key: Secret<String>,
    /// Base URL, with trailing slash (default: https://api.chatengine.io/).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ChatEngineConfig {
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: Secret::new(private_key.into()),
            base_url: "https://api.chatengine.io/".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn private_key(&self) -> &str {
        self.private_key.expose_secret()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// ChatEngine REST client.
pub struct ChatEngineProvider {
    config: ChatEngineConfig,
    client: Client,
}

impl ChatEngineProvider {
    pub fn new(config: ChatEngineConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn perform(
        &self,
        method: Method,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<Response, ChatError> {
        let response = self
            .client
            .request(method.clone(), self.config.url(path))
            .header("PRIVATE-KEY", self.config.private_key())
            .form(form)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!(%method, path, status = status.as_u16(), "chat provider request failed");
        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR | StatusCode::NOT_FOUND => None,
            _ => response.json::<ErrorBody>().await.ok().and_then(|body| body.message),
        };
        Err(status_error(status, message))
    }

    async fn perform_json(
        &self,
        method: Method,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<ProviderChatUser, ChatError> {
        self.perform(method, path, form)
            .await?
            .json()
            .await
            .map_err(|e| ChatError::Parse(format!("Failed to parse response: {}", e)))
    }
}

/// 404 and 500 carry fixed meanings; anything else surfaces the provider's message.
fn status_error(status: StatusCode, message: Option<String>) -> ChatError {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR => ChatError::Unknown,
        StatusCode::NOT_FOUND => ChatError::NotFound,
        _ => ChatError::Rejected(message.unwrap_or_else(|| ChatError::Unknown.to_string())),
    }
}

fn user_path(id: ChatEngineId) -> String {
    format!("users/{}/", id)
}

#[async_trait]
impl ChatProvider for ChatEngineProvider {
    async fn create_user(&self, username: &str, secret: &str) -> Result<ProviderChatUser, ChatError> {
        let created = self
            .perform_json(
                Method::POST,
                "users/",
                &[("username", username), ("secret", secret)],
            )
            .await?;
        tracing::info!(chat_engine_id = %created.id, username, "chat user created");
        Ok(created)
    }

    async fn get_user(&self, id: ChatEngineId) -> Result<ProviderChatUser, ChatError> {
        self.perform_json(Method::GET, &user_path(id), &[]).await
    }

    async fn update_username(
        &self,
        id: ChatEngineId,
        username: &str,
    ) -> Result<ProviderChatUser, ChatError> {
        self.perform_json(Method::PATCH, &user_path(id), &[("username", username)])
            .await
    }

    async fn delete_user(&self, id: ChatEngineId) -> Result<(), ChatError> {
        self.perform(Method::DELETE, &user_path(id), &[]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = ChatEngineConfig::new("pk")
            .with_base_url("http://localhost:9000/")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.private_key(), "pk");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.url("users/"), "http://localhost:9000/users/");
    }

    #[test]
    fn status_errors_follow_provider_conventions() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, None),
            ChatError::NotFound
        ));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, Some("boom".into())),
            ChatError::Unknown
        ));
        match status_error(StatusCode::BAD_REQUEST, Some("Username taken".into())) {
            ChatError::Rejected(message) => assert_eq!(message, "Username taken"),
            other => panic!("unexpected {:?}", other),
        }
        match status_error(StatusCode::FORBIDDEN, None) {
            ChatError::Rejected(message) => assert_eq!(message, ChatError::Unknown.to_string()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn user_path_has_trailing_slash() {
        assert_eq!(user_path(ChatEngineId::new(42)), "users/42/");
    }

    #[test]
    fn provider_user_parses_from_response() {
        let user: ProviderChatUser =
            serde_json::from_str(r#"{"id": 7, "username": "alice", "first_name": ""}"#).unwrap();
        assert_eq!(user.id, ChatEngineId::new(7));
        assert_eq!(user.username, "alice");
    }
}
