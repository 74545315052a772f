//! Resend sender - Implementation of EmailSender over Resend's HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::ports::{EmailError, EmailMessage, EmailSender};

/// Configuration for the Resend sender.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    api_key: Secret<String>,
    /// `Name <address>` used as the sender.
    pub from: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            from: from.into(),
            base_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    cc: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    bcc: &'a [String],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

impl<'a> ResendRequest<'a> {
    fn new(from: &'a str, message: &'a EmailMessage) -> Self {
        let (text, html) = if message.html {
            (None, Some(message.body.as_str()))
        } else {
            (Some(message.body.as_str()), None)
        };
        Self {
            from,
            to: &message.to,
            cc: &message.cc,
            bcc: &message.bcc,
            subject: &message.subject,
            text,
            html,
            reply_to: message.reply_to.as_deref(),
        }
    }
}

/// Sends one message per API call.
pub struct ResendEmailSender {
    config: ResendConfig,
    client: Client,
}

impl ResendEmailSender {
    pub fn new(config: ResendConfig) -> Result<Self, EmailError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmailError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let response = self
            .client
            .post(format!("{}/emails", self.config.base_url.trim_end_matches('/')))
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&ResendRequest::new(&self.config.from, message))
            .send()
            .await
            .map_err(|e| EmailError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(EmailError::Rejected(format!("status {}: {}", status, body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_text_or_html_body() {
        let mut message = EmailMessage::text("to@example.com", "Hi", "plain");
        let json = serde_json::to_value(ResendRequest::new("A <a@example.com>", &message)).unwrap();
        assert_eq!(json["text"], "plain");
        assert!(json.get("html").is_none());
        assert!(json.get("cc").is_none());

        message.html = true;
        let json = serde_json::to_value(ResendRequest::new("A <a@example.com>", &message)).unwrap();
        assert_eq!(json["html"], "plain");
        assert!(json.get("text").is_none());
    }
}
