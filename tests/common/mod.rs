//! Shared harness for driving the API router over in-memory adapters.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use advisor_place::adapters::auth::FakePasswordHasher;
use advisor_place::adapters::chat::MockChatProvider;
use advisor_place::adapters::email::RecordingMailer;
use advisor_place::adapters::http::{api_router, AppState};
use advisor_place::adapters::memory::InMemoryStore;
use advisor_place::application::handlers::AuthSettings;
use advisor_place::domain::directory::ReferenceKind;
use advisor_place::domain::user::{Handle, UserProfile};

pub const PASSWORD: &str = "Password!123";
pub const SITE_URL: &str = "https://advisor.test";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub chat: Arc<MockChatProvider>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_chat(MockChatProvider::new())
    }

    pub fn with_chat(chat: MockChatProvider) -> Self {
        let store = Arc::new(
            InMemoryStore::new()
                .with_reference(ReferenceKind::Metro, 1, "Seattle")
                .with_reference(ReferenceKind::Metro, 2, "Austin")
                .with_reference(ReferenceKind::Metro, 3, "Boston")
                .with_reference(ReferenceKind::Industry, 1, "Software")
                .with_reference(ReferenceKind::JobTitle, 1, "Engineer"),
        );
        let mailer = Arc::new(RecordingMailer::new());
        let chat = Arc::new(chat);

        let state = AppState::in_memory(
            store.clone(),
            chat.clone(),
            mailer.clone(),
            Arc::new(FakePasswordHasher),
        )
        .with_auth_settings(AuthSettings {
            site_url: SITE_URL.to_string(),
            reset_link_ttl_hours: 24,
        })
        .with_admin_email("admin@advisor.test");

        Self {
            router: api_router(state),
            store,
            mailer,
            chat,
        }
    }

    /// Sends one request and returns the status with the parsed JSON body
    /// (`Value::Null` when the body is empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(token), Some(body)).await
    }

    /// Stores a verified member with the shared password.
    pub fn member(&self, handle: Option<&str>) -> UserProfile {
        let local = handle.map(str::to_string).unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
        let mut user = UserProfile::register(format!("{}@example.com", local));
        user.handle = handle.map(|h| Handle::new(h).unwrap());
        user.email_verified = true;
        self.store
            .insert_user(user.clone(), format!("fake${}", PASSWORD));
        user
    }

    /// Logs in through the API and returns the bearer token.
    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/api_token_auth/",
                None,
                serde_json::json!({ "username": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// A stored member plus a live token.
    pub async fn member_with_token(&self, handle: Option<&str>) -> (UserProfile, String) {
        let user = self.member(handle);
        let token = self.login(&user.email).await;
        (user, token)
    }

    /// The id at the end of the first link in the most recent email.
    pub fn last_link_id(&self) -> String {
        let messages = self.mailer.messages();
        let message = messages.last().expect("no email was sent");
        let url = message
            .body
            .split_whitespace()
            .find(|word| word.starts_with(SITE_URL))
            .expect("email has no link");
        url.trim_end_matches('/').rsplit('/').next().unwrap().to_string()
    }
}

/// Reads a JSON money value regardless of string or number encoding.
pub fn money(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Some(Decimal::from_str(s).unwrap()),
        Value::Number(n) => Some(Decimal::from_str(&n.to_string()).unwrap()),
        _ => None,
    }
}
