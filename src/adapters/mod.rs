//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - password hashing and bearer token sessions
//! - `chat` - ChatEngine client and a mock provider
//! - `email` - Resend sender and the queued mailer
//! - `memory` - in-memory persistence for tests and local runs
//! - `postgres` - sqlx-backed persistence
//! - `http` - axum REST API

pub mod auth;
pub mod chat;
pub mod email;
pub mod http;
pub mod memory;
pub mod postgres;
