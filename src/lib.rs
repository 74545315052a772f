//! Advisor Place - backend for a financial-profile community.
//!
//! Members keep a financial profile (income, expenses, savings, assets,
//! liabilities). Five summary values are derived from those inputs on every
//! write, and members browse each other through a filterable directory and
//! chat through an external provider.
//!
//! - `domain` - entities, value objects, and the derived-field engine
//! - `ports` - traits for persistence and integrations
//! - `application` - command and query handlers
//! - `adapters` - Postgres, in-memory, ChatEngine, Resend, and axum
//! - `config` - environment-driven configuration
//! - `server` - process wiring

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
