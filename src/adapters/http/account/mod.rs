//! HTTP adapter for sign up, login, verification, and password reset.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::account_routes;
