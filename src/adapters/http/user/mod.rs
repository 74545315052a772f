//! HTTP adapter for member profiles, handles, chat accounts, and reports.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::user_routes;
