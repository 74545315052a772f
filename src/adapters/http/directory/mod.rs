//! HTTP adapter for the member directory and reference data.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::directory_routes;
