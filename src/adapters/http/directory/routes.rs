//! Axum router configuration for directory endpoints.

use axum::{routing::get, Router};

use super::handlers::{list_users, search_industries, search_job_titles, search_metros};
use crate::adapters::http::state::AppState;

/// Directory routes, mounted under `/api`.
///
/// All require authentication.
///
/// - `GET /users/` - Filtered, ordered member listing
/// - `GET /metros/`, `/industries/`, `/job_titles/` - Reference lookups
pub fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/users/", get(list_users))
        .route("/metros/", get(search_metros))
        .route("/industries/", get(search_industries))
        .route("/job_titles/", get(search_job_titles))
}
