//! Axum router configuration for user endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    check_handle, get_or_create_chat_user, get_user_profile, report_misconduct,
    update_chat_terms, update_handle, update_user_profile,
};
use crate::adapters::http::state::AppState;

/// User routes, mounted under `/api`. All require authentication.
///
/// - `GET|PUT|PATCH /user/profile/:id/` - Public profile; updates are self or admin
/// - `POST /user/check_handle/:id/` - Handle availability
/// - `PUT|PATCH /user/update_handle/:id/` - Change handle
/// - `POST /user/chat_user/:id/` - Get or create the chat account
/// - `POST /user/chat_user_terms/:id/` - Record chat terms agreement
/// - `POST /user/report_misconduct/` - Report another member
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user/profile/:id/",
            get(get_user_profile)
                .put(update_user_profile)
                .patch(update_user_profile),
        )
        .route("/user/check_handle/:id/", post(check_handle))
        .route(
            "/user/update_handle/:id/",
            put(update_handle).patch(update_handle),
        )
        .route("/user/chat_user/:id/", post(get_or_create_chat_user))
        .route("/user/chat_user_terms/:id/", post(update_chat_terms))
        .route("/user/report_misconduct/", post(report_misconduct))
}
