//! Axum router configuration for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_own_profile, join_waitlist, login, logout, request_password_reset, resend_verification,
    reset_password, sign_up, verify_email,
};
use crate::adapters::http::state::AppState;

/// Account routes, mounted under `/api`.
///
/// ## Public
/// - `POST /api_token_auth/` - Exchange credentials for a token
/// - `POST /signup/` - Register with a sign up link
/// - `POST /request_password_reset/` - Email a reset link
/// - `POST /reset_password/` - Set a new password from a reset link
/// - `POST /waitlist/` - Join the waitlist
///
/// ## Authenticated
/// - `POST /logout/` - Revoke the presented token
/// - `GET /profile/` - Caller's own account
/// - `POST /verify_email/` - Confirm the email address
/// - `POST /resend_email_verification/` - Send a fresh verification link
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/api_token_auth/", post(login))
        .route("/signup/", post(sign_up))
        .route("/request_password_reset/", post(request_password_reset))
        .route("/reset_password/", post(reset_password))
        .route("/waitlist/", post(join_waitlist))
        .route("/logout/", post(logout))
        .route("/profile/", get(get_own_profile))
        .route("/verify_email/", post(verify_email))
        .route("/resend_email_verification/", post(resend_verification))
}
