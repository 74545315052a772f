//! HTTP handlers for account endpoints.

use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use super::dto::{
    DetailResponse, LoginRequest, ProfileResponse, RequestPasswordResetRequest,
    ResetPasswordRequest, SignUpRequest, TokenResponse, VerifyEmailRequest, WaitlistRequest,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::{bearer_token, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    GetOwnProfileQuery, JoinWaitlistCommand, LoginCommand, LogoutCommand,
    RequestPasswordResetCommand, ResendVerificationCommand, ResetPasswordCommand, SignUpCommand,
    VerifyEmailCommand,
};
use crate::domain::directory::UserCard;

/// POST /api/api_token_auth/
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .login_handler()
        .handle(LoginCommand {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: result.token.into_inner(),
    }))
}

/// POST /api/logout/
pub async fn logout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers).unwrap_or_default().to_string();
    state
        .logout_handler()
        .handle(LogoutCommand { actor: user, token })
        .await?;

    Ok(Json(serde_json::json!({})))
}

/// GET /api/profile/
pub async fn get_own_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let card = state
        .get_own_profile_handler()
        .handle(GetOwnProfileQuery { actor: user })
        .await?;

    Ok(Json(ProfileResponse::from(&card)))
}

/// POST /api/signup/
pub async fn sign_up(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .sign_up_handler()
        .handle(SignUpCommand {
            sign_up_link: req.sign_up_link_uuid,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse::from(&UserCard::bare(user))),
    ))
}

/// POST /api/verify_email/
pub async fn verify_email(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<VerifyEmailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .verify_email_handler()
        .handle(VerifyEmailCommand {
            actor: user,
            verify_link: req.verify_link_uuid,
        })
        .await?;

    Ok(Json(DetailResponse::new("Email verified.")))
}

/// POST /api/resend_email_verification/
pub async fn resend_verification(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    state
        .resend_verification_handler()
        .handle(ResendVerificationCommand { actor: user })
        .await?;

    Ok(Json(DetailResponse::new("Verification email sent.")))
}

/// POST /api/request_password_reset/
pub async fn request_password_reset(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RequestPasswordResetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .request_password_reset_handler()
        .handle(RequestPasswordResetCommand { email: req.email })
        .await?;

    Ok(Json(DetailResponse::new(
        "If an account exists for that email, a reset link has been sent.",
    )))
}

/// POST /api/reset_password/
pub async fn reset_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .reset_password_handler()
        .handle(ResetPasswordCommand {
            reset_link: req.reset_link_uuid,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(DetailResponse::new("Password has been reset.")))
}

/// POST /api/waitlist/
pub async fn join_waitlist(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<WaitlistRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = state
        .join_waitlist_handler()
        .handle(JoinWaitlistCommand {
            email: req.email,
            how_did_you_hear_about_us: req.how_did_you_hear_about_us,
            why_do_you_want_to_join: req.why_do_you_want_to_join,
        })
        .await?;

    Ok(Json(entry))
}
