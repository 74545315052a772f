//! HTTP handlers for user endpoints.
//!
//! Profile ids arrive as path segments; anything that is not a UUID is
//! treated as an unknown user.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::dto::{
    AvailabilityResponse, ChatTermsRequest, HandleRequest, ReportMisconductRequest, UserResponse,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{parse_user_id, ApiJson};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    CheckHandleQuery, GetOrCreateChatUserCommand, GetUserProfileQuery, ReportMisconductCommand,
    UpdateChatTermsCommand, UpdateHandleCommand, UpdateProfileCommand,
};
use crate::domain::user::ProfilePatch;

/// GET /api/user/profile/:id/
pub async fn get_user_profile(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let card = state
        .get_user_profile_handler()
        .handle(GetUserProfileQuery {
            user_id: parse_user_id(&id)?,
        })
        .await?;

    Ok(Json(UserResponse::from(card)))
}

/// PUT/PATCH /api/user/profile/:id/
pub async fn update_user_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProfilePatch>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .update_profile_handler()
        .handle(UpdateProfileCommand {
            actor: user,
            user_id: parse_user_id(&id)?,
            patch,
        })
        .await?;

    Ok(Json(UserResponse::from(result.card)))
}

/// POST /api/user/check_handle/:id/
pub async fn check_handle(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<HandleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .check_handle_handler()
        .handle(CheckHandleQuery {
            actor: user,
            user_id: parse_user_id(&id)?,
            handle: req.handle,
        })
        .await?;

    Ok(Json(AvailabilityResponse {
        available: result.available,
    }))
}

/// PUT/PATCH /api/user/update_handle/:id/
pub async fn update_handle(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<HandleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let card = state
        .update_handle_handler()
        .handle(UpdateHandleCommand {
            actor: user,
            user_id: parse_user_id(&id)?,
            handle: req.handle,
        })
        .await?;

    Ok(Json(UserResponse::from(card)))
}

/// POST /api/user/chat_user/:id/
pub async fn get_or_create_chat_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    body: Option<ApiJson<ChatTermsRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let ApiJson(req) = body.unwrap_or(ApiJson(ChatTermsRequest::default()));
    let card = state
        .get_or_create_chat_user_handler()
        .handle(GetOrCreateChatUserCommand {
            actor: user,
            user_id: parse_user_id(&id)?,
            agreed_to_terms: req.agreed_to_terms,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(card))))
}

/// POST /api/user/chat_user_terms/:id/
pub async fn update_chat_terms(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ChatTermsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let card = state
        .update_chat_terms_handler()
        .handle(UpdateChatTermsCommand {
            actor: user,
            user_id: parse_user_id(&id)?,
            agreed_to_terms: req.agreed_to_terms,
        })
        .await?;

    Ok(Json(UserResponse::from(card)))
}

/// POST /api/user/report_misconduct/
pub async fn report_misconduct(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<ReportMisconductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .report_misconduct_handler()
        .handle(ReportMisconductCommand {
            actor: user,
            handle: req.handle,
            description: req.description,
        })
        .await?;

    Ok(Json(serde_json::json!({})))
}
