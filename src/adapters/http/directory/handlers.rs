//! HTTP handlers for the member directory and reference lookups.

use axum::{extract::State, response::IntoResponse, Json};

use super::dto::PageResponse;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::QueryParams;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::adapters::http::user::dto::UserResponse;
use crate::application::handlers::{ListUsersQuery, SearchReferencesQuery};
use crate::domain::directory::{ReferenceEntry, ReferenceKind};

/// GET /api/users/
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    QueryParams(params): QueryParams,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .list_users_handler()
        .handle(ListUsersQuery {
            actor: user,
            params,
        })
        .await?;

    Ok(Json(PageResponse::<UserResponse>::from(page)))
}

async fn search(
    state: AppState,
    kind: ReferenceKind,
    params: std::collections::HashMap<String, String>,
) -> Result<Json<PageResponse<ReferenceEntry>>, ApiError> {
    let page = state
        .search_references_handler()
        .handle(SearchReferencesQuery { kind, params })
        .await?;

    Ok(Json(PageResponse::from(page)))
}

/// GET /api/metros/
pub async fn search_metros(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    QueryParams(params): QueryParams,
) -> Result<impl IntoResponse, ApiError> {
    search(state, ReferenceKind::Metro, params).await
}

/// GET /api/industries/
pub async fn search_industries(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    QueryParams(params): QueryParams,
) -> Result<impl IntoResponse, ApiError> {
    search(state, ReferenceKind::Industry, params).await
}

/// GET /api/job_titles/
pub async fn search_job_titles(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    QueryParams(params): QueryParams,
) -> Result<impl IntoResponse, ApiError> {
    search(state, ReferenceKind::JobTitle, params).await
}
