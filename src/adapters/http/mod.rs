//! HTTP adapter - the REST API under `/api`.
//!
//! - `account` - sign up, login, verification, password reset, waitlist
//! - `user` - profiles, handles, chat accounts, misconduct reports
//! - `directory` - member listing and reference lookups
//!
//! Every route shares one `AppState`. The auth middleware resolves bearer
//! tokens for all routes; handlers that need a user take `RequireAuth`.

pub mod account;
pub mod directory;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod state;
pub mod user;

use axum::{middleware::from_fn_with_state, Router};

pub use error::{ApiError, ErrorResponse};
pub use middleware::{auth_middleware, RequireAuth};
pub use state::AppState;

/// Builds the complete API router.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(account::account_routes())
        .merge(user::user_routes())
        .merge(directory::directory_routes());

    Router::new()
        .nest("/api", api)
        .layer(from_fn_with_state(state.sessions.clone(), auth_middleware))
        .with_state(state)
}
