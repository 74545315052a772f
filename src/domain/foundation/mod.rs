//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication types, and error types
//! that form the vocabulary of the Advisor Place domain.

mod auth;
mod authorization;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use authorization::{admin_or_user_self, AuthorizationResult};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ChatEngineId, IndustryId, JobTitleId, MetroAreaId, UserId};
pub use timestamp::Timestamp;
