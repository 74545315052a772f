//! PostgreSQL adapters.
//!
//! Queries are checked at runtime (`sqlx::query` / `QueryBuilder`), so the
//! crate builds without a live database. Schema lives in `migrations/`.

mod chat_user_repository;
mod community_repository;
mod link_repository;
mod reference_reader;
mod rows;
mod user_reader;
mod user_repository;

pub use chat_user_repository::PostgresChatUserRepository;
pub use community_repository::PostgresCommunityRepository;
pub use link_repository::{PostgresAccessTokenStore, PostgresLinkRepository};
pub use reference_reader::PostgresReferenceReader;
pub use user_reader::PostgresUserReader;
pub use user_repository::PostgresUserRepository;
