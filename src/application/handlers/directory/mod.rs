//! Directory handlers.
//!
//! Read-only queries over the member directory and the reference tables
//! (metropolitan areas, industries, job titles).

mod list_users;
mod search_references;

pub use list_users::{ListUsersHandler, ListUsersQuery};
pub use search_references::{SearchReferencesHandler, SearchReferencesQuery};
