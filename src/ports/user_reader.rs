//! User reader port (read side / directory queries).
//!
//! Returns `UserCard` read models with reference names and chat accounts
//! joined in. Soft-deleted users never appear in listings.

use async_trait::async_trait;

use crate::domain::directory::{OrderBy, Page, PageRequest, UserCard, UserFilter};
use crate::domain::foundation::{DomainError, UserId};

/// Reader port for profile pages and directory listings.
#[async_trait]
pub trait UserReader: Send + Sync {
    /// Loads the card for one live user.
    ///
    /// Returns `None` if the user does not exist or is soft-deleted.
    async fn get_card(&self, id: &UserId) -> Result<Option<UserCard>, DomainError>;

    /// Lists live users matching `filter`, sorted by `order`.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the requested page is past the end
    async fn list(
        &self,
        filter: &UserFilter,
        order: &OrderBy,
        page: PageRequest,
    ) -> Result<Page<UserCard>, DomainError>;
}
