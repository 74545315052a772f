//! GetUserProfileHandler - Query handler for a member's public profile.

use std::sync::Arc;

use crate::application::handlers::user_not_found;
use crate::domain::directory::UserCard;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::UserReader;

#[derive(Debug, Clone)]
pub struct GetUserProfileQuery {
    pub user_id: UserId,
}

/// Loads any live member's card. Visibility of fields is decided by the
/// presentation layer.
pub struct GetUserProfileHandler {
    reader: Arc<dyn UserReader>,
}

impl GetUserProfileHandler {
    pub fn new(reader: Arc<dyn UserReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetUserProfileQuery) -> Result<UserCard, DomainError> {
        self.reader
            .get_card(&query.user_id)
            .await?
            .ok_or_else(user_not_found)
    }
}
