//! GetOwnProfileHandler - Query handler for the caller's account view.

use std::sync::Arc;

use crate::application::handlers::user_not_found;
use crate::domain::directory::UserCard;
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::ports::UserReader;

/// Query for the authenticated caller's own account.
#[derive(Debug, Clone)]
pub struct GetOwnProfileQuery {
    pub actor: AuthenticatedUser,
}

/// Handler for the account view shown after login.
pub struct GetOwnProfileHandler {
    reader: Arc<dyn UserReader>,
}

impl GetOwnProfileHandler {
    pub fn new(reader: Arc<dyn UserReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetOwnProfileQuery) -> Result<UserCard, DomainError> {
        self.reader
            .get_card(&query.actor.id)
            .await?
            .ok_or_else(user_not_found)
    }
}
