//! ListUsersHandler - Query handler for the filtered member directory.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::directory::{OrderBy, Page, PageRequest, UserCard, UserFilter};
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::ports::UserReader;

/// Directory query built from raw query-string parameters.
#[derive(Debug, Clone)]
pub struct ListUsersQuery {
    pub actor: AuthenticatedUser,
    pub params: HashMap<String, String>,
}

/// Handler for directory listings.
///
/// The caller never appears in their own results. Unknown parameters are
/// ignored; an unknown `order_by` key is a validation error.
pub struct ListUsersHandler {
    reader: Arc<dyn UserReader>,
}

impl ListUsersHandler {
    pub fn new(reader: Arc<dyn UserReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListUsersQuery) -> Result<Page<UserCard>, DomainError> {
        let filter = UserFilter::from_params(&query.params)?.excluding(query.actor.id);
        let order = OrderBy::parse(query.params.get("order_by").map(String::as_str))?;
        let page = PageRequest::from_params(&query.params)?;

        let result = self.reader.list(&filter, &order, page).await?;
        tracing::debug!(
            actor_id = %query.actor.id,
            count = result.count,
            page = %page.page,
            "directory listed"
        );
        Ok(result)
    }
}
