//! CheckHandleHandler - Query handler for handle availability.

use std::sync::Arc;

use crate::domain::foundation::{admin_or_user_self, AuthenticatedUser, DomainError, UserId};
use crate::domain::user::Handle;
use crate::ports::UserRepository;

/// Query asking whether `handle` is free for `user_id`.
#[derive(Debug, Clone)]
pub struct CheckHandleQuery {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
    pub handle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CheckHandleResult {
    pub available: bool,
}

/// A handle is available when nobody but the target user holds it.
pub struct CheckHandleHandler {
    users: Arc<dyn UserRepository>,
}

impl CheckHandleHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: CheckHandleQuery) -> Result<CheckHandleResult, DomainError> {
        admin_or_user_self(&query.actor, &query.user_id).into_result()?;
        let handle = Handle::new(query.handle)?;
        let taken = self.users.handle_taken(&handle, &query.user_id).await?;
        Ok(CheckHandleResult { available: !taken })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{actor, member, store};
    use crate::domain::foundation::ErrorCode;

    fn query(actor: AuthenticatedUser, user_id: UserId, handle: &str) -> CheckHandleQuery {
        CheckHandleQuery {
            actor,
            user_id,
            handle: handle.to_string(),
        }
    }

    #[tokio::test]
    async fn own_handle_is_available() {
        let store = store();
        let alice = member(&store, Some("alice"));
        let handler = CheckHandleHandler::new(store.clone());

        let result = handler.handle(query(actor(&alice), alice.id, "alice")).await.unwrap();
        assert!(result.available);
    }

    #[tokio::test]
    async fn someone_elses_handle_is_unavailable() {
        let store = store();
        let alice = member(&store, Some("alice"));
        member(&store, Some("bob"));
        let handler = CheckHandleHandler::new(store.clone());

        let result = handler.handle(query(actor(&alice), alice.id, "bob")).await.unwrap();
        assert!(!result.available);
    }

    #[tokio::test]
    async fn malformed_handle_is_a_validation_error() {
        let store = store();
        let alice = member(&store, Some("alice"));
        let handler = CheckHandleHandler::new(store.clone());

        let err = handler
            .handle(query(actor(&alice), alice.id, "9lives"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
