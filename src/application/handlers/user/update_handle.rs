//! UpdateHandleHandler - Command handler for changing a member's handle.

use std::sync::Arc;

use crate::application::handlers::user_not_found;
use crate::domain::directory::UserCard;
use crate::domain::foundation::{
    admin_or_user_self, AuthenticatedUser, DomainError, ErrorCode, Timestamp, UserId,
};
use crate::domain::user::Handle;
use crate::ports::{ChatProvider, ChatUserRepository, UserReader, UserRepository};

#[derive(Debug, Clone)]
pub struct UpdateHandleCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
    pub handle: String,
}

/// Handler for handle changes.
///
/// The handle doubles as the chat username, so an existing chat account is
/// renamed on the provider before the new handle is stored.
pub struct UpdateHandleHandler {
    users: Arc<dyn UserRepository>,
    reader: Arc<dyn UserReader>,
    chat_users: Arc<dyn ChatUserRepository>,
    chat: Arc<dyn ChatProvider>,
}

impl UpdateHandleHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        reader: Arc<dyn UserReader>,
        chat_users: Arc<dyn ChatUserRepository>,
        chat: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            users,
            reader,
            chat_users,
            chat,
        }
    }

    pub async fn handle(&self, cmd: UpdateHandleCommand) -> Result<UserCard, DomainError> {
        // 1. Authorize and validate
        admin_or_user_self(&cmd.actor, &cmd.user_id).into_result()?;
        let handle = Handle::new(cmd.handle)?;

        // 2. Load the target
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or_else(user_not_found)?;

        // 3. Reject handles held by someone else
        if self.users.handle_taken(&handle, &user.id).await? {
            return Err(DomainError::new(
                ErrorCode::HandleTaken,
                "A user with this handle already exists",
            )
            .with_detail("field", "handle"));
        }

        // 4. Rename the chat account
        if let Some(mut chat_user) = self.chat_users.find_by_user(&user.id).await? {
            self.chat
                .update_username(chat_user.chat_engine_id, handle.as_str())
                .await?;
            chat_user.username = handle.as_str().to_string();
            self.chat_users.update(&chat_user).await?;
        }

        // 5. Persist
        user.handle = Some(handle);
        user.updated_at = Timestamp::now();
        let (user, changed) = user.recompute_finances();
        self.users.update(&user, &changed).await?;
        tracing::info!(user_id = %user.id, "handle updated");

        self.reader
            .get_card(&user.id)
            .await?
            .ok_or_else(user_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::chat::MockChatProvider;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{actor, member, store};
    use crate::domain::user::ChatUser;
    use crate::ports::ChatError;

    fn handler(store: &Arc<InMemoryStore>, chat: Arc<MockChatProvider>) -> UpdateHandleHandler {
        UpdateHandleHandler::new(store.clone(), store.clone(), store.clone(), chat)
    }

    fn command(actor: AuthenticatedUser, user_id: UserId, handle: &str) -> UpdateHandleCommand {
        UpdateHandleCommand {
            actor,
            user_id,
            handle: handle.to_string(),
        }
    }

    #[tokio::test]
    async fn sets_a_new_handle() {
        let store = store();
        let alice = member(&store, None);

        let card = handler(&store, Arc::new(MockChatProvider::new()))
            .handle(command(actor(&alice), alice.id, "alice_2"))
            .await
            .unwrap();

        assert_eq!(card.profile.handle.unwrap().as_str(), "alice_2");
    }

    #[tokio::test]
    async fn taken_handle_is_rejected() {
        let store = store();
        let alice = member(&store, Some("alice"));
        member(&store, Some("bob"));

        let err = handler(&store, Arc::new(MockChatProvider::new()))
            .handle(command(actor(&alice), alice.id, "bob"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::HandleTaken);
        assert_eq!(err.message, "A user with this handle already exists");
    }

    #[tokio::test]
    async fn renames_existing_chat_account() {
        let store = store();
        let alice = member(&store, Some("alice"));
        let chat = Arc::new(MockChatProvider::new());
        let remote = chat.create_user("alice", "secret").await.unwrap();
        ChatUserRepository::insert(
            store.as_ref(),
            &ChatUser {
                user_id: alice.id,
                chat_engine_id: remote.id,
                username: "alice".to_string(),
                secret: "secret".to_string(),
                agreed_to_terms: true,
            },
        )
        .await
        .unwrap();

        let card = handler(&store, chat.clone())
            .handle(command(actor(&alice), alice.id, "other_new_handle"))
            .await
            .unwrap();

        assert_eq!(chat.user(remote.id).unwrap().username, "other_new_handle");
        assert_eq!(card.chat_user.unwrap().username, "other_new_handle");
    }

    #[tokio::test]
    async fn provider_failure_leaves_handle_unchanged() {
        let store = store();
        let alice = member(&store, Some("alice"));
        let chat = Arc::new(MockChatProvider::new());
        let remote = chat.create_user("alice", "secret").await.unwrap();
        ChatUserRepository::insert(
            store.as_ref(),
            &ChatUser {
                user_id: alice.id,
                chat_engine_id: remote.id,
                username: "alice".to_string(),
                secret: "secret".to_string(),
                agreed_to_terms: false,
            },
        )
        .await
        .unwrap();
        let failing = Arc::new(MockChatProvider::new().with_error(ChatError::Unknown));

        let err = handler(&store, failing)
            .handle(command(actor(&alice), alice.id, "renamed"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ChatProviderError);
        assert_eq!(store.user(&alice.id).unwrap().handle.unwrap().as_str(), "alice");
    }
}
