//! GetOrCreateChatUserHandler - Command handler that provisions a chat account.

use std::sync::Arc;

use crate::application::handlers::user_not_found;
use crate::domain::directory::UserCard;
use crate::domain::foundation::{AuthenticatedUser, DomainError, UserId};
use crate::domain::user::ChatUser;
use crate::ports::{ChatProvider, ChatUserRepository, UserReader};

#[derive(Debug, Clone)]
pub struct GetOrCreateChatUserCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
    pub agreed_to_terms: bool,
}

/// Returns the target's card with a chat account attached.
///
/// Any authenticated member may trigger creation for any other member; the
/// target's handle becomes the chat username. An existing account is
/// returned untouched.
pub struct GetOrCreateChatUserHandler {
    reader: Arc<dyn UserReader>,
    chat_users: Arc<dyn ChatUserRepository>,
    chat: Arc<dyn ChatProvider>,
}

impl GetOrCreateChatUserHandler {
    pub fn new(
        reader: Arc<dyn UserReader>,
        chat_users: Arc<dyn ChatUserRepository>,
        chat: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            reader,
            chat_users,
            chat,
        }
    }

    pub async fn handle(&self, cmd: GetOrCreateChatUserCommand) -> Result<UserCard, DomainError> {
        // 1. Load the target
        let card = self
            .reader
            .get_card(&cmd.user_id)
            .await?
            .ok_or_else(user_not_found)?;
        if card.chat_user.is_some() {
            return Ok(card);
        }
        let handle = card.profile.handle.clone().ok_or_else(|| {
            DomainError::validation("handle", "User must set a handle before chatting")
        })?;

        // 2. Create the remote account
        let secret = ChatUser::generate_secret();
        let remote = self.chat.create_user(handle.as_str(), &secret).await?;
        let chat_user = ChatUser {
            user_id: card.profile.id,
            chat_engine_id: remote.id,
            username: remote.username,
            secret,
            agreed_to_terms: cmd.agreed_to_terms,
        };

        // 3. Mirror it locally, removing the remote account if that fails
        if let Err(err) = self.chat_users.insert(&chat_user).await {
            tracing::error!(
                user_id = %chat_user.user_id,
                chat_engine_id = %chat_user.chat_engine_id,
                error = %err,
                "failed to store chat user, deleting remote account"
            );
            if let Err(cleanup) = self.chat.delete_user(chat_user.chat_engine_id).await {
                tracing::warn!(error = %cleanup, "remote chat account left behind");
            }
            return Err(err);
        }
        tracing::info!(
            user_id = %chat_user.user_id,
            actor_id = %cmd.actor.id,
            chat_engine_id = %chat_user.chat_engine_id,
            "chat user created"
        );

        Ok(UserCard {
            chat_user: Some(chat_user),
            ..card
        })
    }
}
