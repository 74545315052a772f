//! UpdateChatTermsHandler - Command handler for the chat terms agreement.

use std::sync::Arc;

use crate::application::handlers::user_not_found;
use crate::domain::directory::UserCard;
use crate::domain::foundation::{admin_or_user_self, AuthenticatedUser, DomainError, UserId};
use crate::ports::{ChatUserRepository, UserReader};

#[derive(Debug, Clone)]
pub struct UpdateChatTermsCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
    pub agreed_to_terms: bool,
}

pub struct UpdateChatTermsHandler {
    reader: Arc<dyn UserReader>,
    chat_users: Arc<dyn ChatUserRepository>,
}

impl UpdateChatTermsHandler {
    pub fn new(reader: Arc<dyn UserReader>, chat_users: Arc<dyn ChatUserRepository>) -> Self {
        Self { reader, chat_users }
    }

    pub async fn handle(&self, cmd: UpdateChatTermsCommand) -> Result<UserCard, DomainError> {
        admin_or_user_self(&cmd.actor, &cmd.user_id).into_result()?;

        let mut card = self
            .reader
            .get_card(&cmd.user_id)
            .await?
            .ok_or_else(user_not_found)?;
        let mut chat_user = card
            .chat_user
            .take()
            .ok_or_else(|| DomainError::not_found("Chat user"))?;

        chat_user.agreed_to_terms = cmd.agreed_to_terms;
        self.chat_users.update(&chat_user).await?;
        tracing::info!(
            user_id = %chat_user.user_id,
            agreed = chat_user.agreed_to_terms,
            "chat terms updated"
        );

        card.chat_user = Some(chat_user);
        Ok(card)
    }
}
