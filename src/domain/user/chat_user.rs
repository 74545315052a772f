//! Chat account attached to a user.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::foundation::{ChatEngineId, UserId};

/// A user's account on the external chat provider.
///
/// `secret` is the provider-side password; it is handed to the owning
/// client so it can log in to the chat widget directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    pub user_id: UserId,
    pub chat_engine_id: ChatEngineId,
    pub username: String,
    pub secret: String,
    pub agreed_to_terms: bool,
}

impl ChatUser {
    /// Generates a fresh provider secret.
    pub fn generate_secret() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Wire form of a chat account.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatUserView {
    pub chat_engine_id: ChatEngineId,
    pub username: String,
    pub password: String,
    pub agreed_to_terms: bool,
}

impl From<&ChatUser> for ChatUserView {
    fn from(chat_user: &ChatUser) -> Self {
        Self {
            chat_engine_id: chat_user.chat_engine_id,
            username: chat_user.username.clone(),
            password: chat_user.secret.clone(),
            agreed_to_terms: chat_user.agreed_to_terms,
        }
    }
}
