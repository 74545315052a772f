//! Chat handlers.
//!
//! Chat accounts are created on demand, the first time anybody opens a
//! conversation with a member.

mod get_or_create_chat_user;
mod update_chat_terms;

pub use get_or_create_chat_user::{GetOrCreateChatUserCommand, GetOrCreateChatUserHandler};
pub use update_chat_terms::{UpdateChatTermsCommand, UpdateChatTermsHandler};
