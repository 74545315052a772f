//! In-process chat provider for tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::foundation::ChatEngineId;
use crate::ports::{ChatError, ChatProvider, ProviderChatUser};

#[derive(Debug, Default)]
struct MockState {
    next_id: i64,
    users: HashMap<ChatEngineId, ProviderChatUser>,
    force_error: Option<ChatError>,
}

/// Chat provider that keeps accounts in a map.
///
/// Usernames are unique, as on the real service.
#[derive(Debug, Default)]
pub struct MockChatProvider {
    state: Mutex<MockState>,
}

impl MockChatProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every call with `error`.
    pub fn with_error(self, error: ChatError) -> Self {
        self.lock().force_error = Some(error);
        self
    }

    /// Current account on the provider, if any.
    pub fn user(&self, id: ChatEngineId) -> Option<ProviderChatUser> {
        self.lock().users.get(&id).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MockState {
    fn check(&self) -> Result<(), ChatError> {
        match &self.force_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn username_taken(&self, username: &str, except: Option<ChatEngineId>) -> bool {
        self.users
            .values()
            .any(|u| u.username == username && Some(u.id) != except)
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn create_user(&self, username: &str, _secret: &str) -> Result<ProviderChatUser, ChatError> {
        let mut state = self.lock();
        state.check()?;
        if state.username_taken(username, None) {
            return Err(ChatError::rejected("This username is taken."));
        }
        state.next_id += 1;
        let user = ProviderChatUser {
            id: ChatEngineId::new(state.next_id),
            username: username.to_string(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: ChatEngineId) -> Result<ProviderChatUser, ChatError> {
        let state = self.lock();
        state.check()?;
        state.users.get(&id).cloned().ok_or(ChatError::NotFound)
    }

    async fn update_username(
        &self,
        id: ChatEngineId,
        username: &str,
    ) -> Result<ProviderChatUser, ChatError> {
        let mut state = self.lock();
        state.check()?;
        if state.username_taken(username, Some(id)) {
            return Err(ChatError::rejected("This username is taken."));
        }
        let user = state.users.get_mut(&id).ok_or(ChatError::NotFound)?;
        user.username = username.to_string();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: ChatEngineId) -> Result<(), ChatError> {
        let mut state = self.lock();
        state.check()?;
        state.users.remove(&id).map(|_| ()).ok_or(ChatError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_rename_delete() {
        let provider = MockChatProvider::new();
        let created = provider.create_user("alice", "secret").await.unwrap();

        let renamed = provider.update_username(created.id, "alicia").await.unwrap();
        assert_eq!(renamed.username, "alicia");

        provider.delete_user(created.id).await.unwrap();
        assert!(matches!(
            provider.get_user(created.id).await,
            Err(ChatError::NotFound)
        ));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let provider = MockChatProvider::new();
        provider.create_user("alice", "s").await.unwrap();
        let err = provider.create_user("alice", "s").await.unwrap_err();
        assert!(matches!(err, ChatError::Rejected(_)));
    }

    #[tokio::test]
    async fn forced_error_is_returned() {
        let provider = MockChatProvider::new().with_error(ChatError::Unknown);
        assert!(provider.create_user("bob", "s").await.is_err());
    }
}
