//! Users, directory reads, reference data, and chat accounts.

use async_trait::async_trait;

use super::{InMemoryStore, Tables};
use crate::domain::directory::{
    OrderBy, Page, PageRequest, ReferenceEntry, ReferenceKind, ReferenceQuery, UserCard,
    UserFilter,
};
use crate::domain::finance::ChangedFields;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{ChatUser, Handle, UserProfile};
use crate::ports::{ChatUserRepository, ReferenceReader, UserReader, UserRepository};

impl Tables {
    fn reference(&self, kind: ReferenceKind, id: Option<i64>) -> Option<ReferenceEntry> {
        let id = id?;
        self.references
            .get(&kind)
            .and_then(|rows| rows.iter().find(|row| row.id == id))
            .cloned()
    }

    fn card(&self, user: &UserProfile) -> UserCard {
        UserCard {
            metro: self.reference(ReferenceKind::Metro, user.metro_id.map(|id| id.as_i64())),
            industry: self.reference(ReferenceKind::Industry, user.industry_id.map(|id| id.as_i64())),
            job_title: self.reference(ReferenceKind::JobTitle, user.job_title_id.map(|id| id.as_i64())),
            chat_user: self.chat_users.get(&user.id).cloned(),
            profile: user.clone(),
        }
    }

    fn handle_owner(&self, handle: &Handle) -> Option<UserId> {
        self.users
            .values()
            .find(|user| user.handle.as_ref() == Some(handle))
            .map(|user| user.id)
    }
}

fn handle_taken() -> DomainError {
    DomainError::new(ErrorCode::HandleTaken, "A user with that handle already exists.")
        .with_detail("field", "handle")
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &UserProfile, password_hash: &str) -> Result<(), DomainError> {
        let mut tables = self.write();
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "A user with that email already exists.",
            ));
        }
        if let Some(handle) = &user.handle {
            if tables.handle_owner(handle).is_some() {
                return Err(handle_taken());
            }
        }
        tables.password_hashes.insert(user.id, password_hash.to_string());
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &UserProfile, _changed: &ChangedFields) -> Result<(), DomainError> {
        let mut tables = self.write();
        if !tables.users.contains_key(&user.id) {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }
        if let Some(handle) = &user.handle {
            if matches!(tables.handle_owner(handle), Some(owner) if owner != user.id) {
                return Err(handle_taken());
            }
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.read().users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, DomainError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_handle(&self, handle: &Handle) -> Result<Option<UserProfile>, DomainError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|user| user.handle.as_ref() == Some(handle))
            .cloned())
    }

    async fn handle_taken(&self, handle: &Handle, except: &UserId) -> Result<bool, DomainError> {
        Ok(matches!(self.read().handle_owner(handle), Some(owner) if owner != *except))
    }

    async fn password_hash(&self, id: &UserId) -> Result<Option<String>, DomainError> {
        Ok(self.read().password_hashes.get(id).cloned())
    }

    async fn set_password_hash(&self, id: &UserId, password_hash: &str) -> Result<(), DomainError> {
        let mut tables = self.write();
        if !tables.users.contains_key(id) {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }
        tables.password_hashes.insert(*id, password_hash.to_string());
        Ok(())
    }
}

#[async_trait]
impl UserReader for InMemoryStore {
    async fn get_card(&self, id: &UserId) -> Result<Option<UserCard>, DomainError> {
        let tables = self.read();
        Ok(tables
            .users
            .get(id)
            .filter(|user| !user.is_deleted())
            .map(|user| tables.card(user)))
    }

    async fn list(
        &self,
        filter: &UserFilter,
        order: &OrderBy,
        page: PageRequest,
    ) -> Result<Page<UserCard>, DomainError> {
        let tables = self.read();
        let mut cards: Vec<UserCard> = tables
            .users
            .values()
            .filter(|user| filter.matches(user))
            .map(|user| tables.card(user))
            .collect();
        cards.sort_by(|a, b| order.compare(a, b));
        Page::from_all(cards, page)
    }
}

#[async_trait]
impl ReferenceReader for InMemoryStore {
    async fn search(
        &self,
        kind: ReferenceKind,
        query: &ReferenceQuery,
        page: PageRequest,
    ) -> Result<Page<ReferenceEntry>, DomainError> {
        let mut rows: Vec<ReferenceEntry> = self
            .read()
            .references
            .get(&kind)
            .map(|rows| rows.iter().filter(|row| query.matches(row)).cloned().collect())
            .unwrap_or_default();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Page::from_all(rows, page)
    }

    async fn exists(&self, kind: ReferenceKind, id: i64) -> Result<bool, DomainError> {
        Ok(self.read().reference(kind, Some(id)).is_some())
    }
}

#[async_trait]
impl ChatUserRepository for InMemoryStore {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<ChatUser>, DomainError> {
        Ok(self.read().chat_users.get(user_id).cloned())
    }

    async fn insert(&self, chat_user: &ChatUser) -> Result<(), DomainError> {
        let mut tables = self.write();
        if tables.chat_users.contains_key(&chat_user.user_id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "User already has a chat account",
            ));
        }
        tables.chat_users.insert(chat_user.user_id, chat_user.clone());
        Ok(())
    }

    async fn update(&self, chat_user: &ChatUser) -> Result<(), DomainError> {
        let mut tables = self.write();
        match tables.chat_users.get_mut(&chat_user.user_id) {
            Some(existing) => {
                *existing = chat_user.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Chat user")),
        }
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.write().chat_users.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::OrderKey;
    use crate::domain::foundation::MetroAreaId;
    use rust_decimal_macros::dec;

    fn store() -> InMemoryStore {
        InMemoryStore::new()
            .with_reference(ReferenceKind::Metro, 1, "Seattle")
            .with_reference(ReferenceKind::Metro, 2, "Austin")
            .with_reference(ReferenceKind::Industry, 1, "Software")
    }

    fn member(handle: &str, net_worth: Option<rust_decimal::Decimal>) -> UserProfile {
        let mut user = UserProfile::register(format!("{}@example.com", handle));
        user.handle = Some(Handle::new(handle).unwrap());
        user.finances.net_worth = net_worth;
        user
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = store();
        let user = UserProfile::register("dup@example.com");
        store.create(&user, "hash").await.unwrap();

        let again = UserProfile::register("dup@example.com");
        let err = store.create(&again, "hash").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn update_rejects_handle_held_by_someone_else() {
        let store = store();
        let alice = member("alice", None);
        let mut bob = member("bob", None);
        store.create(&alice, "h").await.unwrap();
        store.create(&bob, "h").await.unwrap();

        bob.handle = Some(Handle::new("alice").unwrap());
        let err = UserRepository::update(&store, &bob, &ChangedFields::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::HandleTaken);
    }

    #[tokio::test]
    async fn handle_taken_ignores_the_holder() {
        let store = store();
        let alice = member("alice", None);
        store.create(&alice, "h").await.unwrap();
        let handle = Handle::new("alice").unwrap();

        assert!(!store.handle_taken(&handle, &alice.id).await.unwrap());
        assert!(store.handle_taken(&handle, &UserId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn card_joins_reference_names() {
        let store = store();
        let mut user = member("alice", None);
        user.metro_id = Some(MetroAreaId::new(2));
        store.create(&user, "h").await.unwrap();

        let card = store.get_card(&user.id).await.unwrap().unwrap();
        assert_eq!(card.metro, Some(ReferenceEntry::new(2, "Austin")));
        assert!(card.industry.is_none());
    }

    #[tokio::test]
    async fn list_sorts_nulls_last_and_skips_deleted() {
        let store = store();
        let rich = member("rich", Some(dec!(500)));
        let poor = member("poor", Some(dec!(5)));
        let unknown = member("unknown", None);
        let mut gone = member("gone", Some(dec!(1)));
        gone.soft_delete();
        for user in [&rich, &poor, &unknown, &gone] {
            store.create(user, "h").await.unwrap();
        }

        let order = OrderBy {
            key: OrderKey::Money(crate::domain::directory::MoneyColumn::NetWorth),
            descending: true,
        };
        let page = store
            .list(&UserFilter::default(), &order, PageRequest::default())
            .await
            .unwrap();

        let handles: Vec<_> = page
            .results
            .iter()
            .map(|c| c.profile.handle.as_ref().unwrap().as_str().to_string())
            .collect();
        assert_eq!(handles, vec!["rich", "poor", "unknown"]);
        assert_eq!(page.count, 3);
    }

    #[tokio::test]
    async fn reference_search_orders_by_name() {
        let store = store();
        let page = store
            .search(ReferenceKind::Metro, &ReferenceQuery::default(), PageRequest::default())
            .await
            .unwrap();
        let names: Vec<_> = page.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Austin", "Seattle"]);
        assert!(store.exists(ReferenceKind::Industry, 1).await.unwrap());
        assert!(!store.exists(ReferenceKind::JobTitle, 1).await.unwrap());
    }
}
