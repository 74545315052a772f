//! Fixtures shared by handler tests.

use std::sync::Arc;

use crate::adapters::memory::InMemoryStore;
use crate::domain::directory::ReferenceKind;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::user::{Handle, UserProfile};

pub const PASSWORD: &str = "Password!123";

/// Store seeded with one row per reference table.
pub fn store() -> Arc<InMemoryStore> {
    Arc::new(
        InMemoryStore::new()
            .with_reference(ReferenceKind::Metro, 1, "Seattle")
            .with_reference(ReferenceKind::Industry, 1, "Software")
            .with_reference(ReferenceKind::JobTitle, 1, "Engineer"),
    )
}

/// Inserts a verified member whose password is [`PASSWORD`].
pub fn member(store: &InMemoryStore, handle: Option<&str>) -> UserProfile {
    let mut user = UserProfile::register("placeholder@example.com");
    user.email = format!(
        "{}@example.com",
        handle.map(str::to_string).unwrap_or_else(|| user.id.to_string())
    );
    user.email_verified = true;
    user.handle = handle.map(|h| Handle::new(h).unwrap());
    store.insert_user(user.clone(), format!("fake${}", PASSWORD));
    user
}

/// Inserts an administrator.
pub fn admin(store: &InMemoryStore) -> UserProfile {
    let mut user = UserProfile::register("admin@example.com");
    user.is_admin = true;
    user.email_verified = true;
    store.insert_user(user.clone(), format!("fake${}", PASSWORD));
    user
}

pub fn actor(user: &UserProfile) -> AuthenticatedUser {
    AuthenticatedUser::new(user.id, &user.email, user.is_admin, user.email_verified)
}
