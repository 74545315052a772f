//! In-memory persistence adapters.
//!
//! `InMemoryStore` implements every persistence port over one set of
//! tables so joined reads (user cards with their metro, chat account, and
//! so on) see the same data the repositories wrote. Used by tests and for
//! running the API without a database.

mod community;
mod links;
mod users;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::directory::{ReferenceEntry, ReferenceKind};
use crate::domain::foundation::UserId;
use crate::domain::user::{
    ChatUser, MisconductReport, ResetPasswordLink, SignUpLink, UserProfile, VerifyEmailLink,
    WaitlistEntry,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, UserProfile>,
    password_hashes: HashMap<UserId, String>,
    references: HashMap<ReferenceKind, Vec<ReferenceEntry>>,
    sign_up_links: Vec<SignUpLink>,
    verify_email_links: Vec<VerifyEmailLink>,
    reset_password_links: Vec<ResetPasswordLink>,
    access_tokens: HashMap<String, UserId>,
    chat_users: HashMap<UserId, ChatUser>,
    waitlist: Vec<WaitlistEntry>,
    misconduct_reports: Vec<MisconductReport>,
}

/// Shared in-memory tables behind all persistence ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reference row (metro, industry, or job title).
    pub fn with_reference(self, kind: ReferenceKind, id: i64, name: &str) -> Self {
        self.write()
            .references
            .entry(kind)
            .or_default()
            .push(ReferenceEntry::new(id, name));
        self
    }

    /// Stores a user directly, bypassing sign up.
    pub fn insert_user(&self, user: UserProfile, password_hash: impl Into<String>) {
        let mut tables = self.write();
        tables.password_hashes.insert(user.id, password_hash.into());
        tables.users.insert(user.id, user);
    }

    /// Current copy of a stored user.
    pub fn user(&self, id: &UserId) -> Option<UserProfile> {
        self.read().users.get(id).cloned()
    }

    pub fn waitlist(&self) -> Vec<WaitlistEntry> {
        self.read().waitlist.clone()
    }

    pub fn misconduct_reports(&self) -> Vec<MisconductReport> {
        self.read().misconduct_reports.clone()
    }

    /// Number of live access tokens for a user.
    pub fn token_count(&self, user_id: &UserId) -> usize {
        self.read()
            .access_tokens
            .values()
            .filter(|owner| *owner == user_id)
            .count()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}
