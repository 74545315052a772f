//! Waitlist and misconduct report storage.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::user::{MisconductReport, WaitlistEntry};

/// Persists waitlist submissions.
#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Stores `entry` unless its email is already on the list.
    ///
    /// Returns the stored entry and whether it was newly created.
    async fn get_or_create(&self, entry: WaitlistEntry) -> Result<(WaitlistEntry, bool), DomainError>;
}

/// Persists misconduct reports.
#[async_trait]
pub trait MisconductRepository: Send + Sync {
    async fn insert(&self, report: &MisconductReport) -> Result<(), DomainError>;
}
