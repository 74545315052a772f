//! Waitlist and misconduct reports.

use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::foundation::DomainError;
use crate::domain::user::{MisconductReport, WaitlistEntry};
use crate::ports::{MisconductRepository, WaitlistRepository};

#[async_trait]
impl WaitlistRepository for InMemoryStore {
    async fn get_or_create(&self, entry: WaitlistEntry) -> Result<(WaitlistEntry, bool), DomainError> {
        let mut tables = self.write();
        if let Some(existing) = tables.waitlist.iter().find(|e| e.email == entry.email) {
            return Ok((existing.clone(), false));
        }
        tables.waitlist.push(entry.clone());
        Ok((entry, true))
    }
}

#[async_trait]
impl MisconductRepository for InMemoryStore {
    async fn insert(&self, report: &MisconductReport) -> Result<(), DomainError> {
        self.write().misconduct_reports.push(report.clone());
        Ok(())
    }
}
