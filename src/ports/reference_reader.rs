//! Reference data reader port.

use async_trait::async_trait;

use crate::domain::directory::{Page, PageRequest, ReferenceEntry, ReferenceKind, ReferenceQuery};
use crate::domain::foundation::DomainError;

/// Read access to metros, industries, and job titles.
#[async_trait]
pub trait ReferenceReader: Send + Sync {
    /// Searches one table, ordered by name.
    async fn search(
        &self,
        kind: ReferenceKind,
        query: &ReferenceQuery,
        page: PageRequest,
    ) -> Result<Page<ReferenceEntry>, DomainError>;

    /// Returns true if a row with `id` exists in the table.
    async fn exists(&self, kind: ReferenceKind, id: i64) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ReferenceReader) {}
    }
}
