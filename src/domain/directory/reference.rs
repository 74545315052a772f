//! Reference data: metropolitan areas, industries, and job titles.

use serde::{Deserialize, Serialize};

/// The three reference tables users point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Metro,
    Industry,
    JobTitle,
}

impl ReferenceKind {
    /// Backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            ReferenceKind::Metro => "metropolitan_areas",
            ReferenceKind::Industry => "industries",
            ReferenceKind::JobTitle => "job_titles",
        }
    }

    /// Field name used in request bodies and error details.
    pub fn field(&self) -> &'static str {
        match self {
            ReferenceKind::Metro => "metro",
            ReferenceKind::Industry => "industry",
            ReferenceKind::JobTitle => "job_title",
        }
    }
}

/// A named reference row, serialized as `{id, name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: i64,
    pub name: String,
}

impl ReferenceEntry {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Search over one reference table. Results are ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceQuery {
    /// Case-insensitive substring of the name.
    pub search: Option<String>,
    /// Restrict to these ids (`id__in`).
    pub ids: Option<Vec<i64>>,
}

impl ReferenceQuery {
    pub fn matches(&self, entry: &ReferenceEntry) -> bool {
        let search_ok = self
            .search
            .as_deref()
            .map(|term| entry.name.to_lowercase().contains(&term.to_lowercase()))
            .unwrap_or(true);
        let ids_ok = self
            .ids
            .as_ref()
            .map(|ids| ids.contains(&entry.id))
            .unwrap_or(true);
        search_ok && ids_ok
    }
}
