//! SearchReferencesHandler - Query handler for metros, industries, and job titles.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::directory::{Page, PageRequest, ReferenceEntry, ReferenceKind, ReferenceQuery};
use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::ReferenceReader;

#[derive(Debug, Clone)]
pub struct SearchReferencesQuery {
    pub kind: ReferenceKind,
    pub params: HashMap<String, String>,
}

pub struct SearchReferencesHandler {
    references: Arc<dyn ReferenceReader>,
}

impl SearchReferencesHandler {
    pub fn new(references: Arc<dyn ReferenceReader>) -> Self {
        Self { references }
    }

    pub async fn handle(
        &self,
        query: SearchReferencesQuery,
    ) -> Result<Page<ReferenceEntry>, DomainError> {
        let search = ReferenceQuery {
            search: query
                .params
                .get("search")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            ids: parse_ids(query.params.get("id__in"))?,
        };
        let page = PageRequest::from_params(&query.params)?;
        self.references.search(query.kind, &search, page).await
    }
}

fn parse_ids(raw: Option<&String>) -> Result<Option<Vec<i64>>, ValidationError> {
    let Some(raw) = raw else { return Ok(None) };
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse().map_err(|_| {
                ValidationError::invalid_format("id__in", format!("\"{}\" is not a valid value.", item))
            })
        })
        .collect::<Result<Vec<i64>, _>>()
        .map(Some)
}
