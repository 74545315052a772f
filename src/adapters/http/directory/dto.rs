//! HTTP DTOs for directory endpoints.

use serde::Serialize;

use crate::domain::directory::Page;

/// `{count, next, previous, results}` with page numbers for links.
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    pub count: u64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

impl<T, U> From<Page<T>> for PageResponse<U>
where
    U: From<T>,
{
    fn from(page: Page<T>) -> Self {
        let page = page.map(U::from);
        Self {
            count: page.count,
            next: page.next,
            previous: page.previous,
            results: page.results,
        }
    }
}
