//! Page-number pagination.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// The page a caller asked for: a 1-based number or the final page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Number(u32),
    Last,
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageNumber::Number(n) => write!(f, "{}", n),
            PageNumber::Last => f.write_str("last"),
        }
    }
}

/// A requested page and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: PageNumber,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: PageNumber::Number(1),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: PageNumber::Number(page),
            page_size,
        }
    }

    /// Reads `page` and `page_size` from query parameters.
    ///
    /// An unusable `page_size` falls back to the default and is capped at the
    /// maximum. An unusable `page` is a not-found error.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, DomainError> {
        let page = match params.get("page").map(|s| s.trim()) {
            None | Some("") => PageNumber::Number(1),
            Some("last") => PageNumber::Last,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|p| *p >= 1)
                .map(PageNumber::Number)
                .ok_or_else(invalid_page)?,
        };
        let page_size = params
            .get("page_size")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|size| *size >= 1)
            .map(|size| size.min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Ok(Self { page, page_size })
    }

    /// Pins the request to a concrete page once the total is known.
    pub fn resolve(self, count: u64) -> PageWindow {
        let page = match self.page {
            PageNumber::Number(n) => n,
            PageNumber::Last => {
                let pages = count.div_ceil(u64::from(self.page_size)).max(1);
                u32::try_from(pages).unwrap_or(u32::MAX)
            }
        };
        PageWindow {
            page,
            page_size: self.page_size,
        }
    }
}

/// A concrete 1-based page, ready to slice a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub page_size: u32,
}

impl PageWindow {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

fn invalid_page() -> DomainError {
    DomainError::new(ErrorCode::NotFound, "Invalid page.")
}

/// One page of results, serialized as `{count, next, previous, results}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wraps one page of results.
    ///
    /// Fails with not-found when the page lies past the end; page 1 of an
    /// empty result is valid.
    pub fn new(results: Vec<T>, count: u64, window: PageWindow) -> Result<Self, DomainError> {
        if window.page > 1 && window.offset() >= count {
            return Err(invalid_page());
        }
        let has_next = window.offset() + (results.len() as u64) < count;
        Ok(Self {
            count,
            next: window.page.checked_add(1).filter(|_| has_next),
            previous: (window.page > 1).then(|| window.page - 1),
            results,
        })
    }

    /// Transforms every result, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }

    /// Slices an in-memory result set.
    pub fn from_all(all: Vec<T>, request: PageRequest) -> Result<Self, DomainError> {
        let count = all.len() as u64;
        let window = request.resolve(count);
        let results = all
            .into_iter()
            .skip(usize::try_from(window.offset()).unwrap_or(usize::MAX))
            .take(window.limit() as usize)
            .collect();
        Page::new(results, count, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_to_first_page_of_twenty() {
        let request = PageRequest::from_params(&HashMap::new()).unwrap();
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn page_size_is_capped_and_sanitized() {
        let big = PageRequest::from_params(&params(&[("page_size", "500")])).unwrap();
        assert_eq!(big.page_size, MAX_PAGE_SIZE);

        let junk = PageRequest::from_params(&params(&[("page_size", "abc")])).unwrap();
        assert_eq!(junk.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn invalid_page_is_not_found() {
        let err = PageRequest::from_params(&params(&[("page", "0")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn slices_twenty_five_items() {
        let items: Vec<u32> = (0..25).collect();

        let first = Page::from_all(items.clone(), PageRequest::default()).unwrap();
        assert_eq!(first.count, 25);
        assert_eq!(first.results.len(), 20);
        assert_eq!(first.next, Some(2));
        assert_eq!(first.previous, None);

        let second = Page::from_all(items.clone(), PageRequest::new(2, 20)).unwrap();
        assert_eq!(second.results.len(), 5);
        assert_eq!(second.next, None);
        assert_eq!(second.previous, Some(1));

        let all = Page::from_all(items, PageRequest::new(1, 25)).unwrap();
        assert_eq!(all.results.len(), 25);
    }

    #[test]
    fn page_past_the_end_is_not_found() {
        let items: Vec<u32> = (0..5).collect();
        let err = Page::from_all(items, PageRequest::new(2, 20)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn empty_first_page_is_valid() {
        let page = Page::<u32>::from_all(Vec::new(), PageRequest::default()).unwrap();
        assert_eq!(page.count, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn last_resolves_to_final_page() {
        let request = PageRequest::from_params(&params(&[("page", "last")])).unwrap();
        let page = Page::from_all((0..45).collect::<Vec<u32>>(), request).unwrap();
        assert_eq!(page.results.len(), 5);
        assert_eq!(page.previous, Some(2));
    }

    #[test]
    fn numeric_page_at_the_top_of_the_range_is_not_last() {
        let request = PageRequest::from_params(&params(&[("page", "4294967295")])).unwrap();
        assert_eq!(request.page, PageNumber::Number(u32::MAX));

        let err = Page::from_all((0..45).collect::<Vec<u32>>(), request).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn last_of_an_empty_set_is_the_first_page() {
        let request = PageRequest::from_params(&params(&[("page", "last")])).unwrap();
        assert_eq!(request.page, PageNumber::Last);
        assert_eq!(request.resolve(0).page, 1);
        assert!(Page::<u32>::from_all(Vec::new(), request).unwrap().results.is_empty());
    }
}
