//! Directory module - searching users and reference data.
//!
//! - `reference` - metros, industries, job titles
//! - `card` - joined read model for one user
//! - `filter` - `field__lookup` query filters
//! - `ordering` - whitelisted sort keys, nulls last
//! - `pagination` - page-number pages with `{count, next, previous, results}`

mod card;
mod filter;
mod ordering;
mod pagination;
mod reference;

pub use card::UserCard;
pub use filter::{MoneyColumn, Range, UserFilter};
pub use ordering::{OrderBy, OrderKey};
pub use pagination::{Page, PageNumber, PageRequest, PageWindow, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use reference::{ReferenceEntry, ReferenceKind, ReferenceQuery};
