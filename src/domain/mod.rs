//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth, errors)
//! - `finance` - Financial inputs and the derived-field engine
//! - `user` - Member accounts, handles, links, chat accounts
//! - `directory` - User and reference-data search

pub mod directory;
pub mod finance;
pub mod foundation;
pub mod user;
