//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (writes) recompute derived finances before persisting;
//! query handlers (reads) go through the reader ports.

pub mod handlers;

pub use handlers::*;
