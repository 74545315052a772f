//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - Account writes and credential storage
//! - `UserReader` - Profile pages and directory listings
//! - `ReferenceReader` - Metros, industries, job titles
//! - `LinkRepository` - Sign up, verification, and reset links
//! - `AccessTokenStore` - Bearer token digests
//! - `WaitlistRepository`, `MisconductRepository` - Community submissions
//! - `ChatUserRepository` - Local mirror of chat accounts
//!
//! ## Integration Ports
//!
//! - `SessionValidator` - Bearer token to account resolution
//! - `PasswordHasher` - One-way password hashing
//! - `ChatProvider` - External chat service
//! - `EmailSender`, `Mailer` - Outbound email

mod access_token_store;
mod chat_provider;
mod community_repository;
mod email_sender;
mod link_repository;
mod password_hasher;
mod reference_reader;
mod session_validator;
mod user_reader;
mod user_repository;

pub use access_token_store::AccessTokenStore;
pub use chat_provider::{ChatError, ChatProvider, ChatUserRepository, ProviderChatUser};
pub use community_repository::{MisconductRepository, WaitlistRepository};
pub use email_sender::{EmailError, EmailMessage, EmailSender, Mailer};
pub use link_repository::LinkRepository;
pub use password_hasher::PasswordHasher;
pub use reference_reader::ReferenceReader;
pub use session_validator::SessionValidator;
pub use user_reader::UserReader;
pub use user_repository::UserRepository;
