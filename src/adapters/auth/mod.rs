//! Authentication adapters.
//!
//! - `token` - `SessionValidator` over opaque bearer tokens
//! - `argon` - Argon2id `PasswordHasher`
//! - `mock` - Test implementations that skip hashing and token storage

mod argon;
mod mock;
mod token;

pub use argon::Argon2PasswordHasher;
pub use mock::{FakePasswordHasher, MockSessionValidator};
pub use token::TokenSessionValidator;
