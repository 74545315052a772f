//! Password hashing port.

use crate::domain::foundation::DomainError;

/// One-way password hashing with salted, self-describing output.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// A malformed stored hash verifies as `false`.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
