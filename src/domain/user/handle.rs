//! Public handle value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

const MAX_LENGTH: usize = 128;

/// A unique public name. Also used as the chat username.
///
/// Must look like an identifier: a letter or underscore followed by letters,
/// digits, or underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Validates and wraps a handle.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("handle"));
        }
        if value.chars().count() > MAX_LENGTH {
            return Err(ValidationError::invalid_format(
                "handle",
                format!("Ensure this field has no more than {} characters.", MAX_LENGTH),
            ));
        }
        if !is_identifier(&value) {
            return Err(ValidationError::invalid_format(
                "handle",
                "Handle is not a valid identifier",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl TryFrom<String> for Handle {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Handle::new(value)
    }
}

impl From<Handle> for String {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_identifiers() {
        assert!(Handle::new("player1").is_ok());
        assert!(Handle::new("_hidden").is_ok());
        assert!(Handle::new("new_handle").is_ok());
    }

    #[test]
    fn rejects_non_identifiers() {
        assert!(Handle::new("Not identifier").is_err());
        assert!(Handle::new("1player").is_err());
        assert!(Handle::new("dash-name").is_err());
        assert!(Handle::new("").is_err());
    }

    #[test]
    fn rejects_overlong_handles() {
        assert!(Handle::new("a".repeat(128)).is_ok());
        assert!(Handle::new("a".repeat(129)).is_err());
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<Handle>("\"ok_name\"").is_ok());
        assert!(serde_json::from_str::<Handle>("\"bad name\"").is_err());
    }
}
