//! Password strength policy applied at sign up and password reset.

use crate::domain::foundation::ValidationError;

const MIN_LENGTH: usize = 8;

/// Lowercased passwords rejected outright.
const COMMON_PASSWORDS: &[&str] = &[
    "123456", "12345678", "123456789", "1234567890", "password", "password1", "password12",
    "password123", "passw0rd", "qwerty", "qwerty123", "qwertyuiop", "abc123", "abcd1234",
    "111111", "11111111", "000000", "00000000", "iloveyou", "letmein", "welcome", "welcome1",
    "monkey", "dragon", "football", "baseball", "sunshine", "princess", "trustno1", "superman",
    "starwars", "master", "shadow", "michael", "jennifer", "whatever", "freedom", "computer",
    "internet", "1q2w3e4r", "1qaz2wsx", "zaq12wsx", "asdfghjkl", "changeme", "secret123",
    "admin123", "administrator", "login123", "p@ssw0rd", "p@ssword",
];

/// Checks a candidate password against the account email.
///
/// Rules: at least eight characters, not entirely numeric, not a common
/// password, and not built around the local part of the email.
pub fn validate_password(password: &str, email: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_LENGTH {
        return Err(ValidationError::invalid_format(
            "password",
            format!(
                "This password is too short. It must contain at least {} characters.",
                MIN_LENGTH
            ),
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "password",
            "This password is entirely numeric.",
        ));
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        return Err(ValidationError::invalid_format(
            "password",
            "This password is too common.",
        ));
    }

    let local = email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    if local.chars().count() >= 3 && (lowered.contains(&local) || local.contains(&lowered)) {
        return Err(ValidationError::invalid_format(
            "password",
            "The password is too similar to the email address.",
        ));
    }
    Ok(())
}
