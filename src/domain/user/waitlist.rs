//! Waitlist entries and misconduct reports.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::normalize_email;
use crate::domain::foundation::{Timestamp, UserId, ValidationError};

const MAX_ANSWER_LENGTH: usize = 1024;

/// A prospective member waiting for an invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub email: String,
    pub how_did_you_hear_about_us: String,
    pub why_do_you_want_to_join: String,
}

impl WaitlistEntry {
    /// Validates and normalizes a submission.
    pub fn new(
        email: &str,
        how_did_you_hear_about_us: impl Into<String>,
        why_do_you_want_to_join: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let email = normalize_email(email);
        validate_email(&email)?;
        let entry = Self {
            email,
            how_did_you_hear_about_us: how_did_you_hear_about_us.into(),
            why_do_you_want_to_join: why_do_you_want_to_join.into(),
        };
        for (field, value) in [
            ("how_did_you_hear_about_us", &entry.how_did_you_hear_about_us),
            ("why_do_you_want_to_join", &entry.why_do_you_want_to_join),
        ] {
            if value.chars().count() > MAX_ANSWER_LENGTH {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("Ensure this field has no more than {} characters.", MAX_ANSWER_LENGTH),
                ));
            }
        }
        Ok(entry)
    }
}

/// Minimal structural email check.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::invalid_format("email", "Enter a valid email address."))
    }
}

/// A member's complaint about another member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MisconductReport {
    pub id: Uuid,
    pub plaintiff_id: UserId,
    pub defendant_id: UserId,
    pub description: String,
    pub acknowledged_by_staff: bool,
    pub created_at: Timestamp,
}

impl MisconductReport {
    pub fn new(
        plaintiff_id: UserId,
        defendant_id: UserId,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        if plaintiff_id == defendant_id {
            return Err(ValidationError::invalid_format(
                "handle",
                "You cannot report yourself",
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            plaintiff_id,
            defendant_id,
            description,
            acknowledged_by_staff: false,
            created_at: Timestamp::now(),
        })
    }
}
