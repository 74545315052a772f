//! Single-use emailed links for sign up, email verification, and password reset.

use uuid::Uuid;

use crate::domain::foundation::{Timestamp, UserId};

fn join(site_url: &str, path: &str, id: &Uuid) -> String {
    format!("{}/{}/{}", site_url.trim_end_matches('/'), path, id)
}

/// Operator-issued invitation for one email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpLink {
    pub id: Uuid,
    pub email: String,
    pub created_at: Timestamp,
}

impl SignUpLink {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Front-end URL the invitee opens.
    pub fn url(&self, site_url: &str) -> String {
        join(site_url, "signup", &self.id)
    }
}

/// Proof-of-ownership link for a newly registered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyEmailLink {
    pub id: Uuid,
    pub user_id: UserId,
    pub created_at: Timestamp,
}

impl VerifyEmailLink {
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: Timestamp::now(),
        }
    }

    pub fn url(&self, site_url: &str) -> String {
        join(site_url, "verify-email", &self.id)
    }

    pub fn belongs_to(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }
}

/// Time-limited password reset link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPasswordLink {
    pub id: Uuid,
    pub email: String,
    pub expires_at: Timestamp,
}

impl ResetPasswordLink {
    /// Creates a link valid for `ttl_hours` from now.
    pub fn new(email: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            expires_at: Timestamp::now().plus_hours(ttl_hours),
        }
    }

    pub fn url(&self, site_url: &str) -> String {
        join(site_url, "reset-password", &self.id)
    }

    pub fn is_expired(&self, now: &Timestamp) -> bool {
        !self.expires_at.is_after(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_url_strips_trailing_slash() {
        let link = SignUpLink::new("a@example.com");
        assert_eq!(
            link.url("https://advisor.place/"),
            format!("https://advisor.place/signup/{}", link.id)
        );
    }

    #[test]
    fn reset_link_expires() {
        let mut link = ResetPasswordLink::new("a@example.com", 24);
        assert!(!link.is_expired(&Timestamp::now()));

        link.expires_at = Timestamp::now().minus_minutes(5);
        assert!(link.is_expired(&Timestamp::now()));
    }

    #[test]
    fn verify_link_belongs_to_its_user() {
        let user = UserId::new();
        let link = VerifyEmailLink::new(user);
        assert!(link.belongs_to(&user));
        assert!(!link.belongs_to(&UserId::new()));
    }
}
