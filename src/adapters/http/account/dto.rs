//! HTTP DTOs for account endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::directory::{ReferenceEntry, UserCard};
use crate::domain::foundation::UserId;
use crate::domain::user::ChatUserView;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Credentials for obtaining a token. `username` is accepted as an alias.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub sign_up_link_uuid: Uuid,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmailRequest {
    pub verify_link_uuid: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestPasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub reset_link_uuid: Uuid,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaitlistRequest {
    pub email: String,
    #[serde(default)]
    pub how_did_you_hear_about_us: String,
    #[serde(default)]
    pub why_do_you_want_to_join: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// The caller's own account.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: UserId,
    pub email: String,
    pub email_verified: bool,
    pub metro: Option<ReferenceEntry>,
    pub chat_user: Option<ChatUserView>,
}

impl From<&UserCard> for ProfileResponse {
    fn from(card: &UserCard) -> Self {
        Self {
            id: card.profile.id,
            email: card.profile.email.clone(),
            email_verified: card.profile.email_verified,
            metro: card.metro.clone(),
            chat_user: card.chat_user.as_ref().map(ChatUserView::from),
        }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub detail: &'static str,
}

impl DetailResponse {
    pub const fn new(detail: &'static str) -> Self {
        Self { detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserProfile;

    #[test]
    fn login_accepts_username_alias() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"username": "a@example.com", "password": "pw"}"#).unwrap();
        assert_eq!(request.email, "a@example.com");
    }

    #[test]
    fn profile_response_has_null_chat_user_without_account() {
        let card = UserCard::bare(UserProfile::register("a@example.com"));
        let json = serde_json::to_value(ProfileResponse::from(&card)).unwrap();

        assert_eq!(json["email"], "a@example.com");
        assert!(json["chat_user"].is_null());
        assert!(json["metro"].is_null());
        assert_eq!(json["email_verified"], false);
    }
}
