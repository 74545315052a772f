//! HTTP DTOs for user profile, handle, chat, and moderation endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::directory::{ReferenceEntry, UserCard};
use crate::domain::finance::{FinancialProfile, FinancialSummary};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{CareerLevel, ChatUserView, CurrentPfm, Gender, Handle};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct HandleRequest {
    pub handle: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatTermsRequest {
    #[serde(default)]
    pub agreed_to_terms: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportMisconductRequest {
    pub handle: String,
    pub description: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Public view of a member.
///
/// Carries every financial input, the derived values, and the monthly
/// summary. Email and credentials are never included.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub handle: Option<Handle>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub metro: Option<ReferenceEntry>,
    pub industry: Option<ReferenceEntry>,
    pub job_title: Option<ReferenceEntry>,
    pub level: Option<CareerLevel>,
    pub current_pfm: Option<CurrentPfm>,
    #[serde(flatten)]
    pub finances: FinancialProfile,
    #[serde(flatten)]
    pub summary: FinancialSummary,
    pub chat_user: Option<ChatUserView>,
    pub email_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<UserCard> for UserResponse {
    fn from(card: UserCard) -> Self {
        let profile = card.profile;
        Self {
            id: profile.id,
            handle: profile.handle,
            age: profile.age,
            gender: profile.gender,
            metro: card.metro,
            industry: card.industry,
            job_title: card.job_title,
            level: profile.level,
            current_pfm: profile.current_pfm,
            summary: FinancialSummary::of(&profile.finances),
            finances: profile.finances,
            chat_user: card.chat_user.as_ref().map(ChatUserView::from),
            email_verified: profile.email_verified,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserProfile;
    use rust_decimal_macros::dec;

    #[test]
    fn user_response_hides_email_and_flattens_finances() {
        let mut profile = UserProfile::register("secret@example.com");
        profile.finances.savings_assets = Some(dec!(1000));
        let (profile, _) = profile.recompute_finances();

        let json = serde_json::to_value(UserResponse::from(UserCard::bare(profile))).unwrap();

        assert!(json.get("email").is_none());
        assert!(json.get("is_admin").is_none());
        assert!(json.get("savings_assets").is_some());
        assert!(json.get("total_assets").is_some());
        assert!(json.get("total_monthly_net").is_some());
        assert!(json["chat_user"].is_null());
    }
}
