//! Read model joining a profile with its reference names and chat account.

use crate::domain::user::{ChatUser, UserProfile};

use super::ReferenceEntry;

/// Everything needed to render a user in the directory or on a profile page.
#[derive(Debug, Clone, PartialEq)]
pub struct UserCard {
    pub profile: UserProfile,
    pub metro: Option<ReferenceEntry>,
    pub industry: Option<ReferenceEntry>,
    pub job_title: Option<ReferenceEntry>,
    pub chat_user: Option<ChatUser>,
}

impl UserCard {
    /// A card with no joined data.
    pub fn bare(profile: UserProfile) -> Self {
        Self {
            profile,
            metro: None,
            industry: None,
            job_title: None,
            chat_user: None,
        }
    }
}
