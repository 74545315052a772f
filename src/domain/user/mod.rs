//! User module - member accounts and everything hanging off them.
//!
//! - `profile` - the `UserProfile` entity and `ProfilePatch`
//! - `choices` - enumerated demographics
//! - `handle` - unique public name, doubling as chat username
//! - `password` - password strength policy
//! - `links` - sign up, verification, and reset links
//! - `chat_user` - external chat account
//! - `waitlist` - waitlist entries and misconduct reports

mod access_token;
mod chat_user;
mod choices;
mod handle;
mod links;
mod password;
mod patch;
mod profile;
mod waitlist;

pub use access_token::{token_digest, AccessToken};
pub use chat_user::{ChatUser, ChatUserView};
pub use choices::{CareerLevel, CurrentPfm, Gender};
pub use handle::Handle;
pub use links::{ResetPasswordLink, SignUpLink, VerifyEmailLink};
pub use password::validate_password;
pub use patch::nullable;
pub use profile::{normalize_email, ProfilePatch, UserProfile};
pub use waitlist::{validate_email, MisconductReport, WaitlistEntry};
