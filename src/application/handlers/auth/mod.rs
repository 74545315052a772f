//! Account handlers.
//!
//! ## Commands
//! - Issuing sign up invitations (operator CLI)
//! - Sign up, email verification, resending verification
//! - Login and logout with opaque bearer tokens
//! - Password reset request and completion
//! - Joining the waitlist

mod create_sign_up_link;
mod join_waitlist;
mod login;
mod logout;
mod request_password_reset;
mod resend_verification;
mod reset_password;
mod sign_up;
mod verify_email;

pub use create_sign_up_link::{
    CreateSignUpLinkCommand, CreateSignUpLinkHandler, CreateSignUpLinkResult,
};
pub use join_waitlist::{JoinWaitlistCommand, JoinWaitlistHandler};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use logout::{LogoutCommand, LogoutHandler};
pub use request_password_reset::{RequestPasswordResetCommand, RequestPasswordResetHandler};
pub use resend_verification::{ResendVerificationCommand, ResendVerificationHandler};
pub use reset_password::{ResetPasswordCommand, ResetPasswordHandler};
pub use sign_up::{SignUpCommand, SignUpHandler};
pub use verify_email::{VerifyEmailCommand, VerifyEmailHandler};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Where emailed links point and how long reset links live.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Front-end origin, e.g. `https://advisor.place`.
    pub site_url: String,
    pub reset_link_ttl_hours: i64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:3000".to_string(),
            reset_link_ttl_hours: 24,
        }
    }
}

fn invalid_link(field: &str, message: &str) -> DomainError {
    DomainError::new(ErrorCode::InvalidLink, message).with_detail("field", field)
}
