//! Authorization support types.
//!
//! Access to another user's resources follows one rule: administrators may act
//! on any account, everyone else only on their own. Handlers call
//! [`admin_or_user_self`] and convert the result with `into_result()?`.

use super::{AuthenticatedUser, DomainError, ErrorCode, UserId};

/// Result of an authorization check.
///
/// Contains both the decision and context for logging.
#[derive(Debug, Clone)]
pub struct AuthorizationResult {
    /// Whether access was granted.
    pub granted: bool,

    /// The account the action targets.
    pub target_id: UserId,

    /// The user who requested access.
    pub actor_id: UserId,

    /// Optional reason for denial (if denied).
    pub denial_reason: Option<String>,
}

impl AuthorizationResult {
    /// Creates a successful authorization result.
    pub fn granted(target_id: UserId, actor_id: UserId) -> Self {
        Self {
            granted: true,
            target_id,
            actor_id,
            denial_reason: None,
        }
    }

    /// Creates a denied authorization result.
    pub fn denied(target_id: UserId, actor_id: UserId, reason: impl Into<String>) -> Self {
        Self {
            granted: false,
            target_id,
            actor_id,
            denial_reason: Some(reason.into()),
        }
    }

    /// Converts this result to a `Result<(), DomainError>`.
    ///
    /// Returns `Ok(())` if granted, `Err(Forbidden)` if denied.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.granted {
            return Ok(());
        }
        tracing::warn!(
            actor_id = %self.actor_id,
            target_id = %self.target_id,
            "authorization denied"
        );
        Err(DomainError::new(
            ErrorCode::Forbidden,
            self.denial_reason
                .unwrap_or_else(|| "You do not have permission to perform this action".to_string()),
        )
        .with_detail("target_id", self.target_id.to_string()))
    }

    /// Returns true if access was granted.
    pub fn is_granted(&self) -> bool {
        self.granted
    }
}

/// Admins may act on any user; everyone else only on themselves.
pub fn admin_or_user_self(actor: &AuthenticatedUser, target: &UserId) -> AuthorizationResult {
    if actor.is_admin || actor.id == *target {
        AuthorizationResult::granted(*target, actor.id)
    } else {
        AuthorizationResult::denied(
            *target,
            actor.id,
            "You do not have permission to perform this action",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(is_admin: bool) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "actor@example.com", is_admin, true)
    }

    #[test]
    fn user_may_act_on_self() {
        let user = actor(false);
        assert!(admin_or_user_self(&user, &user.id).is_granted());
    }

    #[test]
    fn user_may_not_act_on_others() {
        let user = actor(false);
        let result = admin_or_user_self(&user, &UserId::new());

        assert!(!result.is_granted());
        let err = result.into_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn admin_may_act_on_anyone() {
        let admin = actor(true);
        assert!(admin_or_user_self(&admin, &UserId::new()).into_result().is_ok());
    }
}
