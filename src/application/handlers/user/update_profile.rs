//! UpdateProfileHandler - Command handler for demographic and financial edits.

use std::sync::Arc;

use crate::application::handlers::user_not_found;
use crate::domain::directory::{ReferenceKind, UserCard};
use crate::domain::finance::ChangedFields;
use crate::domain::foundation::{admin_or_user_self, AuthenticatedUser, DomainError, UserId};
use crate::domain::user::ProfilePatch;
use crate::ports::{ReferenceReader, UserReader, UserRepository};

/// Command to apply a partial update to a user's profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
    pub patch: ProfilePatch,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateProfileResult {
    pub card: UserCard,
    pub changed: ChangedFields,
}

/// Handler for profile updates.
///
/// Every write runs the derived-field engine, so totals and net worth are
/// always consistent with the inputs that were stored alongside them.
pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
    reader: Arc<dyn UserReader>,
    references: Arc<dyn ReferenceReader>,
}

impl UpdateProfileHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        reader: Arc<dyn UserReader>,
        references: Arc<dyn ReferenceReader>,
    ) -> Self {
        Self {
            users,
            reader,
            references,
        }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<UpdateProfileResult, DomainError> {
        // 1. Only the member or an admin may edit
        admin_or_user_self(&cmd.actor, &cmd.user_id).into_result()?;

        // 2. Validate values and foreign keys
        cmd.patch.validate()?;
        self.check_references(&cmd.patch).await?;

        // 3. Load the current profile
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or_else(user_not_found)?;

        // 4. Apply and recompute
        user.apply_patch(cmd.patch);
        let (user, changed) = user.recompute_finances();
        user.finances.validate_outputs()?;

        // 5. Persist
        self.users.update(&user, &changed).await?;
        tracing::info!(
            user_id = %user.id,
            actor_id = %cmd.actor.id,
            derived_changed = ?changed.columns(),
            "profile updated"
        );

        // 6. Read back the joined view
        let card = self
            .reader
            .get_card(&user.id)
            .await?
            .ok_or_else(user_not_found)?;

        Ok(UpdateProfileResult { card, changed })
    }

    async fn check_references(&self, patch: &ProfilePatch) -> Result<(), DomainError> {
        let keys = [
            (ReferenceKind::Metro, patch.metro.flatten().map(|id| id.as_i64())),
            (ReferenceKind::Industry, patch.industry.flatten().map(|id| id.as_i64())),
            (ReferenceKind::JobTitle, patch.job_title.flatten().map(|id| id.as_i64())),
        ];
        for (kind, id) in keys {
            let Some(id) = id else { continue };
            if !self.references.exists(kind, id).await? {
                return Err(DomainError::validation(
                    kind.field(),
                    format!("Invalid pk \"{}\" - object does not exist.", id),
                ));
            }
        }
        Ok(())
    }
}
