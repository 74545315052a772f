//! JoinWaitlistHandler - Command handler for public waitlist sign ups.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::user::WaitlistEntry;
use crate::ports::WaitlistRepository;

#[derive(Debug, Clone)]
pub struct JoinWaitlistCommand {
    pub email: String,
    pub how_did_you_hear_about_us: String,
    pub why_do_you_want_to_join: String,
}

/// Records interest once per email; repeat submissions keep the first answers.
pub struct JoinWaitlistHandler {
    waitlist: Arc<dyn WaitlistRepository>,
}

impl JoinWaitlistHandler {
    pub fn new(waitlist: Arc<dyn WaitlistRepository>) -> Self {
        Self { waitlist }
    }

    pub async fn handle(&self, cmd: JoinWaitlistCommand) -> Result<WaitlistEntry, DomainError> {
        let entry = WaitlistEntry::new(
            &cmd.email,
            cmd.how_did_you_hear_about_us,
            cmd.why_do_you_want_to_join,
        )?;
        let (entry, created) = self.waitlist.get_or_create(entry).await?;
        if created {
            tracing::info!(email = %entry.email, "joined waitlist");
        }
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::ErrorCode;

    fn command(email: &str, why: &str) -> JoinWaitlistCommand {
        JoinWaitlistCommand {
            email: email.to_string(),
            how_did_you_hear_about_us: "a friend".to_string(),
            why_do_you_want_to_join: why.to_string(),
        }
    }

    #[tokio::test]
    async fn second_submission_is_idempotent() {
        let store = Arc::new(InMemoryStore::new());
        let handler = JoinWaitlistHandler::new(store.clone());

        handler.handle(command("w@example.com", "first")).await.unwrap();
        let entry = handler.handle(command("w@example.com", "second")).await.unwrap();

        assert_eq!(entry.why_do_you_want_to_join, "first");
        assert_eq!(store.waitlist().len(), 1);
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let handler = JoinWaitlistHandler::new(Arc::new(InMemoryStore::new()));
        let err = handler.handle(command("not-an-email", "x")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
