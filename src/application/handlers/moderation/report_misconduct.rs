//! ReportMisconductHandler - Command handler for member complaints.

use std::sync::Arc;

use crate::application::handlers::{notify, user_not_found};
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::user::{Handle, MisconductReport};
use crate::ports::{EmailMessage, Mailer, MisconductRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct ReportMisconductCommand {
    pub actor: AuthenticatedUser,
    pub handle: String,
    pub description: String,
}

/// Stores a report against the member holding `handle` and alerts staff.
pub struct ReportMisconductHandler {
    users: Arc<dyn UserRepository>,
    reports: Arc<dyn MisconductRepository>,
    mailer: Arc<dyn Mailer>,
    admin_email: String,
}

impl ReportMisconductHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        reports: Arc<dyn MisconductRepository>,
        mailer: Arc<dyn Mailer>,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            users,
            reports,
            mailer,
            admin_email: admin_email.into(),
        }
    }

    pub async fn handle(&self, cmd: ReportMisconductCommand) -> Result<MisconductReport, DomainError> {
        let handle = Handle::new(cmd.handle)?;
        let defendant = self
            .users
            .find_by_handle(&handle)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or_else(user_not_found)?;

        let report = MisconductReport::new(cmd.actor.id, defendant.id, cmd.description)?;
        self.reports.insert(&report).await?;

        notify(
            self.mailer.as_ref(),
            EmailMessage::text(
                &self.admin_email,
                format!("Misconduct report against {}", handle.as_str()),
                format!(
                    "Report {}\nPlaintiff: {} ({})\nDefendant: {} ({})\n\n{}\n",
                    report.id,
                    cmd.actor.email,
                    report.plaintiff_id,
                    handle.as_str(),
                    report.defendant_id,
                    report.description
                ),
            ),
        );
        tracing::warn!(
            report_id = %report.id,
            plaintiff_id = %report.plaintiff_id,
            defendant_id = %report.defendant_id,
            "misconduct reported"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::RecordingMailer;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{actor, member, store};
    use crate::domain::foundation::ErrorCode;

    fn handler(store: &Arc<InMemoryStore>, mailer: &Arc<RecordingMailer>) -> ReportMisconductHandler {
        ReportMisconductHandler::new(
            store.clone(),
            store.clone(),
            mailer.clone(),
            "staff@advisor.place",
        )
    }

    fn command(actor: AuthenticatedUser, handle: &str) -> ReportMisconductCommand {
        ReportMisconductCommand {
            actor,
            handle: handle.to_string(),
            description: "Spammed me with referral links".to_string(),
        }
    }

    #[tokio::test]
    async fn stores_report_and_alerts_staff() {
        let store = store();
        let alice = member(&store, Some("alice"));
        let bob = member(&store, Some("bob"));
        let mailer = Arc::new(RecordingMailer::new());

        let report = handler(&store, &mailer)
            .handle(command(actor(&alice), "bob"))
            .await
            .unwrap();

        assert_eq!(report.defendant_id, bob.id);
        assert_eq!(store.misconduct_reports(), vec![report]);
        let sent = mailer.messages();
        assert_eq!(sent[0].to, vec!["staff@advisor.place".to_string()]);
        assert!(sent[0].subject.contains("bob"));
    }

    #[tokio::test]
    async fn unknown_handle_is_not_found() {
        let store = store();
        let alice = member(&store, Some("alice"));
        let mailer = Arc::new(RecordingMailer::new());

        let err = handler(&store, &mailer)
            .handle(command(actor(&alice), "nobody"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UserNotFound);
        assert!(mailer.messages().is_empty());
    }

    #[tokio::test]
    async fn cannot_report_yourself() {
        let store = store();
        let alice = member(&store, Some("alice"));
        let mailer = Arc::new(RecordingMailer::new());

        let err = handler(&store, &mailer)
            .handle(command(actor(&alice), "alice"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(store.misconduct_reports().is_empty());
    }
}
