//! Shared application state for the REST API.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::auth::TokenSessionValidator;
use crate::adapters::memory::InMemoryStore;
use crate::adapters::postgres::{
    PostgresAccessTokenStore, PostgresChatUserRepository, PostgresCommunityRepository,
    PostgresLinkRepository, PostgresReferenceReader, PostgresUserReader,
    PostgresUserRepository,
};
use crate::application::handlers::{
    AuthSettings, CheckHandleHandler, GetOrCreateChatUserHandler, GetOwnProfileHandler,
    GetUserProfileHandler, JoinWaitlistHandler, ListUsersHandler, LoginHandler, LogoutHandler,
    ReportMisconductHandler, RequestPasswordResetHandler, ResendVerificationHandler,
    ResetPasswordHandler, SearchReferencesHandler, SignUpHandler, UpdateChatTermsHandler,
    UpdateHandleHandler, UpdateProfileHandler, VerifyEmailHandler,
};
use crate::ports::{
    AccessTokenStore, ChatProvider, ChatUserRepository, LinkRepository, Mailer,
    MisconductRepository, PasswordHasher, ReferenceReader, SessionValidator, UserReader,
    UserRepository, WaitlistRepository,
};

/// Ports and settings every route handler draws from.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub user_reader: Arc<dyn UserReader>,
    pub references: Arc<dyn ReferenceReader>,
    pub links: Arc<dyn LinkRepository>,
    pub tokens: Arc<dyn AccessTokenStore>,
    pub chat_users: Arc<dyn ChatUserRepository>,
    pub waitlist: Arc<dyn WaitlistRepository>,
    pub misconduct: Arc<dyn MisconductRepository>,
    pub sessions: Arc<dyn SessionValidator>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub chat: Arc<dyn ChatProvider>,
    pub mailer: Arc<dyn Mailer>,
    pub auth: AuthSettings,
    pub admin_email: String,
}

impl AppState {
    /// Wires every persistence port to one in-memory store.
    pub fn in_memory(
        store: Arc<InMemoryStore>,
        chat: Arc<dyn ChatProvider>,
        mailer: Arc<dyn Mailer>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users: store.clone(),
            user_reader: store.clone(),
            references: store.clone(),
            links: store.clone(),
            tokens: store.clone(),
            chat_users: store.clone(),
            waitlist: store.clone(),
            misconduct: store.clone(),
            sessions: Arc::new(TokenSessionValidator::new(store.clone(), store)),
            hasher,
            chat,
            mailer,
            auth: AuthSettings::default(),
            admin_email: "admin@example.com".to_string(),
        }
    }

    /// Wires every persistence port to Postgres.
    pub fn postgres(
        pool: PgPool,
        chat: Arc<dyn ChatProvider>,
        mailer: Arc<dyn Mailer>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
        let tokens: Arc<dyn AccessTokenStore> =
            Arc::new(PostgresAccessTokenStore::new(pool.clone()));
        let community = Arc::new(PostgresCommunityRepository::new(pool.clone()));

        Self {
            sessions: Arc::new(TokenSessionValidator::new(tokens.clone(), users.clone())),
            users,
            user_reader: Arc::new(PostgresUserReader::new(pool.clone())),
            references: Arc::new(PostgresReferenceReader::new(pool.clone())),
            links: Arc::new(PostgresLinkRepository::new(pool.clone())),
            tokens,
            chat_users: Arc::new(PostgresChatUserRepository::new(pool)),
            waitlist: community.clone(),
            misconduct: community,
            hasher,
            chat,
            mailer,
            auth: AuthSettings::default(),
            admin_email: String::new(),
        }
    }

    pub fn with_auth_settings(mut self, auth: AuthSettings) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_admin_email(mut self, admin_email: impl Into<String>) -> Self {
        self.admin_email = admin_email.into();
        self
    }

    // Account

    pub fn sign_up_handler(&self) -> SignUpHandler {
        SignUpHandler::new(
            self.users.clone(),
            self.links.clone(),
            self.hasher.clone(),
            self.mailer.clone(),
            self.auth.clone(),
        )
    }

    pub fn verify_email_handler(&self) -> VerifyEmailHandler {
        VerifyEmailHandler::new(self.users.clone(), self.links.clone())
    }

    pub fn resend_verification_handler(&self) -> ResendVerificationHandler {
        ResendVerificationHandler::new(
            self.users.clone(),
            self.links.clone(),
            self.mailer.clone(),
            self.auth.clone(),
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.tokens.clone(), self.hasher.clone())
    }

    pub fn logout_handler(&self) -> LogoutHandler {
        LogoutHandler::new(self.tokens.clone())
    }

    pub fn request_password_reset_handler(&self) -> RequestPasswordResetHandler {
        RequestPasswordResetHandler::new(
            self.users.clone(),
            self.links.clone(),
            self.mailer.clone(),
            self.auth.clone(),
        )
    }

    pub fn reset_password_handler(&self) -> ResetPasswordHandler {
        ResetPasswordHandler::new(
            self.users.clone(),
            self.links.clone(),
            self.tokens.clone(),
            self.hasher.clone(),
        )
    }

    pub fn join_waitlist_handler(&self) -> JoinWaitlistHandler {
        JoinWaitlistHandler::new(self.waitlist.clone())
    }

    // User

    pub fn get_own_profile_handler(&self) -> GetOwnProfileHandler {
        GetOwnProfileHandler::new(self.user_reader.clone())
    }

    pub fn get_user_profile_handler(&self) -> GetUserProfileHandler {
        GetUserProfileHandler::new(self.user_reader.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(
            self.users.clone(),
            self.user_reader.clone(),
            self.references.clone(),
        )
    }

    pub fn check_handle_handler(&self) -> CheckHandleHandler {
        CheckHandleHandler::new(self.users.clone())
    }

    pub fn update_handle_handler(&self) -> UpdateHandleHandler {
        UpdateHandleHandler::new(
            self.users.clone(),
            self.user_reader.clone(),
            self.chat_users.clone(),
            self.chat.clone(),
        )
    }

    pub fn get_or_create_chat_user_handler(&self) -> GetOrCreateChatUserHandler {
        GetOrCreateChatUserHandler::new(
            self.user_reader.clone(),
            self.chat_users.clone(),
            self.chat.clone(),
        )
    }

    pub fn update_chat_terms_handler(&self) -> UpdateChatTermsHandler {
        UpdateChatTermsHandler::new(self.user_reader.clone(), self.chat_users.clone())
    }

    pub fn report_misconduct_handler(&self) -> ReportMisconductHandler {
        ReportMisconductHandler::new(
            self.users.clone(),
            self.misconduct.clone(),
            self.mailer.clone(),
            self.admin_email.clone(),
        )
    }

    // Directory

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.user_reader.clone())
    }

    pub fn search_references_handler(&self) -> SearchReferencesHandler {
        SearchReferencesHandler::new(self.references.clone())
    }
}
