//! Process wiring: logging, database, adapters, and the HTTP server.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use sqlx::PgPool;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::adapters::auth::Argon2PasswordHasher;
use crate::adapters::chat::ChatEngineProvider;
use crate::adapters::email::{QueuedMailer, ResendEmailSender};
use crate::adapters::http::{api_router, AppState};
use crate::adapters::postgres::{PostgresLinkRepository, PostgresUserRepository};
use crate::application::handlers::{
    CreateSignUpLinkCommand, CreateSignUpLinkHandler, CreateSignUpLinkResult,
};
use crate::config::{AppConfig, ConfigError, ServerConfig, ValidationError};
use crate::domain::foundation::DomainError;
use crate::ports::{ChatError, EmailError};

/// Startup and shutdown failures.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Chat provider setup failed: {0}")]
    Chat(#[from] ChatError),

    #[error("Email setup failed: {0}")]
    Email(#[from] EmailError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for ServerError {
    fn from(err: ValidationError) -> Self {
        Self::Config(err.into())
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Production logs are JSON.
pub fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Opens the pool and applies migrations when configured.
pub async fn connect(config: &AppConfig) -> Result<PgPool, ServerError> {
    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    Ok(pool)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Wraps the API router with tracing, CORS, and request timeouts.
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    api_router(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// Runs the API until Ctrl+C or SIGTERM.
pub async fn serve(config: AppConfig) -> Result<(), ServerError> {
    let pool = connect(&config).await?;

    let chat = Arc::new(ChatEngineProvider::new(config.chat.engine_config())?);
    let sender = Arc::new(ResendEmailSender::new(config.email.resend_config())?);
    let (mailer, mail_worker) = QueuedMailer::spawn(sender, config.email.mailer_settings());

    let state = AppState::postgres(pool, chat, Arc::new(mailer), Arc::new(Argon2PasswordHasher::new()))
        .with_auth_settings(config.auth.settings())
        .with_admin_email(config.email.admin_email.clone());

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!(%address, environment = ?config.server.environment, "server listening");

    axum::serve(listener, app(state, &config.server))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last mailer handle; let the queue drain.
    if let Err(e) = mail_worker.await {
        tracing::error!(error = %e, "email worker ended abnormally");
    }
    tracing::info!("server stopped");
    Ok(())
}

/// Issues (or reuses) a sign up link and returns its URL.
///
/// Returns `None` when the email already has an account.
pub async fn issue_sign_up_link(config: &AppConfig, email: &str) -> Result<Option<String>, ServerError> {
    let pool = connect(config).await?;
    let handler = CreateSignUpLinkHandler::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresLinkRepository::new(pool)),
        config.auth.settings(),
    );

    let result = handler
        .handle(CreateSignUpLinkCommand {
            email: email.to_string(),
        })
        .await?;

    Ok(match result {
        CreateSignUpLinkResult::Issued { url, .. } => Some(url),
        CreateSignUpLinkResult::AlreadyRegistered { .. } => None,
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received terminate signal, shutting down"),
    }
}
