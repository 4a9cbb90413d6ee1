//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::PgAuthRepository;
use auth::application::BootstrapAdminUseCase;
use axum::http::{self, Method, header};
use platform::mail::SmtpMailer;
use platform::password::PasswordHasher;
use platform::token::TokenSigner;
use recruitment::{NotificationConfig, PgRecruitmentRepository, RecruitmentConfig};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ApiConfig, DEFAULT_LOG_FILTER};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ApiConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let hasher = PasswordHasher::new(config.password_pepper.take());
    let signer = TokenSigner::new(config.jwt_secret.as_bytes())?;
    let auth_repo = Arc::new(PgAuthRepository::new(pool.clone()));

    if let Some(admin) = config.bootstrap_admin.take() {
        BootstrapAdminUseCase::new(auth_repo.clone(), hasher.clone())
            .execute(admin)
            .await?;
    }

    let mailer = Arc::new(SmtpMailer::new(&config.smtp)?);

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let mut recruitment_config = RecruitmentConfig::new(
        NotificationConfig {
            admin_email: config.admin_notification_email.clone(),
            client_base_url: config.client_base_url.clone(),
        },
        config.upload_dir.clone(),
    );
    recruitment_config.intake.invitation_delay = config.invite_delay;

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let api = routes::api_router(
        Arc::new(PgRecruitmentRepository::new(pool.clone())),
        auth_repo,
        mailer,
        hasher,
        signer,
        recruitment_config,
    );
    let app = routes::app(api, &config.upload_dir)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Pending delayed invitations are dropped here
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests;
