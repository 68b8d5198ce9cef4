//! Coral Console server — session and auth backend for the storage console.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use coral_core::config::AppConfig;
use coral_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("CORAL_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Coral Console v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = coral_db::DatabasePool::connect(&config.database).await?;
    coral_db::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(coral_db::repositories::UserRepository::new(
        db.pool().clone(),
    ));
    let session_repo = Arc::new(coral_db::repositories::SessionRepository::new(
        db.pool().clone(),
    ));
    let refresh_token_repo = Arc::new(coral_db::repositories::RefreshTokenRepository::new(
        db.pool().clone(),
    ));

    // ── Step 3: Auth wiring ──────────────────────────────────────
    // An unset signing secret fails here, before the server ever binds.
    let encoder = Arc::new(coral_auth::jwt::JwtEncoder::new(&config.auth)?);
    let decoder = Arc::new(coral_auth::jwt::JwtDecoder::new(&config.auth)?);
    let sessions: Arc<dyn coral_auth::SessionStore> =
        Arc::new(coral_auth::session::PgSessionStore::new(session_repo));
    let refresh_tokens: Arc<dyn coral_auth::RefreshTokenStore> =
        Arc::new(coral_auth::token::PgRefreshTokenStore::new(refresh_token_repo));
    let credentials: Arc<dyn coral_auth::CredentialStore> =
        Arc::new(coral_auth::credential::PgCredentialStore::new(user_repo));

    let auth = Arc::new(coral_auth::AuthManager::new(
        encoder,
        decoder,
        sessions,
        refresh_tokens,
        credentials,
        Arc::new(coral_auth::PasswordHasher::new()),
        config.auth.password_min_length,
    ));

    // ── Step 4: Periodic expiry sweep ────────────────────────────
    let sweeper = auth.sweeper().clone();
    let sweep_interval = Duration::from_secs(config.session.cleanup_interval_minutes * 60);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.tick().await; // first tick fires immediately
        loop {
            ticker.tick().await;
            sweeper.run().await;
        }
    });

    // ── Step 5: HTTP server ──────────────────────────────────────
    let state = coral_api::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        auth,
    };

    let app = coral_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Coral Console listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("Coral Console shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
