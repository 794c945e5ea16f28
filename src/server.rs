//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, session store selection and the Axum
//! server lifecycle.

use crate::application::services::{SessionManager, UrlService, UserService};
use crate::config::Config;
use crate::infrastructure::persistence::{PgUrlMappingRepository, PgUserRepository};
use crate::infrastructure::session::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::password::PasswordHasherConfig;
use crate::utils::session_cookie::CookieSigner;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis session store (or in-memory fallback)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let session_store = session_store(&config).await;
    let state = build_state(&config, pool, session_store);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wires repositories and services into an [`AppState`].
pub fn build_state(config: &Config, pool: PgPool, session_store: Arc<dyn SessionStore>) -> AppState {
    let pool = Arc::new(pool);

    let url_repository = Arc::new(PgUrlMappingRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool));

    let url_service = Arc::new(UrlService::new(url_repository, config.public_host()));
    let user_service = Arc::new(UserService::new(
        user_repository,
        PasswordHasherConfig::new(config.password_hash_cost),
        config.auto_register,
    ));

    let signer = CookieSigner::new(
        &config.session_secret,
        config.session_ttl(),
        config.session_cookie_secure,
    );
    let sessions = Arc::new(SessionManager::new(session_store, signer));

    AppState::new(url_service, user_service, sessions)
}

async fn connect_database(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Redis when configured and reachable, otherwise process memory.
async fn session_store(config: &Config) -> Arc<dyn SessionStore> {
    let ttl = config.session_ttl();

    if let Some(redis_url) = &config.redis_url {
        match RedisSessionStore::connect(redis_url, ttl).await {
            Ok(redis) => {
                tracing::info!("Session store: Redis");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Using in-memory session store.",
                    e
                );
            }
        }
    } else {
        tracing::info!("Session store: in-memory");
    }

    Arc::new(MemorySessionStore::new(ttl))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
