//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, geolocation wiring, the cache
//! sweeper and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::geo::{GeoCache, IpApiProvider};
use crate::infrastructure::persistence::{
    PgAnalyticsRepository, PgLinkRepository, PgTokenRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, StateSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens a PostgreSQL pool sized by the configuration.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Geolocation provider and TTL cache with its background sweeper
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The geolocation HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let provider = IpApiProvider::new(
        config.geo_api_url.clone(),
        Duration::from_secs(config.geo_timeout_seconds),
    )?;
    let geo_cache = Arc::new(GeoCache::new(
        Arc::new(provider),
        Duration::from_secs(config.geo_cache_ttl_seconds),
    ));
    let sweeper =
        geo_cache.spawn_sweeper(Duration::from_secs(config.geo_sweep_interval_seconds));
    tracing::info!("Geo cache sweeper started");

    let pool = Arc::new(pool);
    let state = AppState::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgAnalyticsRepository::new(pool.clone())),
        Arc::new(PgTokenRepository::new(pool.clone())),
        geo_cache,
        StateSettings {
            base_url: config.base_url.clone(),
            token_signing_secret: config.token_signing_secret.clone(),
            behind_proxy: config.behind_proxy,
        },
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    sweeper.abort();
    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Completes on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
