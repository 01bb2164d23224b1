use dotenv::dotenv;
use reqwest::Client;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::time::Duration;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tracing::{error, info, warn};

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

mod admin;
mod app;
mod attendance;
mod auth;
mod common;
mod events;
mod first_timers;
mod logging_middleware;
mod prayer_requests;
mod rate_limit_middleware;
mod security_middleware;
mod sermons;
mod service_types;
mod services;
mod testimonies;

#[cfg(test)]
mod test_support;

use common::{AppConfig, AppState};
use services::{
    identity::ServiceAccount,
    monitoring::{init_sentry, init_tracing, MonitoringConfig},
    FirebaseIdentity, IdentityProvider, RateLimitConfig, RateLimiters,
};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ========================================================================
    // ENVIRONMENT & LOGGING SETUP
    // ========================================================================

    dotenv().ok();

    let config = AppConfig::from_env();
    let monitoring = MonitoringConfig::from_app_config(&config);
    init_tracing(&monitoring.log_level);
    // Held for the lifetime of the process so buffered events are flushed on exit
    let _sentry = init_sentry(&monitoring);

    info!(
        environment = config.environment.as_str(),
        port = config.port,
        cookie_secure = config.cookie.secure,
        "Starting salvation-api"
    );

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    // Create the database directory if needed (sqlite://path/to/db)
    if let Some(path_part) = config.database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(100)
        .min_connections(10)
        .idle_timeout(Duration::from_secs(10 * 60))
        .max_lifetime(Duration::from_secs(60 * 60))
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool, config.reset_db).await?;

    if config.seed_data {
        common::seed::seed_admins(&pool, config.seed_admins.as_deref()).await?;
        common::seed::seed_service_types(&pool).await?;
    } else {
        info!("Seeding disabled");
    }

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let http_client = Client::builder().timeout(Duration::from_secs(10)).build()?;

    // A missing or broken credential leaves the server up with every login failing
    let account = match ServiceAccount::from_env().await {
        Ok(account) => account,
        Err(e) => {
            error!(error = %e, "Failed to load Firebase credentials");
            None
        }
    };
    let identity: Arc<dyn IdentityProvider> = Arc::new(FirebaseIdentity::new(http_client, account)?);
    info!("Identity provider initialized");

    let rate_limiters = RateLimiters::new(RateLimitConfig::from_env());
    rate_limiters.start_cleanup_tasks();
    info!(
        enabled = rate_limiters.config.enabled,
        whitelisted = rate_limiters.config.whitelist_ips.len(),
        "Rate limiters initialized"
    );

    let shutdown_grace = config.shutdown_grace;
    let port = config.port;
    let state = Arc::new(AppState::new(pool.clone(), config, identity, rate_limiters));

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let router = app::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async {
            shutdown_rx.await.ok();
        })
        .await
    });

    shutdown_signal().await;
    info!(grace_seconds = shutdown_grace.as_secs(), "Shutting down, draining in-flight requests");
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(shutdown_grace, server).await {
        Ok(Ok(Ok(()))) => info!("Server stopped"),
        Ok(Ok(Err(e))) => error!(error = %e, "Server error during shutdown"),
        Ok(Err(e)) => error!(error = %e, "Server task failed"),
        Err(_) => warn!("Grace period elapsed with requests still in flight"),
    }

    pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT"),
        () = terminate => info!("Received SIGTERM"),
    }
}
