// Monitoring: tracing subscriber setup with optional Sentry error reporting
use std::env;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::common::AppConfig;

#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    pub sentry_dsn: Option<String>,
    pub environment: String,
    pub log_level: String,
    pub traces_sample_rate: f32,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            sentry_dsn: None,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            traces_sample_rate: 0.0,
        }
    }
}

impl MonitoringConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            sentry_dsn: config.sentry_dsn.clone(),
            environment: config.environment.as_str().to_string(),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            traces_sample_rate: env::var("SENTRY_TRACES_SAMPLE_RATE")
                .ok()
                .and_then(|v| v.parse::<f32>().ok())
                .filter(|r| (0.0..=1.0).contains(r))
                .unwrap_or(0.0),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `log_level`.
///
/// The Sentry layer is always installed; it does nothing until a client is
/// bound by [`init_sentry`].
pub fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer())
        .init();
}

/// Binds a Sentry client when a DSN is configured. Keep the guard alive for
/// the lifetime of the process so queued events are flushed on exit.
pub fn init_sentry(config: &MonitoringConfig) -> Option<sentry::ClientInitGuard> {
    let Some(dsn) = config.sentry_dsn.as_deref() else {
        info!("Sentry DSN not configured");
        return None;
    };

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.environment.clone().into()),
            traces_sample_rate: config.traces_sample_rate,
            ..Default::default()
        },
    ));

    if guard.is_enabled() {
        info!(environment = %config.environment, "Sentry initialized successfully");
        Some(guard)
    } else {
        info!("Sentry DSN rejected; error reporting disabled");
        None
    }
}
