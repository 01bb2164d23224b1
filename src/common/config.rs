// src/common/config.rs
//! Environment-driven application configuration

use axum_extra::extract::cookie::SameSite;
use std::env;
use std::time::Duration;

/// Deployment environment, taken from `ENVIRONMENT` and nothing else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "production" || v == "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Development => "development",
        }
    }
}

/// Attributes of the session cookie
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookieConfig {
    /// Cross-origin production deployments need `Secure; SameSite=None`,
    /// local development gets `SameSite=Lax` over plain http.
    /// Explicit overrides win over the environment default.
    pub fn for_environment(
        environment: Environment,
        name: Option<String>,
        domain: Option<String>,
        secure_override: Option<bool>,
        same_site_override: Option<SameSite>,
    ) -> Self {
        let (default_secure, default_same_site) = if environment.is_production() {
            (true, SameSite::None)
        } else {
            (false, SameSite::Lax)
        };

        let same_site = same_site_override.unwrap_or(default_same_site);
        // Browsers drop SameSite=None cookies that are not Secure
        let secure = secure_override.unwrap_or(default_secure) || same_site == SameSite::None;

        Self {
            name: name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "rccg_session".to_string()),
            domain: domain.filter(|d| !d.trim().is_empty()),
            secure,
            same_site,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database_url: String,
    pub port: u16,
    pub cookie: CookieConfig,
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: u64,
    pub request_timeout: Duration,
    pub shutdown_grace: Duration,
    pub reset_db: bool,
    pub seed_data: bool,
    pub seed_admins: Option<String>,
    pub sentry_dsn: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::parse(env::var("ENVIRONMENT").ok().as_deref());

        let cookie = CookieConfig::for_environment(
            environment,
            env::var("SESSION_COOKIE_NAME").ok(),
            env::var("COOKIE_DOMAIN").ok(),
            env::var("COOKIE_SECURE").ok().and_then(|v| parse_bool(&v)),
            env::var("COOKIE_SAME_SITE")
                .ok()
                .and_then(|v| parse_same_site(&v)),
        );

        // CORS_ORIGINS takes a comma-separated list, FRONTEND_URL a single origin
        let mut allowed_origins: Vec<String> = env::var("CORS_ORIGINS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });
        if let Ok(frontend) = env::var("FRONTEND_URL") {
            let frontend = frontend.trim().trim_end_matches('/').to_string();
            if !frontend.is_empty() && !allowed_origins.contains(&frontend) {
                allowed_origins.push(frontend);
            }
        }

        let seed_default = !environment.is_production();

        Self {
            environment,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://salvation.db".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080),
            cookie,
            allowed_origins,
            max_body_bytes: env_u64("MAX_BODY_BYTES").unwrap_or(10 << 20),
            request_timeout: Duration::from_secs(env_u64("REQUEST_TIMEOUT_SECONDS").unwrap_or(15)),
            shutdown_grace: Duration::from_secs(env_u64("SHUTDOWN_GRACE_SECONDS").unwrap_or(10)),
            reset_db: env::var("RESET_DB")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(false),
            seed_data: env::var("SEED_DATA")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(seed_default),
            seed_admins: env::var("SEED_ADMINS").ok().filter(|v| !v.trim().is_empty()),
            sentry_dsn: env::var("SENTRY_DSN").ok().filter(|v| !v.trim().is_empty()),
        }
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_lowercase().as_str() {
        "none" => Some(SameSite::None),
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        _ => None,
    }
}

pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_u64(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|v| v.trim().parse::<u64>().ok())
}
