// src/services/rate_limit.rs
use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Requests allowed per window for one route class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePolicy {
    pub rate: u32,
    pub window: Duration,
}

impl RatePolicy {
    pub const fn new(rate: u32, window_seconds: u64) -> Self {
        Self {
            rate,
            window: Duration::from_secs(window_seconds),
        }
    }

    /// Parses `"<rate>/<window_seconds>"`, e.g. `"5/900"`
    pub fn parse(value: &str) -> Option<Self> {
        let (rate, window) = value.trim().split_once('/')?;
        let rate = rate.trim().parse::<u32>().ok()?;
        let window = window.trim().parse::<u64>().ok()?;
        if rate == 0 || window == 0 {
            return None;
        }
        Some(Self::new(rate, window))
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub whitelist_ips: Vec<String>,
    /// Key clients by `X-Forwarded-For` / `X-Real-IP` instead of the peer address
    pub trust_proxy_headers: bool,
    pub api: RatePolicy,
    pub auth: RatePolicy,
    pub admin: RatePolicy,
    pub testimonies: RatePolicy,
    pub first_timers: RatePolicy,
    pub prayer_requests: RatePolicy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            whitelist_ips: Vec::new(),
            trust_proxy_headers: true,
            api: RatePolicy::new(100, 60),
            auth: RatePolicy::new(5, 15 * 60),
            admin: RatePolicy::new(100, 60),
            testimonies: RatePolicy::new(10, 60 * 60),
            first_timers: RatePolicy::new(5, 60 * 60),
            prayer_requests: RatePolicy::new(10, 60 * 60),
        }
    }
}

impl RateLimitConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // RATE_LIMIT_ENABLED - set to "false" to disable rate limiting
        if let Ok(enabled) = env::var("RATE_LIMIT_ENABLED") {
            config.enabled = enabled.trim().to_lowercase() != "false";
        }

        // RATE_LIMIT_WHITELIST_IPS - comma-separated list of whitelisted IPs
        if let Ok(whitelist) = env::var("RATE_LIMIT_WHITELIST_IPS") {
            config.whitelist_ips = whitelist
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // TRUST_PROXY_HEADERS - set to "false" when clients reach the server directly
        if let Ok(trust) = env::var("TRUST_PROXY_HEADERS") {
            config.trust_proxy_headers = trust.trim().to_lowercase() != "false";
        }

        config.api = policy_from_env("RATE_LIMIT_API", config.api);
        config.auth = policy_from_env("RATE_LIMIT_AUTH", config.auth);
        config.admin = policy_from_env("RATE_LIMIT_ADMIN", config.admin);
        config.testimonies = policy_from_env("RATE_LIMIT_TESTIMONIES", config.testimonies);
        config.first_timers = policy_from_env("RATE_LIMIT_FIRST_TIMERS", config.first_timers);
        config.prayer_requests =
            policy_from_env("RATE_LIMIT_PRAYER_REQUESTS", config.prayer_requests);

        config
    }

    pub fn is_whitelisted(&self, ip: &str) -> bool {
        self.whitelist_ips.iter().any(|whitelisted_ip| whitelisted_ip == ip)
    }
}

fn policy_from_env(key: &str, default: RatePolicy) -> RatePolicy {
    match env::var(key) {
        Ok(raw) => RatePolicy::parse(&raw).unwrap_or_else(|| {
            warn!(key = key, value = %raw, "Invalid rate limit policy, using default");
            default
        }),
        Err(_) => default,
    }
}

#[derive(Debug, Clone)]
struct VisitorEntry {
    count: u32,
    window_start: Instant,
}

impl VisitorEntry {
    fn new(now: Instant) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }

    fn is_expired(&self, window: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.window_start) > window
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResult {
    Allowed,
    Limited { retry_after: u64 },
}

/// Fixed-window counter keyed by client identifier
///
/// Each instance owns its visitor map behind a single lock. A burst straddling
/// a window boundary can admit up to twice the rate.
#[derive(Debug)]
pub struct RateLimiter {
    name: &'static str,
    policy: RatePolicy,
    visitors: RwLock<HashMap<String, VisitorEntry>>,
}

impl RateLimiter {
    pub fn new(name: &'static str, policy: RatePolicy) -> Self {
        Self {
            name,
            policy,
            visitors: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn check(&self, key: &str) -> RateLimitResult {
        self.check_at(key, Instant::now()).await
    }

    pub async fn check_at(&self, key: &str, now: Instant) -> RateLimitResult {
        let mut visitors = self.visitors.write().await;

        let Some(entry) = visitors.get_mut(key) else {
            visitors.insert(key.to_string(), VisitorEntry::new(now));
            return RateLimitResult::Allowed;
        };

        if entry.is_expired(self.policy.window, now) {
            *entry = VisitorEntry::new(now);
            return RateLimitResult::Allowed;
        }

        if entry.count >= self.policy.rate {
            return RateLimitResult::Limited {
                retry_after: self.policy.window.as_secs(),
            };
        }

        entry.count += 1;
        RateLimitResult::Allowed
    }

    /// Drops entries whose window has elapsed
    pub async fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_at(Instant::now()).await
    }

    pub async fn cleanup_expired_at(&self, now: Instant) -> usize {
        let mut visitors = self.visitors.write().await;
        let before = visitors.len();
        let window = self.policy.window;
        visitors.retain(|_, entry| !entry.is_expired(window, now));
        before - visitors.len()
    }

    #[cfg(test)]
    pub async fn tracked_keys(&self) -> usize {
        self.visitors.read().await.len()
    }

    /// Spawns the periodic sweep. The task ends once the limiter is dropped.
    pub fn start_cleanup_task(limiter: &Arc<RateLimiter>) -> JoinHandle<()> {
        let weak: Weak<RateLimiter> = Arc::downgrade(limiter);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(CLEANUP_INTERVAL);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(limiter) = weak.upgrade() else {
                    break;
                };
                let removed = limiter.cleanup_expired().await;
                if removed > 0 {
                    debug!(
                        limiter = limiter.name,
                        removed = removed,
                        "Cleaned up expired rate limit entries"
                    );
                }
            }
        })
    }
}

/// Route classes with their own limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Api,
    Auth,
    Admin,
    Testimonies,
    FirstTimers,
    PrayerRequests,
}

/// One limiter per route class, each with its own visitor map
#[derive(Debug, Clone)]
pub struct RateLimiters {
    pub config: Arc<RateLimitConfig>,
    pub api: Arc<RateLimiter>,
    pub auth: Arc<RateLimiter>,
    pub admin: Arc<RateLimiter>,
    pub testimonies: Arc<RateLimiter>,
    pub first_timers: Arc<RateLimiter>,
    pub prayer_requests: Arc<RateLimiter>,
}

impl RateLimiters {
    pub fn new(config: RateLimitConfig) -> Self {
        info!(
            enabled = config.enabled,
            api = ?config.api,
            auth = ?config.auth,
            admin = ?config.admin,
            whitelist_ips = ?config.whitelist_ips,
            "Initializing rate limiters"
        );
        Self {
            api: Arc::new(RateLimiter::new("api", config.api)),
            auth: Arc::new(RateLimiter::new("auth", config.auth)),
            admin: Arc::new(RateLimiter::new("admin", config.admin)),
            testimonies: Arc::new(RateLimiter::new("testimonies", config.testimonies)),
            first_timers: Arc::new(RateLimiter::new("first_timers", config.first_timers)),
            prayer_requests: Arc::new(RateLimiter::new(
                "prayer_requests",
                config.prayer_requests,
            )),
            config: Arc::new(config),
        }
    }

    pub fn for_class(&self, class: RouteClass) -> &Arc<RateLimiter> {
        match class {
            RouteClass::Api => &self.api,
            RouteClass::Auth => &self.auth,
            RouteClass::Admin => &self.admin,
            RouteClass::Testimonies => &self.testimonies,
            RouteClass::FirstTimers => &self.first_timers,
            RouteClass::PrayerRequests => &self.prayer_requests,
        }
    }

    pub fn start_cleanup_tasks(&self) {
        for limiter in [
            &self.api,
            &self.auth,
            &self.admin,
            &self.testimonies,
            &self.first_timers,
            &self.prayer_requests,
        ] {
            drop(RateLimiter::start_cleanup_task(limiter));
        }
    }

    /// Runs `limiter` unless limiting is disabled or the client is whitelisted
    pub async fn check(&self, limiter: &RateLimiter, client_ip: &str) -> RateLimitResult {
        if !self.config.enabled || self.config.is_whitelisted(client_ip) {
            return RateLimitResult::Allowed;
        }
        limiter.check(client_ip).await
    }
}
