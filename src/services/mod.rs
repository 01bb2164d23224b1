// src/services/mod.rs
//
// Shared services used across the domain modules

pub mod audit;
pub mod identity;
pub mod monitoring;
pub mod rate_limit;

// Re-export commonly used types for convenience
pub use audit::AuditLog;
pub use identity::{FirebaseIdentity, IdentityProvider};
pub use rate_limit::{RateLimitConfig, RateLimiters};
