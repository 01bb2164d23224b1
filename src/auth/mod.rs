//! # Auth Module
//!
//! Session-cookie authentication for staff:
//! - Login/logout and the current-admin endpoint
//! - Session verification producing a typed [`AuthContext`]
//! - Admin resolution by verified email
//! - Per-route role gates

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod rbac;
pub mod resolver;
pub mod routes;

#[cfg(test)]
mod tests;

pub use extractors::{require_session, AuthContext};
pub use routes::auth_routes;
