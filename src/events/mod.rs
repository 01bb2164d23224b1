//! # Events Module
//!
//! Church calendar content:
//! - Special events (one-off, shown publicly once published)
//! - Regular programs (recurring, shown publicly while active)

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::{admin_event_routes, event_routes};
