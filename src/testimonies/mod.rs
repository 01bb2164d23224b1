//! # Testimonies Module
//!
//! Visitor testimonies and their moderation:
//! - Public submission (pending until reviewed) and listing of approved ones
//! - Admin review (approve/reject) and deletion

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::{admin_testimony_routes, testimony_routes};
