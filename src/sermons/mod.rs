//! # Sermons Module
//!
//! Sermon publishing:
//! - Public listing, latest sermon and search (published only)
//! - Admin CRUD with YouTube video uniqueness
//! - Audit entries for every admin mutation

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::{admin_sermon_routes, sermon_routes};
