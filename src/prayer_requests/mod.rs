//! # Prayer Requests Module
//!
//! Public prayer request submission and the secretariat's tracking of them
//! through `pending`, `prayed` and `archived`.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::{admin_prayer_request_routes, prayer_request_routes};
