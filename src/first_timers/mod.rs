//! # First Timers Module
//!
//! Registration of first-time visitors and their follow-up tracking

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::{admin_first_timer_routes, first_timer_routes};
