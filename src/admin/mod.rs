// src/admin/mod.rs
//! # Admin Module
//!
//! Staff overview endpoints:
//! - Dashboard counters, upcoming events and attendance trend
//! - Recent activity trail (superadmin only)

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;


pub use routes::admin_overview_routes;
