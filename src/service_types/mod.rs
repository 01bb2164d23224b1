//! # Service Types Module
//!
//! Reference list of service names (Sunday Service, Bible Study, ...) used
//! when recording attendance. Seeded at startup, read publicly.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod tests;

pub use routes::service_type_routes;
