//! # Attendance Module
//!
//! Per-service attendance counts recorded by the secretariat. Each record
//! keeps the email of the admin who last wrote it.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::admin_attendance_routes;
