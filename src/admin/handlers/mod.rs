// src/admin/handlers/mod.rs

pub mod activity;
pub mod dashboard;
