// src/common/seed.rs
//! Out-of-band creation of admin accounts and reference data
//!
//! Admins are never created by the request path. They come from here, either
//! from the built-in list or from `SEED_ADMINS="email:role,email:role"`.

use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{info, warn};

use super::safe_email_log;
use crate::auth::rbac::Role;

const DEFAULT_ADMINS: &[(&str, Role)] = &[
    ("admin@rccgsalvationcentre.org", Role::Superadmin),
    ("media@rccgsalvationcentre.org", Role::MediaTeam),
    ("secretariat@rccgsalvationcentre.org", Role::Secretariat),
    ("followup@rccgsalvationcentre.org", Role::VisitorsWelfare),
];

pub const DEFAULT_SERVICE_TYPES: &[&str] = &[
    "Sunday Service",
    "Midweek Service",
    "Bible Study",
    "Special Service",
    "Youth Service",
    "Workers Meeting",
    "Revival",
    "Crusade",
    "Convention",
    "Holy Ghost Service",
    "Thanksgiving Service",
    "Anointing Service",
];

/// Parses `email:role` pairs, skipping malformed entries and unknown roles
pub fn parse_admin_list(raw: &str) -> Vec<(String, Role)> {
    raw.split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }
            let Some((email, role)) = entry.rsplit_once(':') else {
                warn!(entry = %entry, "Ignoring SEED_ADMINS entry without a role");
                return None;
            };
            match Role::from_str(role.trim()) {
                Ok(role) => Some((email.trim().to_lowercase(), role)),
                Err(_) => {
                    warn!(role = %role, "Ignoring SEED_ADMINS entry with unknown role");
                    None
                }
            }
        })
        .collect()
}

/// Inserts admins that do not exist yet; existing rows keep their role
pub async fn seed_admins(pool: &SqlitePool, override_list: Option<&str>) -> Result<(), sqlx::Error> {
    let admins: Vec<(String, Role)> = match override_list {
        Some(raw) => parse_admin_list(raw),
        None => DEFAULT_ADMINS
            .iter()
            .map(|(email, role)| (email.to_string(), *role))
            .collect(),
    };

    for (email, role) in admins {
        let result = sqlx::query("INSERT OR IGNORE INTO admins (email, role) VALUES (?, ?)")
            .bind(&email)
            .bind(role.as_str())
            .execute(pool)
            .await?;

        if result.rows_affected() > 0 {
            info!(email = %safe_email_log(&email), role = %role, "Seeded admin");
        } else {
            info!(email = %safe_email_log(&email), "Admin already exists");
        }
    }

    Ok(())
}

pub async fn seed_service_types(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut seeded = 0;
    for name in DEFAULT_SERVICE_TYPES {
        let result = sqlx::query("INSERT OR IGNORE INTO service_types (name) VALUES (?)")
            .bind(name)
            .execute(pool)
            .await?;
        seeded += result.rows_affected();
    }
    if seeded > 0 {
        info!(count = seeded, "Seeded service types");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::migrated_pool;

    #[test]
    fn test_parse_admin_list() {
        let parsed = parse_admin_list(
            "Pastor@Church.org:superadmin, bad-entry, usher@church.org:doorkeeper,media@church.org:media_team",
        );
        assert_eq!(
            parsed,
            vec![
                ("pastor@church.org".to_string(), Role::Superadmin),
                ("media@church.org".to_string(), Role::MediaTeam),
            ]
        );
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let pool = migrated_pool().await;
        seed_admins(&pool, None).await.unwrap();
        seed_admins(&pool, None).await.unwrap();
        seed_service_types(&pool).await.unwrap();
        seed_service_types(&pool).await.unwrap();

        let (admins,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admins")
            .fetch_one(&pool)
            .await
            .unwrap();
        let (types,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM service_types")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(admins, DEFAULT_ADMINS.len() as i64);
        assert_eq!(types, DEFAULT_SERVICE_TYPES.len() as i64);
    }

    #[tokio::test]
    async fn test_override_list_replaces_defaults() {
        let pool = migrated_pool().await;
        seed_admins(&pool, Some("pastor@church.org:superadmin"))
            .await
            .unwrap();

        let emails: Vec<(String,)> = sqlx::query_as("SELECT email FROM admins")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(emails, vec![("pastor@church.org".to_string(),)]);
    }
}
