//! Role sets and the per-route authorization gate

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::extractors::AuthContext;
use crate::common::{safe_email_log, ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superadmin,
    Admin,
    MediaTeam,
    Secretariat,
    VisitorsWelfare,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Admin => "admin",
            Role::MediaTeam => "media_team",
            Role::Secretariat => "secretariat",
            Role::VisitorsWelfare => "visitors_welfare",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Exact match only; stored roles are lowercase identifiers
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::Superadmin),
            "admin" => Ok(Role::Admin),
            "media_team" => Ok(Role::MediaTeam),
            "secretariat" => Ok(Role::Secretariat),
            "visitors_welfare" => Ok(Role::VisitorsWelfare),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Roles admitted on a route. Membership only, no hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct RoleSet(pub &'static [Role]);

impl RoleSet {
    pub fn allows(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

pub const ANY_ADMIN: RoleSet = RoleSet(&[
    Role::Superadmin,
    Role::Admin,
    Role::MediaTeam,
    Role::Secretariat,
    Role::VisitorsWelfare,
]);
pub const SUPERADMIN_ONLY: RoleSet = RoleSet(&[Role::Superadmin]);
pub const MEDIA_EDITORS: RoleSet = RoleSet(&[Role::Superadmin, Role::MediaTeam]);
pub const SECRETARIAT: RoleSet = RoleSet(&[Role::Superadmin, Role::Secretariat]);
pub const VISITOR_WELFARE: RoleSet = RoleSet(&[Role::Superadmin, Role::VisitorsWelfare]);
pub const EVENT_MANAGERS: RoleSet = RoleSet(&[Role::Superadmin, Role::Admin]);

/// Middleware admitting the request only when the session's role is in `allowed`
///
/// Attach per route with `handler.layer(from_fn_with_state(SET, require_roles))`.
/// Requires the session middleware to have run first.
pub async fn require_roles(
    State(allowed): State<RoleSet>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(ctx) = request.extensions().get::<AuthContext>() else {
        warn!(path = %request.uri().path(), "Role check reached without a session");
        return Err(ApiError::Unauthorized("No session found".to_string()));
    };

    if !allowed.allows(ctx.role) {
        warn!(
            admin = %safe_email_log(&ctx.admin.email),
            subject = %ctx.principal.subject_id,
            role = %ctx.role,
            path = %request.uri().path(),
            "Insufficient permissions"
        );
        return Err(ApiError::Forbidden("Insufficient permissions".to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_and_rejects_unknown() {
        for role in ANY_ADMIN.0 {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), *role);
        }
        assert!(Role::from_str("Superadmin").is_err());
        assert!(Role::from_str("pastor").is_err());
    }

    #[test]
    fn test_superadmin_set_is_membership_only() {
        assert!(SUPERADMIN_ONLY.allows(Role::Superadmin));
        assert!(!SUPERADMIN_ONLY.allows(Role::MediaTeam));
        assert!(!SUPERADMIN_ONLY.allows(Role::Admin));
    }

    #[test]
    fn test_route_sets() {
        assert!(MEDIA_EDITORS.allows(Role::MediaTeam));
        assert!(!MEDIA_EDITORS.allows(Role::Secretariat));
        assert!(SECRETARIAT.allows(Role::Secretariat));
        assert!(VISITOR_WELFARE.allows(Role::VisitorsWelfare));
        assert!(!VISITOR_WELFARE.allows(Role::MediaTeam));
        assert!(EVENT_MANAGERS.allows(Role::Admin));
        assert!(!EVENT_MANAGERS.allows(Role::VisitorsWelfare));
    }
}
