//! Authentication models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::display_name;

/// Staff account, created out-of-band by seeding
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "idToken")]
    pub id_token: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&Admin> for UserInfo {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id.to_string(),
            name: display_name(&admin.email),
            email: admin.email.clone(),
            role: admin.role.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}
