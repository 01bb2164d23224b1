use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Testimony {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub message: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub approved_at: Option<String>,
    pub rejected_at: Option<String>,
    pub submitted_at: String,
}

/// Outcome of a moderation review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewDecision::Approved => "approved",
            ReviewDecision::Rejected => "rejected",
        }
    }

    pub fn audit_action(&self) -> &'static str {
        match self {
            ReviewDecision::Approved => "Approved testimony",
            ReviewDecision::Rejected => "Rejected testimony",
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewDecision {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ReviewDecision::Approved),
            "rejected" => Ok(ReviewDecision::Rejected),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTestimonyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewTestimonyRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct TestimonyReviewResponse {
    pub message: String,
    pub testimony: Testimony,
}
