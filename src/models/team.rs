//! Maintenance team model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::user::UserBasic;

/// Internal row structure for team queries (without membership)
#[derive(Debug, Clone, FromRow)]
pub struct TeamRow {
    pub id: i32,
    pub name: String,
    pub active: bool,
    pub color: i32,
    pub description: Option<String>,
    pub leader_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TeamRow {
    /// Attach leader and member details fetched separately
    pub fn into_team(self, leader: Option<UserBasic>, members: Vec<UserBasic>) -> Team {
        Team {
            id: self.id,
            name: self.name,
            active: self.active,
            color: self.color,
            description: self.description,
            leader_id: self.leader_id,
            created_at: self.created_at,
            leader,
            members,
        }
    }
}

/// Maintenance team with embedded leader and members
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub active: bool,
    pub color: i32,
    pub description: Option<String>,
    pub leader_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub leader: Option<UserBasic>,
    pub members: Vec<UserBasic>,
}

/// Create team request
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
pub struct CreateTeam {
    #[validate(length(min = 1, message = "Team name must not be empty"))]
    pub name: String,
    pub active: Option<bool>,
    pub color: Option<i32>,
    pub description: Option<String>,
    pub leader_id: Option<i32>,
    /// Initial member user ids
    pub member_ids: Option<Vec<i32>>,
}

/// Update team request (partial; member_ids replaces the membership set)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTeam {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub color: Option<i32>,
    pub description: Option<String>,
    pub leader_id: Option<i32>,
    pub member_ids: Option<Vec<i32>>,
}

/// Team query parameters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TeamQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
