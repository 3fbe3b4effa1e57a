//! Maintenance workflow stage model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Workflow stage for maintenance requests.
///
/// `done` marks requests in this stage as completed; `is_scrap` marks the
/// stage as destructive (entering it scraps the linked equipment).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Stage {
    pub id: i32,
    pub name: String,
    /// Ordering key for the kanban board
    pub sequence: i32,
    /// Folded in kanban view
    pub fold: bool,
    pub done: bool,
    pub is_scrap: bool,
    pub description: Option<String>,
}

/// Create stage request
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
pub struct CreateStage {
    #[validate(length(min = 1, message = "Stage name must not be empty"))]
    pub name: String,
    pub sequence: Option<i32>,
    pub fold: Option<bool>,
    pub done: Option<bool>,
    pub is_scrap: Option<bool>,
    pub description: Option<String>,
}

/// Update stage request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStage {
    pub name: Option<String>,
    pub sequence: Option<i32>,
    pub fold: Option<bool>,
    pub done: Option<bool>,
    pub is_scrap: Option<bool>,
    pub description: Option<String>,
}
