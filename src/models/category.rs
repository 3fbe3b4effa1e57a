//! Equipment category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Equipment category record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    /// Color index for kanban display
    pub color: i32,
    pub note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create category request
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "Category name must not be empty"))]
    pub name: String,
    pub color: Option<i32>,
    pub note: Option<String>,
}

/// Update category request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub color: Option<i32>,
    pub note: Option<String>,
}
