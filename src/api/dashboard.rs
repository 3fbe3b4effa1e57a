//! Dashboard statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Dashboard counters, computed fresh on every call
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_equipment: i64,
    pub active_equipment: i64,
    pub scrapped_equipment: i64,
    pub total_requests: i64,
    /// Requests whose stage is not flagged done
    pub open_requests: i64,
    /// Requests whose stage is flagged done
    pub completed_requests: i64,
    /// Requests with priority Urgent
    pub urgent_requests: i64,
}

/// Get dashboard statistics
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.dashboard.stats().await?;
    Ok(Json(stats))
}
