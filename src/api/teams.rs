//! Maintenance team endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::equipment::Equipment,
    models::request::MaintenanceRequest,
    models::team::{CreateTeam, Team, TeamQuery, UpdateTeam},
};

/// Requests for a team, with the open-request count
#[derive(Serialize, ToSchema)]
pub struct TeamRequestsResponse {
    pub requests: Vec<MaintenanceRequest>,
    pub open_count: i64,
}

/// List active teams
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum rows to return")
    ),
    responses(
        (status = 200, description = "List of active teams", body = Vec<Team>)
    )
)]
pub async fn list_teams(
    State(state): State<crate::AppState>,
    Query(query): Query<TeamQuery>,
) -> AppResult<Json<Vec<Team>>> {
    let teams = state
        .services
        .teams
        .list(query.skip.unwrap_or(0), query.limit.unwrap_or(100))
        .await?;
    Ok(Json(teams))
}

/// Create team
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_team(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<Team>)> {
    let team = state.services.teams.create(data).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Get team by ID
#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team details", body = Team),
        (status = 404, description = "Team not found")
    )
)]
pub async fn get_team(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Team>> {
    let team = state.services.teams.get_by_id(id).await?;
    Ok(Json(team))
}

/// Update team
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    request_body = UpdateTeam,
    responses(
        (status = 200, description = "Team updated", body = Team),
        (status = 404, description = "Team not found")
    )
)]
pub async fn update_team(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateTeam>,
) -> AppResult<Json<Team>> {
    let team = state.services.teams.update(id, data).await?;
    Ok(Json(team))
}

/// Delete team
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, description = "Team not found")
    )
)]
pub async fn delete_team(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.teams.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List equipment assigned to a team
#[utoipa::path(
    get,
    path = "/teams/{id}/equipment",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Equipment assigned to the team", body = Vec<Equipment>),
        (status = 404, description = "Team not found")
    )
)]
pub async fn list_team_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.teams.equipment(id).await?;
    Ok(Json(equipment))
}

/// List maintenance requests for a team, with the open count
#[utoipa::path(
    get,
    path = "/teams/{id}/requests",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Requests for the team", body = TeamRequestsResponse),
        (status = 404, description = "Team not found")
    )
)]
pub async fn list_team_requests(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<TeamRequestsResponse>> {
    let (requests, open_count) = state.services.teams.requests(id).await?;
    Ok(Json(TeamRequestsResponse { requests, open_count }))
}
