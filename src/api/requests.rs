//! Maintenance request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::request::{CreateRequest, MaintenanceRequest, RequestQuery, UpdateRequest},
};

use super::AuthenticatedUser;

/// List maintenance requests, most urgent first
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum rows to return"),
        ("active_only" = Option<bool>, Query, description = "Only active requests (default true)"),
        ("equipment_id" = Option<i32>, Query, description = "Filter by equipment"),
        ("team_id" = Option<i32>, Query, description = "Filter by maintenance team"),
        ("stage_id" = Option<i32>, Query, description = "Filter by stage"),
        ("request_type" = Option<String>, Query, description = "Filter by type (corrective/preventive)")
    ),
    responses(
        (status = 200, description = "List of requests", body = Vec<MaintenanceRequest>)
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<Vec<MaintenanceRequest>>> {
    let requests = state.services.requests.list(&query).await?;
    Ok(Json(requests))
}

/// Create a maintenance request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = MaintenanceRequest),
        (status = 400, description = "Invalid input or equipment is scrapped"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRequest>)> {
    let request = state.services.requests.create(data).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Get maintenance request by ID
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = MaintenanceRequest),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = state.services.requests.get_by_id(id).await?;
    Ok(Json(request))
}

/// Update a maintenance request (stage transitions apply their side effects)
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "requests",
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Request updated", body = MaintenanceRequest),
        (status = 404, description = "Request or target stage not found")
    )
)]
pub async fn update_request(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateRequest>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = state.services.requests.update(id, &data).await?;
    Ok(Json(request))
}

/// Assign the request to the current user
#[utoipa::path(
    post,
    path = "/requests/{id}/assign-to-me",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request assigned", body = MaintenanceRequest),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not a member of the assigned team"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn assign_request_to_me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = state
        .services
        .requests
        .assign_to_user(id, claims.user_id)
        .await?;
    Ok(Json(request))
}
