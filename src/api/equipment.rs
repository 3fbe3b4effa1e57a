//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::equipment::{
        CreateEquipment, Equipment, EquipmentDetails, EquipmentQuery, UpdateEquipment,
    },
    models::request::MaintenanceRequest,
};

/// Open-request count for one equipment
#[derive(Serialize, ToSchema)]
pub struct RequestCountResponse {
    pub count: i64,
}

/// List equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum rows to return"),
        ("active_only" = Option<bool>, Query, description = "Only active equipment (default true)")
    ),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state
        .services
        .equipment
        .list(
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(100),
            query.active_only.unwrap_or(true),
        )
        .await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Get equipment details for auto-population of a new maintenance request
#[utoipa::path(
    get,
    path = "/equipment/{id}/details",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Auto-fill details", body = EquipmentDetails),
        (status = 400, description = "Equipment is scrapped"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment_details(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentDetails>> {
    let details = state.services.equipment.get_details(id).await?;
    Ok(Json(details))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(id, data).await?;
    Ok(Json(equipment))
}

/// Mark equipment as scrapped (irreversible)
#[utoipa::path(
    post,
    path = "/equipment/{id}/scrap",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment scrapped", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn scrap_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.scrap(id).await?;
    Ok(Json(equipment))
}

/// List maintenance requests for one equipment
#[utoipa::path(
    get,
    path = "/equipment/{id}/requests",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Requests for the equipment", body = Vec<MaintenanceRequest>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn list_equipment_requests(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<MaintenanceRequest>>> {
    let requests = state.services.equipment.requests(id).await?;
    Ok(Json(requests))
}

/// Count open maintenance requests for one equipment
#[utoipa::path(
    get,
    path = "/equipment/{id}/requests/count",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Open request count", body = RequestCountResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn count_equipment_requests(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RequestCountResponse>> {
    let count = state.services.equipment.open_request_count(id).await?;
    Ok(Json(RequestCountResponse { count }))
}
