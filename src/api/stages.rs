//! Workflow stage endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::stage::{CreateStage, Stage, UpdateStage},
};

/// List stages in workflow order
#[utoipa::path(
    get,
    path = "/stages",
    tag = "stages",
    responses(
        (status = 200, description = "List of stages", body = Vec<Stage>)
    )
)]
pub async fn list_stages(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Stage>>> {
    let stages = state.services.stages.list().await?;
    Ok(Json(stages))
}

/// Create stage
#[utoipa::path(
    post,
    path = "/stages",
    tag = "stages",
    request_body = CreateStage,
    responses(
        (status = 201, description = "Stage created", body = Stage),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_stage(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateStage>,
) -> AppResult<(StatusCode, Json<Stage>)> {
    let stage = state.services.stages.create(data).await?;
    Ok((StatusCode::CREATED, Json(stage)))
}

/// Update stage
#[utoipa::path(
    put,
    path = "/stages/{id}",
    tag = "stages",
    params(("id" = i32, Path, description = "Stage ID")),
    request_body = UpdateStage,
    responses(
        (status = 200, description = "Stage updated", body = Stage),
        (status = 404, description = "Stage not found")
    )
)]
pub async fn update_stage(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateStage>,
) -> AppResult<Json<Stage>> {
    let stage = state.services.stages.update(id, data).await?;
    Ok(Json(stage))
}

/// Delete stage
#[utoipa::path(
    delete,
    path = "/stages/{id}",
    tag = "stages",
    params(("id" = i32, Path, description = "Stage ID")),
    responses(
        (status = 204, description = "Stage deleted"),
        (status = 404, description = "Stage not found")
    )
)]
pub async fn delete_stage(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.stages.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
