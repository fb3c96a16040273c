//! Maintenance event endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::maintenance::{CreateMaintenanceEvent, MaintenanceEvent, MaintenanceQuery},
};

#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    params(MaintenanceQuery),
    responses(
        (status = 200, description = "Maintenance events", body = Vec<MaintenanceEvent>)
    )
)]
pub async fn list_maintenance(
    State(state): State<crate::AppState>,
    Query(query): Query<MaintenanceQuery>,
) -> AppResult<Json<Vec<MaintenanceEvent>>> {
    let events = state.services.maintenance.list(&query).await?;
    Ok(Json(events))
}

/// Record a maintenance event
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    request_body = CreateMaintenanceEvent,
    responses(
        (status = 201, description = "Event recorded", body = MaintenanceEvent),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateMaintenanceEvent>,
) -> AppResult<(StatusCode, Json<MaintenanceEvent>)> {
    let event = state.services.maintenance.create(data).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    delete,
    path = "/maintenance/{id}",
    tag = "maintenance",
    params(("id" = i32, Path, description = "Maintenance event ID")),
    responses(
        (status = 204, description = "Event deleted")
    )
)]
pub async fn delete_maintenance(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.maintenance.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
