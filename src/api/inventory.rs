//! Inventory and stock movement endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::inventory::{
        CreateInventoryItem, InventoryItem, InventoryQuery, MovementQuery, StockInRequest,
        StockMovement, StockOutRequest, StockTransferRequest, TransferResult,
    },
};

/// List inventory items
#[utoipa::path(
    get,
    path = "/inventory",
    tag = "inventory",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Inventory items", body = Vec<InventoryItem>)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    Query(query): Query<InventoryQuery>,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let items = state.services.inventory.list(&query).await?;
    Ok(Json(items))
}

/// Items at or below their reorder threshold
#[utoipa::path(
    get,
    path = "/inventory/low-stock",
    tag = "inventory",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Items to reorder", body = Vec<InventoryItem>)
    )
)]
pub async fn list_low_stock(
    State(state): State<crate::AppState>,
    Query(query): Query<InventoryQuery>,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let items = state.services.inventory.low_stock(query.project_id).await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/inventory/{id}",
    tag = "inventory",
    params(("id" = i32, Path, description = "Inventory item ID")),
    responses(
        (status = 200, description = "Item details", body = InventoryItem),
        (status = 404, description = "Item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.services.inventory.get_by_id(id).await?;
    Ok(Json(item))
}

/// Create an inventory item in a project
#[utoipa::path(
    post,
    path = "/inventory",
    tag = "inventory",
    request_body = CreateInventoryItem,
    responses(
        (status = 201, description = "Item created", body = InventoryItem),
        (status = 409, description = "Item already exists in project", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateInventoryItem>,
) -> AppResult<(StatusCode, Json<InventoryItem>)> {
    let item = state.services.inventory.create(&data).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Receive stock
#[utoipa::path(
    post,
    path = "/inventory/{id}/stock-in",
    tag = "inventory",
    params(("id" = i32, Path, description = "Inventory item ID")),
    request_body = StockInRequest,
    responses(
        (status = 200, description = "Stock received", body = InventoryItem)
    )
)]
pub async fn stock_in(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<StockInRequest>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.services.inventory.stock_in(id, &data).await?;
    Ok(Json(item))
}

/// Issue stock for consumption
#[utoipa::path(
    post,
    path = "/inventory/{id}/stock-out",
    tag = "inventory",
    params(("id" = i32, Path, description = "Inventory item ID")),
    request_body = StockOutRequest,
    responses(
        (status = 200, description = "Stock issued", body = InventoryItem),
        (status = 422, description = "Insufficient stock", body = crate::error::ErrorResponse)
    )
)]
pub async fn stock_out(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<StockOutRequest>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.services.inventory.stock_out(id, &data).await?;
    Ok(Json(item))
}

/// Transfer stock to another project
#[utoipa::path(
    post,
    path = "/inventory/{id}/transfer",
    tag = "inventory",
    params(("id" = i32, Path, description = "Source inventory item ID")),
    request_body = StockTransferRequest,
    responses(
        (status = 200, description = "Transfer applied", body = TransferResult),
        (status = 400, description = "Destination is the source project", body = crate::error::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::error::ErrorResponse)
    )
)]
pub async fn transfer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<StockTransferRequest>,
) -> AppResult<Json<TransferResult>> {
    let result = state.services.inventory.transfer(id, &data).await?;
    Ok(Json(result))
}

/// Stock movement audit trail
#[utoipa::path(
    get,
    path = "/inventory/movements",
    tag = "inventory",
    params(MovementQuery),
    responses(
        (status = 200, description = "Movements, newest first", body = Vec<StockMovement>)
    )
)]
pub async fn list_movements(
    State(state): State<crate::AppState>,
    Query(query): Query<MovementQuery>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let movements = state.services.inventory.movements(&query).await?;
    Ok(Json(movements))
}
