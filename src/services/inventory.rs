//! Inventory and PPE stock service

use validator::Validate;

use crate::{
    error::AppResult,
    models::inventory::{
        CreateInventoryItem, InventoryItem, InventoryQuery, MovementQuery, StockInRequest,
        StockMovement, StockOutRequest, StockTransferRequest, TransferResult,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
}

impl InventoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &InventoryQuery) -> AppResult<Vec<InventoryItem>> {
        self.repository.inventory.list(query).await
    }

    pub async fn low_stock(&self, project_id: Option<i32>) -> AppResult<Vec<InventoryItem>> {
        self.repository.inventory.list_low_stock(project_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<InventoryItem> {
        self.repository.inventory.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateInventoryItem) -> AppResult<InventoryItem> {
        data.validate()?;
        self.repository.projects.get_by_id(data.project_id).await?;
        self.repository.inventory.create(data).await
    }

    pub async fn stock_in(&self, id: i32, data: &StockInRequest) -> AppResult<InventoryItem> {
        let item = self.repository.inventory.stock_in(id, data).await?;
        tracing::info!(item_id = id, quantity = data.quantity, "Stock received");
        Ok(item)
    }

    pub async fn stock_out(&self, id: i32, data: &StockOutRequest) -> AppResult<InventoryItem> {
        if let Some(equipment_id) = data.equipment_id {
            self.repository.equipment.get_by_id(equipment_id).await?;
        }
        let item = self.repository.inventory.stock_out(id, data).await?;
        tracing::info!(
            item_id = id,
            quantity = data.quantity,
            equipment_id = ?data.equipment_id,
            "Stock issued"
        );
        if item.is_low_stock() {
            tracing::warn!(item_id = id, remaining = item.quantity, "Item below minimum stock");
        }
        Ok(item)
    }

    pub async fn transfer(&self, id: i32, data: &StockTransferRequest) -> AppResult<TransferResult> {
        let result = self.repository.inventory.transfer(id, data).await.map_err(|e| {
            tracing::warn!(item_id = id, "Stock transfer rejected: {}", e);
            e
        })?;
        tracing::info!(
            item_id = id,
            destination_item_id = result.destination.id,
            destination_project_id = data.destination_project_id,
            quantity = data.quantity,
            "Stock transferred"
        );
        Ok(result)
    }

    pub async fn movements(&self, query: &MovementQuery) -> AppResult<Vec<StockMovement>> {
        self.repository.inventory.list_movements(query).await
    }
}
