//! Maintenance events service

use validator::Validate;

use crate::{
    error::AppResult,
    models::maintenance::{CreateMaintenanceEvent, MaintenanceEvent, MaintenanceQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
}

impl MaintenanceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &MaintenanceQuery) -> AppResult<Vec<MaintenanceEvent>> {
        self.repository.maintenance.list(query).await
    }

    /// Record a maintenance event; the project defaults to the equipment's allocation
    pub async fn create(&self, mut data: CreateMaintenanceEvent) -> AppResult<MaintenanceEvent> {
        data.validate()?;
        let equipment = self.repository.equipment.get_by_id(data.equipment_id).await?;
        if data.project_id.is_none() {
            data.project_id = equipment.project_id;
        }
        self.repository.maintenance.create(&data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.maintenance.delete(id).await
    }
}
