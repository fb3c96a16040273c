//! Business logic services

pub mod dashboard;
pub mod equipment;
pub mod inventory;
pub mod maintenance;
pub mod projects;
pub mod reports;

use std::sync::Arc;

use crate::{config::MetricsConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub projects: projects::ProjectsService,
    pub reports: reports::ReportsService,
    pub equipment: equipment::EquipmentService,
    pub inventory: inventory::InventoryService,
    pub maintenance: maintenance::MaintenanceService,
    pub dashboard: dashboard::DashboardService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, metrics_config: MetricsConfig) -> Self {
        Self {
            projects: projects::ProjectsService::new(repository.clone()),
            reports: reports::ReportsService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            inventory: inventory::InventoryService::new(repository.clone()),
            maintenance: maintenance::MaintenanceService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(
                Arc::new(repository.clone()),
                metrics_config,
            ),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
