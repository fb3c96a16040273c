//! Repository layer for database operations

pub mod equipment;
pub mod inventory;
pub mod maintenance;
pub mod projects;
pub mod reports;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{DailyReport, Equipment, MaintenanceEvent, PeriodFilter, StockMovement},
};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub projects: projects::ProjectsRepository,
    pub reports: reports::ReportsRepository,
    pub equipment: equipment::EquipmentRepository,
    pub inventory: inventory::InventoryRepository,
    pub maintenance: maintenance::MaintenanceRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            projects: projects::ProjectsRepository::new(pool.clone()),
            reports: reports::ReportsRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            inventory: inventory::InventoryRepository::new(pool.clone()),
            maintenance: maintenance::MaintenanceRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Read side the KPI dashboard depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn reports_for_period(&self, filter: &PeriodFilter) -> AppResult<Vec<DailyReport>>;

    async fn equipment_by_id(&self, id: i32) -> AppResult<Equipment>;

    async fn equipment_in_scope(&self, filter: &PeriodFilter) -> AppResult<Vec<Equipment>>;

    async fn maintenance_for_period(&self, filter: &PeriodFilter) -> AppResult<Vec<MaintenanceEvent>>;

    async fn stock_outs_for_period(&self, filter: &PeriodFilter) -> AppResult<Vec<StockMovement>>;
}

#[async_trait]
impl RecordStore for Repository {
    async fn reports_for_period(&self, filter: &PeriodFilter) -> AppResult<Vec<DailyReport>> {
        self.reports.list_for_period(filter).await
    }

    async fn equipment_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.equipment.get_by_id(id).await
    }

    async fn equipment_in_scope(&self, filter: &PeriodFilter) -> AppResult<Vec<Equipment>> {
        self.equipment.list_in_scope(filter).await
    }

    async fn maintenance_for_period(&self, filter: &PeriodFilter) -> AppResult<Vec<MaintenanceEvent>> {
        self.maintenance.list_for_period(filter).await
    }

    async fn stock_outs_for_period(&self, filter: &PeriodFilter) -> AppResult<Vec<StockMovement>> {
        self.inventory.stock_outs_for_period(filter).await
    }
}
