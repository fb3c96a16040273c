//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    dashboard, equipment, health, inventory, maintenance, occurrence_types, projects, reports,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DrillOps API",
        version = "0.3.0",
        description = "Drilling operations reporting, inventory and KPI REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Projects
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        // Reports
        reports::list_reports,
        reports::get_report,
        reports::create_report,
        reports::update_report_status,
        reports::delete_report,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Maintenance
        maintenance::list_maintenance,
        maintenance::create_maintenance,
        maintenance::delete_maintenance,
        // Inventory
        inventory::list_items,
        inventory::list_low_stock,
        inventory::get_item,
        inventory::create_item,
        inventory::stock_in,
        inventory::stock_out,
        inventory::transfer,
        inventory::list_movements,
        // Dashboard
        occurrence_types::list_occurrence_types,
        dashboard::get_dashboard,
    ),
    components(
        schemas(
            // Projects
            crate::models::project::Project,
            crate::models::project::CreateProject,
            // Reports
            crate::models::daily_report::DailyReport,
            crate::models::daily_report::Occurrence,
            crate::models::daily_report::SupplyLine,
            crate::models::daily_report::CreateDailyReport,
            crate::models::daily_report::UpdateReportStatus,
            crate::models::enums::ReportStatus,
            crate::models::enums::OccurrenceType,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Maintenance
            crate::models::maintenance::MaintenanceEvent,
            crate::models::maintenance::CreateMaintenanceEvent,
            // Inventory
            crate::models::inventory::InventoryItem,
            crate::models::inventory::StockMovement,
            crate::models::inventory::CreateInventoryItem,
            crate::models::inventory::StockInRequest,
            crate::models::inventory::StockOutRequest,
            crate::models::inventory::StockTransferRequest,
            crate::models::inventory::TransferResult,
            crate::models::enums::InventoryCategory,
            crate::models::enums::MovementKind,
            // Dashboard
            dashboard::DashboardResponse,
            occurrence_types::OccurrenceTypeInfo,
            crate::metrics::KpiSet,
            crate::metrics::CostBreakdown,
            crate::metrics::DowntimeByType,
            crate::metrics::DowntimeCause,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "projects", description = "Drilling projects"),
        (name = "reports", description = "Daily operator reports"),
        (name = "equipment", description = "Fleet management"),
        (name = "maintenance", description = "Maintenance events"),
        (name = "inventory", description = "Per-project stock and transfers"),
        (name = "dashboard", description = "Operational KPIs")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_dashboard() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/dashboard"));
        assert!(doc.paths.paths.contains_key("/inventory/{id}/transfer"));
    }
}
