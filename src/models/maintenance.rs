//! Maintenance event model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Maintenance intervention with its cost
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceEvent {
    pub id: i32,
    pub equipment_id: i32,
    pub project_id: Option<i32>,
    pub event_date: NaiveDate,
    pub description: String,
    /// Total cost (parts + labor)
    pub cost: f64,
    pub downtime_hours: Option<f64>,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Create maintenance event request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenanceEvent {
    pub equipment_id: i32,
    pub project_id: Option<i32>,
    /// Event date (YYYY-MM-DD)
    pub event_date: NaiveDate,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Cost must not be negative"))]
    pub cost: f64,
    #[validate(range(min = 0.0))]
    pub downtime_hours: Option<f64>,
}

/// Query parameters for listing maintenance events
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct MaintenanceQuery {
    pub project_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
