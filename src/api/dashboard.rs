//! KPI dashboard endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppResult, metrics::KpiSet};

/// Dashboard scope. `year`/`month` take precedence over explicit dates;
/// with no period given the current month is used.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DashboardQuery {
    pub project_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub year: Option<i32>,
    /// 1 to 12
    pub month: Option<u32>,
    /// Start date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// End date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Calendar months charged for fixed costs
    pub period_months: u32,
    pub project_id: Option<i32>,
    pub equipment_id: Option<i32>,
    /// Set when source data could not be loaded and the KPIs are zeroed
    pub degraded: bool,
    pub kpis: KpiSet,
}

/// Compute the KPI set of a period
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "KPIs of the period", body = DashboardResponse),
        (status = 400, description = "Invalid period", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardResponse>> {
    let response = state
        .services
        .dashboard
        .dashboard(&query, Utc::now().date_naive())
        .await?;
    Ok(Json(response))
}
