//! Daily report endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::daily_report::{CreateDailyReport, DailyReport, ReportQuery, UpdateReportStatus},
};

/// List daily reports
#[utoipa::path(
    get,
    path = "/reports",
    tag = "reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Reports, newest first", body = Vec<DailyReport>)
    )
)]
pub async fn list_reports(
    State(state): State<crate::AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<DailyReport>>> {
    let reports = state.services.reports.list(&query).await?;
    Ok(Json(reports))
}

/// Get a daily report
#[utoipa::path(
    get,
    path = "/reports/{id}",
    tag = "reports",
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report details", body = DailyReport),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_report(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DailyReport>> {
    let report = state.services.reports.get_by_id(id).await?;
    Ok(Json(report))
}

/// Submit a daily report
#[utoipa::path(
    post,
    path = "/reports",
    tag = "reports",
    request_body = CreateDailyReport,
    responses(
        (status = 201, description = "Report stored as pending", body = DailyReport),
        (status = 400, description = "Invalid report", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_report(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateDailyReport>,
) -> AppResult<(StatusCode, Json<DailyReport>)> {
    let report = state.services.reports.create(data).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Approve or reject a report
#[utoipa::path(
    put,
    path = "/reports/{id}/status",
    tag = "reports",
    params(("id" = i32, Path, description = "Report ID")),
    request_body = UpdateReportStatus,
    responses(
        (status = 200, description = "Status updated", body = DailyReport)
    )
)]
pub async fn update_report_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateReportStatus>,
) -> AppResult<Json<DailyReport>> {
    let report = state.services.reports.update_status(id, data.status).await?;
    Ok(Json(report))
}

/// Delete a report
#[utoipa::path(
    delete,
    path = "/reports/{id}",
    tag = "reports",
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 204, description = "Report deleted")
    )
)]
pub async fn delete_report(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reports.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
