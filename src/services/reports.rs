//! Daily report service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        daily_report::{CreateDailyReport, DailyReport, ReportQuery},
        enums::ReportStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ReportQuery) -> AppResult<Vec<DailyReport>> {
        self.repository.reports.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<DailyReport> {
        self.repository.reports.get_by_id(id).await
    }

    /// Validate, normalize and store a new report (always pending)
    pub async fn create(&self, data: CreateDailyReport) -> AppResult<DailyReport> {
        data.validate()?;
        let data = data.normalized();

        self.repository.projects.get_by_id(data.project_id).await?;
        if let Some(equipment_id) = data.equipment_id {
            self.repository.equipment.get_by_id(equipment_id).await?;
        }

        let report = self.repository.reports.create(&data).await?;
        tracing::info!(
            report_id = report.id,
            project_id = report.project_id,
            date = %report.report_date,
            "Daily report created"
        );
        Ok(report)
    }

    pub async fn update_status(&self, id: i32, status: ReportStatus) -> AppResult<DailyReport> {
        let report = self.repository.reports.update_status(id, status).await?;
        tracing::info!(report_id = id, status = ?status, "Daily report status changed");
        Ok(report)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.reports.delete(id).await
    }
}
