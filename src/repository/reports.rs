//! Daily reports repository

use chrono::Utc;
use sqlx::{types::Json, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        daily_report::{CreateDailyReport, DailyReport, ReportQuery},
        enums::ReportStatus,
        PeriodFilter,
    },
};

#[derive(Clone)]
pub struct ReportsRepository {
    pool: Pool<Postgres>,
}

impl ReportsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List reports matching the optional filters, newest first
    pub async fn list(&self, query: &ReportQuery) -> AppResult<Vec<DailyReport>> {
        let mut conditions: Vec<String> = Vec::new();

        macro_rules! add_condition {
            ($field:expr, $sql:literal) => {
                if $field.is_some() {
                    conditions.push(format!($sql, conditions.len() + 1));
                }
            };
        }

        add_condition!(query.project_id, "project_id = ${}");
        add_condition!(query.equipment_id, "equipment_id = ${}");
        add_condition!(query.start_date, "report_date >= ${}");
        add_condition!(query.end_date, "report_date <= ${}");
        add_condition!(query.status, "status = ${}");

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM daily_reports {} ORDER BY report_date DESC, id DESC",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, DailyReport>(&sql);
        if let Some(id) = query.project_id {
            builder = builder.bind(id);
        }
        if let Some(id) = query.equipment_id {
            builder = builder.bind(id);
        }
        if let Some(d) = query.start_date {
            builder = builder.bind(d);
        }
        if let Some(d) = query.end_date {
            builder = builder.bind(d);
        }
        if let Some(status) = query.status {
            builder = builder.bind(i16::from(status));
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// All reports of a period, in report-date order
    pub async fn list_for_period(&self, filter: &PeriodFilter) -> AppResult<Vec<DailyReport>> {
        let query = ReportQuery {
            project_id: filter.project_id,
            equipment_id: filter.equipment_id,
            start_date: Some(filter.start),
            end_date: Some(filter.end),
            status: None,
        };
        let mut reports = self.list(&query).await?;
        reports.reverse();
        Ok(reports)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<DailyReport> {
        sqlx::query_as::<_, DailyReport>("SELECT * FROM daily_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Daily report {} not found", id)))
    }

    pub async fn create(&self, data: &CreateDailyReport) -> AppResult<DailyReport> {
        let row = sqlx::query_as::<_, DailyReport>(
            r#"
            INSERT INTO daily_reports (
                project_id, equipment_id, report_date, operator, shift,
                total_meters, total_hours, start_time, end_time,
                occurrences, supplies, status, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(data.project_id)
        .bind(data.equipment_id)
        .bind(data.report_date)
        .bind(&data.operator)
        .bind(&data.shift)
        .bind(data.total_meters)
        .bind(data.total_hours)
        .bind(&data.start_time)
        .bind(&data.end_time)
        .bind(Json(&data.occurrences))
        .bind(Json(&data.supplies))
        .bind(i16::from(ReportStatus::Pending))
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Status is the only mutable field of a submitted report
    pub async fn update_status(&self, id: i32, status: ReportStatus) -> AppResult<DailyReport> {
        sqlx::query_as::<_, DailyReport>(
            "UPDATE daily_reports SET status = $1, modif_date = $2 WHERE id = $3 RETURNING *",
        )
        .bind(i16::from(status))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Daily report {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM daily_reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Daily report {} not found", id)));
        }
        Ok(())
    }
}
