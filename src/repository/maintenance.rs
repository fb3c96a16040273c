//! Maintenance events repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        maintenance::{CreateMaintenanceEvent, MaintenanceEvent, MaintenanceQuery},
        PeriodFilter,
    },
};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &MaintenanceQuery) -> AppResult<Vec<MaintenanceEvent>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.project_id.is_some() {
            conditions.push(format!("project_id = ${}", idx));
            idx += 1;
        }
        if query.equipment_id.is_some() {
            conditions.push(format!("equipment_id = ${}", idx));
            idx += 1;
        }
        if query.start_date.is_some() {
            conditions.push(format!("event_date >= ${}", idx));
            idx += 1;
        }
        if query.end_date.is_some() {
            conditions.push(format!("event_date <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM maintenance_events {} ORDER BY event_date DESC, id DESC",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, MaintenanceEvent>(&sql);
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

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Cost records falling inside a KPI period
    pub async fn list_for_period(&self, filter: &PeriodFilter) -> AppResult<Vec<MaintenanceEvent>> {
        self.list(&MaintenanceQuery {
            project_id: filter.project_id,
            equipment_id: filter.equipment_id,
            start_date: Some(filter.start),
            end_date: Some(filter.end),
        })
        .await
    }

    pub async fn create(&self, data: &CreateMaintenanceEvent) -> AppResult<MaintenanceEvent> {
        let row = sqlx::query_as::<_, MaintenanceEvent>(
            r#"
            INSERT INTO maintenance_events (equipment_id, project_id, event_date, description, cost, downtime_hours)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.project_id)
        .bind(data.event_date)
        .bind(&data.description)
        .bind(data.cost)
        .bind(data.downtime_hours)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Maintenance event {} not found", id)));
        }
        Ok(())
    }
}
