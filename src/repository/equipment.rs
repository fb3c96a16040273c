//! Equipment (fleet) repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        PeriodFilter,
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment, optionally restricted to one project
    pub async fn list(&self, project_id: Option<i32>) -> AppResult<Vec<Equipment>> {
        let rows = match project_id {
            Some(project_id) => {
                sqlx::query_as::<_, Equipment>(
                    "SELECT * FROM equipment WHERE project_id = $1 ORDER BY name",
                )
                .bind(project_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY name")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Equipment whose fixed cost is charged to a KPI period
    pub async fn list_in_scope(&self, filter: &PeriodFilter) -> AppResult<Vec<Equipment>> {
        match filter.equipment_id {
            Some(id) => Ok(vec![self.get_by_id(id).await?]),
            None => self.list(filter.project_id).await,
        }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                project_id, name, category, model, serial_number, owned,
                monthly_rental_cost, monthly_depreciation, status, hour_meter, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, $9, $10)
            RETURNING *
            "#,
        )
        .bind(data.project_id)
        .bind(&data.name)
        .bind(&data.category)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(data.owned)
        .bind(data.monthly_rental_cost)
        .bind(data.monthly_depreciation)
        .bind(data.hour_meter)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut sets = vec!["modif_date = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.project_id, "project_id");
        add_field!(data.category, "category");
        add_field!(data.model, "model");
        add_field!(data.serial_number, "serial_number");
        add_field!(data.owned, "owned");
        add_field!(data.monthly_rental_cost, "monthly_rental_cost");
        add_field!(data.monthly_depreciation, "monthly_depreciation");
        add_field!(data.status, "status");
        add_field!(data.hour_meter, "hour_meter");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.project_id);
        bind_field!(data.category);
        bind_field!(data.model);
        bind_field!(data.serial_number);
        bind_field!(data.owned);
        bind_field!(data.monthly_rental_cost);
        bind_field!(data.monthly_depreciation);
        bind_field!(data.status);
        bind_field!(data.hour_meter);
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }
}
