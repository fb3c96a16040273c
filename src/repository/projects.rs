//! Projects (sites) repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::project::{CreateProject, Project},
};

#[derive(Clone)]
pub struct ProjectsRepository {
    pool: Pool<Postgres>,
}

impl ProjectsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Project> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (name, location) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.location)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Project '{}' already exists", data.name))
            }
            other => AppError::Database(other),
        })
    }
}
