//! Project (site) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Drilling site; every report and stock row belongs to one
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub is_active: bool,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Create project request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProject {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub location: Option<String>,
}
