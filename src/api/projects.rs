//! Project endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::project::{CreateProject, Project},
};

/// List projects
#[utoipa::path(
    get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "Project list", body = Vec<Project>)
    )
)]
pub async fn list_projects(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = state.services.projects.list().await?;
    Ok(Json(projects))
}

/// Get project by ID
#[utoipa::path(
    get,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project details", body = Project),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_project(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Project>> {
    let project = state.services.projects.get_by_id(id).await?;
    Ok(Json(project))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/projects",
    tag = "projects",
    request_body = CreateProject,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 409, description = "Project name already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_project(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.services.projects.create(&data).await?;
    Ok((StatusCode::CREATED, Json(project)))
}
