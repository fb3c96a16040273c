//! Projects service

use validator::Validate;

use crate::{
    error::AppResult,
    models::project::{CreateProject, Project},
    repository::Repository,
};

#[derive(Clone)]
pub struct ProjectsService {
    repository: Repository,
}

impl ProjectsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Project>> {
        self.repository.projects.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Project> {
        self.repository.projects.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        data.validate()?;
        self.repository.projects.create(data).await
    }
}
