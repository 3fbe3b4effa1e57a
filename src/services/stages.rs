//! Workflow stage service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::stage::{CreateStage, Stage, UpdateStage},
    repository::Repository,
};

#[derive(Clone)]
pub struct StagesService {
    repository: Repository,
}

impl StagesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Stage>> {
        self.repository.stages.list().await
    }

    pub async fn create(&self, data: CreateStage) -> AppResult<Stage> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.stages.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateStage) -> AppResult<Stage> {
        self.repository.stages.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.stages.delete(id).await
    }
}
