//! Equipment category service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, UpdateCategory},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Category>> {
        self.repository.categories.list(skip, limit).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateCategory) -> AppResult<Category> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.categories.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateCategory) -> AppResult<Category> {
        self.repository.categories.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.categories.delete(id).await
    }
}
