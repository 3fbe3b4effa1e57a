//! Maintenance team service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::Equipment,
    models::request::MaintenanceRequest,
    models::team::{CreateTeam, Team, UpdateTeam},
    repository::Repository,
};

#[derive(Clone)]
pub struct TeamsService {
    repository: Repository,
}

impl TeamsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Team>> {
        self.repository.teams.list(skip, limit).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Team> {
        self.repository.teams.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateTeam) -> AppResult<Team> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.teams.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateTeam) -> AppResult<Team> {
        self.repository.teams.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.teams.delete(id).await
    }

    /// Equipment assigned to the team
    pub async fn equipment(&self, id: i32) -> AppResult<Vec<Equipment>> {
        self.repository.teams.get_by_id(id).await?;
        self.repository.equipment.list_for_team(id).await
    }

    /// Requests for the team together with the open-request count
    pub async fn requests(&self, id: i32) -> AppResult<(Vec<MaintenanceRequest>, i64)> {
        self.repository.teams.get_by_id(id).await?;
        let requests = self.repository.requests.list_for_team(id).await?;
        let open_count = self.repository.requests.open_count_for_team(id).await?;
        Ok((requests, open_count))
    }
}
