//! Maintenance request workflow service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::request::{CreateRequest, MaintenanceRequest, RequestQuery, UpdateRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &RequestQuery) -> AppResult<Vec<MaintenanceRequest>> {
        self.repository.requests.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest> {
        self.repository.requests.get_by_id(id).await
    }

    /// Create a request. Team and technician default to the equipment's
    /// assignments when omitted; explicit values are never overridden.
    pub async fn create(&self, mut data: CreateRequest) -> AppResult<MaintenanceRequest> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let equipment = self.repository.equipment.get_by_id(data.equipment_id).await?;
        if equipment.is_scrap {
            return Err(AppError::BusinessRule(
                "Cannot create maintenance request for scrapped equipment".to_string(),
            ));
        }

        if data.maintenance_team_id.is_none() {
            data.maintenance_team_id = equipment.maintenance_team_id;
        }
        if data.technician_id.is_none() {
            data.technician_id = equipment.technician_id;
        }

        self.repository.requests.create(&data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateRequest) -> AppResult<MaintenanceRequest> {
        self.repository.requests.update(id, data).await
    }

    /// Assign the request to the acting user. Requires membership (or
    /// leadership) of the request's team; a team-less request is assignable
    /// by anyone.
    pub async fn assign_to_user(&self, id: i32, user_id: i32) -> AppResult<MaintenanceRequest> {
        let request = self.repository.requests.get_by_id(id).await?;

        if let Some(team_id) = request.maintenance_team_id {
            let allowed = self
                .repository
                .teams
                .is_member_or_leader(team_id, user_id)
                .await?;
            if !allowed {
                return Err(AppError::Authorization(
                    "You must be a member of the assigned maintenance team to assign this request to yourself"
                        .to_string(),
                ));
            }
        }

        self.repository.requests.assign_technician(id, user_id).await
    }
}
