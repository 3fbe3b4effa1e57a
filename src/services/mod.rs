//! Business logic services

pub mod categories;
pub mod dashboard;
pub mod equipment;
pub mod requests;
pub mod stages;
pub mod teams;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub categories: categories::CategoriesService,
    pub teams: teams::TeamsService,
    pub equipment: equipment::EquipmentService,
    pub stages: stages::StagesService,
    pub requests: requests::RequestsService,
    pub dashboard: dashboard::DashboardService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            categories: categories::CategoriesService::new(repository.clone()),
            teams: teams::TeamsService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            stages: stages::StagesService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository),
        }
    }
}
