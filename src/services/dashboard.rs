//! Dashboard statistics service

use crate::{api::dashboard::DashboardStats, error::AppResult, repository::Repository};

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Compute all dashboard counters fresh, no caching
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        Ok(DashboardStats {
            total_equipment: self.repository.equipment.count_total().await?,
            active_equipment: self.repository.equipment.count_active().await?,
            scrapped_equipment: self.repository.equipment.count_scrapped().await?,
            total_requests: self.repository.requests.count_total().await?,
            open_requests: self.repository.requests.count_open().await?,
            completed_requests: self.repository.requests.count_completed().await?,
            urgent_requests: self.repository.requests.count_urgent().await?,
        })
    }
}
