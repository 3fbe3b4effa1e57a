//! Equipment service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        warranty_expiration, CreateEquipment, Equipment, EquipmentDetails, UpdateEquipment,
    },
    models::request::MaintenanceRequest,
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, skip: i64, limit: i64, active_only: bool) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(skip, limit, active_only).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Details used to pre-populate a new maintenance request. Scrapped
    /// equipment cannot originate new requests.
    pub async fn get_details(&self, id: i32) -> AppResult<EquipmentDetails> {
        let details = self.repository.equipment.get_details(id).await?;
        if details.is_scrap {
            return Err(AppError::BusinessRule(
                "Cannot create maintenance request for scrapped equipment".to_string(),
            ));
        }
        Ok(details)
    }

    pub async fn create(&self, mut data: CreateEquipment) -> AppResult<Equipment> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Materialize the warranty date unless the caller supplied one
        if data.warranty_date.is_none() {
            if let (Some(purchase_date), Some(period)) = (data.purchase_date, data.warranty_period) {
                data.warranty_date = warranty_expiration(purchase_date, period);
            }
        }

        self.repository.equipment.create(&data).await
    }

    pub async fn update(&self, id: i32, mut data: UpdateEquipment) -> AppResult<Equipment> {
        // Recompute the warranty date when its inputs change and the caller
        // did not set it explicitly
        if data.warranty_date.is_none()
            && (data.purchase_date.is_some() || data.warranty_period.is_some())
        {
            let current = self.repository.equipment.get_by_id(id).await?;
            let purchase_date = data.purchase_date.or(current.purchase_date);
            let period = data.warranty_period.or(current.warranty_period);
            if let (Some(purchase_date), Some(period)) = (purchase_date, period) {
                data.warranty_date = warranty_expiration(purchase_date, period);
            }
        }

        self.repository.equipment.update(id, &data).await
    }

    /// Mark equipment as scrapped (irreversible)
    pub async fn scrap(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.scrap(id).await
    }

    /// Maintenance requests raised against the equipment, newest first
    pub async fn requests(&self, id: i32) -> AppResult<Vec<MaintenanceRequest>> {
        self.repository.equipment.get_by_id(id).await?;
        self.repository.requests.list_for_equipment(id).await
    }

    /// Count of open maintenance requests for the equipment
    pub async fn open_request_count(&self, id: i32) -> AppResult<i64> {
        self.repository.equipment.get_by_id(id).await?;
        self.repository.requests.open_count_for_equipment(id).await
    }
}
