//! Equipment (asset) model

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Equipment record.
///
/// `is_warranty_valid` is not stored; list/get queries project it from
/// `warranty_date` against the current date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub active: bool,
    /// Unique serial number, when known
    pub serial_no: Option<String>,
    pub model: Option<String>,
    pub category_id: Option<i32>,
    pub color: i32,
    pub department: Option<String>,
    pub owner_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_value: Option<f64>,
    /// Warranty expiration, materialized from purchase_date + warranty_period
    pub warranty_date: Option<NaiveDate>,
    /// Warranty period in months
    pub warranty_period: Option<i32>,
    pub is_warranty_valid: bool,
    pub location: Option<String>,
    pub maintenance_team_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub note: Option<String>,
    pub image_url: Option<String>,
    pub is_scrap: bool,
    pub scrap_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Equipment details for auto-population of maintenance requests
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentDetails {
    pub id: i32,
    pub name: String,
    pub category_id: Option<i32>,
    pub maintenance_team_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub is_scrap: bool,
}

/// Create equipment request
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Equipment name must not be empty"))]
    pub name: String,
    pub active: Option<bool>,
    pub serial_no: Option<String>,
    pub model: Option<String>,
    pub category_id: Option<i32>,
    pub color: Option<i32>,
    pub department: Option<String>,
    pub owner_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_value: Option<f64>,
    pub warranty_date: Option<NaiveDate>,
    pub warranty_period: Option<i32>,
    pub location: Option<String>,
    pub maintenance_team_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub note: Option<String>,
    pub image_url: Option<String>,
}

/// Update equipment request (partial)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub serial_no: Option<String>,
    pub model: Option<String>,
    pub category_id: Option<i32>,
    pub color: Option<i32>,
    pub department: Option<String>,
    pub owner_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_value: Option<f64>,
    pub warranty_date: Option<NaiveDate>,
    pub warranty_period: Option<i32>,
    pub location: Option<String>,
    pub maintenance_team_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub note: Option<String>,
    pub image_url: Option<String>,
}

/// Equipment query parameters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct EquipmentQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    /// Only return active equipment (default true)
    pub active_only: Option<bool>,
}

/// Warranty expiration date: purchase date plus the warranty period in
/// months, clamped to the end of the target month.
pub fn warranty_expiration(purchase_date: NaiveDate, warranty_period: i32) -> Option<NaiveDate> {
    if warranty_period < 0 {
        return None;
    }
    purchase_date.checked_add_months(Months::new(warranty_period as u32))
}

/// Whether a warranty date still covers the given day
pub fn warranty_valid(warranty_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    warranty_date.map(|d| d >= today).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn warranty_expiration_adds_months() {
        assert_eq!(
            warranty_expiration(date(2024, 3, 15), 12),
            Some(date(2025, 3, 15))
        );
    }

    #[test]
    fn warranty_expiration_clamps_to_month_end() {
        assert_eq!(
            warranty_expiration(date(2024, 1, 31), 1),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn warranty_expiration_rejects_negative_period() {
        assert_eq!(warranty_expiration(date(2024, 1, 1), -3), None);
    }

    #[test]
    fn warranty_valid_on_boundary() {
        let today = date(2025, 6, 1);
        assert!(warranty_valid(Some(today), today));
        assert!(warranty_valid(Some(date(2025, 6, 2)), today));
        assert!(!warranty_valid(Some(date(2025, 5, 31)), today));
        assert!(!warranty_valid(None, today));
    }

    #[test]
    fn warranty_expiration_keeps_day_number() {
        let expires = warranty_expiration(date(2023, 11, 3), 6).unwrap();
        assert_eq!((expires.year(), expires.month(), expires.day()), (2024, 5, 3));
    }
}
