//! Maintenance request model and workflow enums

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Maintenance type: unplanned breakdown repair vs. planned routine checkup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Corrective,
    Preventive,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Corrective => "corrective",
            RequestType::Preventive => "preventive",
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "corrective" => Ok(RequestType::Corrective),
            "preventive" => Ok(RequestType::Preventive),
            _ => Err(format!("Invalid request type: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for RequestType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RequestType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RequestType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Request priority, stored as a single digit so that the lexical order of
/// the stored value is the urgency order ("3" = Urgent sorts last ascending,
/// first descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    #[serde(rename = "0")]
    Low,
    #[serde(rename = "1")]
    Medium,
    #[serde(rename = "2")]
    High,
    #[serde(rename = "3")]
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "0",
            Priority::Medium => "1",
            Priority::High => "2",
            Priority::Urgent => "3",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Priority::Low),
            "1" => Ok(Priority::Medium),
            "2" => Ok(Priority::High),
            "3" => Ok(Priority::Urgent),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for Priority {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Priority {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Priority {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Maintenance request record.
///
/// `is_overdue` is not stored; queries project it from the schedule date and
/// the done flag of the current stage.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRequest {
    pub id: i32,
    /// Subject ("Leaking Oil", "Screen Not Working", ...)
    pub name: String,
    pub active: bool,
    pub request_type: RequestType,
    pub priority: Priority,
    pub color: i32,
    pub equipment_id: i32,
    pub maintenance_team_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub schedule_date: Option<DateTime<Utc>>,
    /// Set when the request first enters a done stage
    pub close_date: Option<DateTime<Utc>>,
    /// Time spent, in hours
    pub duration: Option<f64>,
    pub stage_id: Option<i32>,
    pub description: Option<String>,
    pub is_overdue: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create maintenance request
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1, message = "Request subject must not be empty"))]
    pub name: String,
    pub active: Option<bool>,
    pub request_type: Option<RequestType>,
    pub priority: Option<Priority>,
    pub color: Option<i32>,
    pub equipment_id: i32,
    pub maintenance_team_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub schedule_date: Option<DateTime<Utc>>,
    pub close_date: Option<DateTime<Utc>>,
    pub duration: Option<f64>,
    pub stage_id: Option<i32>,
    pub description: Option<String>,
}

/// Update maintenance request (partial; equipment cannot be re-targeted)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequest {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub request_type: Option<RequestType>,
    pub priority: Option<Priority>,
    pub color: Option<i32>,
    pub maintenance_team_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub schedule_date: Option<DateTime<Utc>>,
    pub close_date: Option<DateTime<Utc>>,
    pub duration: Option<f64>,
    pub stage_id: Option<i32>,
    pub description: Option<String>,
}

/// Request query parameters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct RequestQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    /// Only return active requests (default true)
    pub active_only: Option<bool>,
    pub equipment_id: Option<i32>,
    pub team_id: Option<i32>,
    pub stage_id: Option<i32>,
    pub request_type: Option<RequestType>,
}

/// Whether a request is overdue: never once its stage is done, otherwise
/// when the scheduled date has passed.
pub fn is_overdue(
    schedule_date: Option<DateTime<Utc>>,
    stage_done: bool,
    now: DateTime<Utc>,
) -> bool {
    if stage_done {
        return false;
    }
    schedule_date.map(|d| d < now).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn priority_digit_order_matches_urgency() {
        assert!(Priority::Urgent > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        // Stored digits sort the same way as the enum
        assert!(Priority::Urgent.as_str() > Priority::Low.as_str());
    }

    #[test]
    fn priority_parses_stored_digits() {
        assert_eq!("3".parse::<Priority>().unwrap(), Priority::Urgent);
        assert_eq!("0".parse::<Priority>().unwrap(), Priority::Low);
        assert!("4".parse::<Priority>().is_err());
    }

    #[test]
    fn request_type_round_trips() {
        assert_eq!(
            "preventive".parse::<RequestType>().unwrap(),
            RequestType::Preventive
        );
        assert_eq!(RequestType::Corrective.to_string(), "corrective");
        assert!("urgent".parse::<RequestType>().is_err());
    }

    #[test]
    fn overdue_requires_past_schedule() {
        let now = Utc::now();
        assert!(is_overdue(Some(now - Duration::hours(1)), false, now));
        assert!(!is_overdue(Some(now + Duration::hours(1)), false, now));
        assert!(!is_overdue(None, false, now));
    }

    #[test]
    fn done_stage_is_never_overdue() {
        let now = Utc::now();
        assert!(!is_overdue(Some(now - Duration::days(3)), true, now));
    }
}
