//! Maintenance requests repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::request::{CreateRequest, MaintenanceRequest, RequestQuery, UpdateRequest},
    models::stage::Stage,
};

/// Projection shared by all request reads: the overdue flag is derived from
/// the schedule date and the done flag of the current stage.
const SELECT_REQUEST: &str = r#"
    SELECT r.*,
           (NOT COALESCE(s.done, FALSE)
            AND r.schedule_date IS NOT NULL
            AND r.schedule_date < NOW()) AS is_overdue
    FROM maintenance_requests r
    LEFT JOIN stages s ON s.id = r.stage_id
"#;

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List requests with filters, most urgent first
    pub async fn list(&self, query: &RequestQuery) -> AppResult<Vec<MaintenanceRequest>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.active_only.unwrap_or(true) {
            conditions.push("r.active = TRUE".to_string());
        }

        macro_rules! add_filter {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    conditions.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_filter!(query.equipment_id, "r.equipment_id");
        add_filter!(query.team_id, "r.maintenance_team_id");
        add_filter!(query.stage_id, "r.stage_id");
        add_filter!(query.request_type, "r.request_type");

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "{} {} ORDER BY r.priority DESC, r.id OFFSET ${} LIMIT ${}",
            SELECT_REQUEST,
            where_clause,
            idx,
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, MaintenanceRequest>(&sql);

        macro_rules! bind_filter {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_filter!(query.equipment_id);
        bind_filter!(query.team_id);
        bind_filter!(query.stage_id);
        bind_filter!(query.request_type);

        let rows = builder
            .bind(query.skip.unwrap_or(0))
            .bind(query.limit.unwrap_or(100))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest> {
        let sql = format!("{} WHERE r.id = $1", SELECT_REQUEST);
        sqlx::query_as::<_, MaintenanceRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }

    /// All requests for one equipment, newest first
    pub async fn list_for_equipment(&self, equipment_id: i32) -> AppResult<Vec<MaintenanceRequest>> {
        let sql = format!(
            "{} WHERE r.equipment_id = $1 ORDER BY r.created_at DESC",
            SELECT_REQUEST
        );
        let rows = sqlx::query_as::<_, MaintenanceRequest>(&sql)
            .bind(equipment_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// All requests for one team, most urgent first
    pub async fn list_for_team(&self, team_id: i32) -> AppResult<Vec<MaintenanceRequest>> {
        let sql = format!(
            "{} WHERE r.maintenance_team_id = $1 ORDER BY r.priority DESC, r.id",
            SELECT_REQUEST
        );
        let rows = sqlx::query_as::<_, MaintenanceRequest>(&sql)
            .bind(team_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Count active requests for one equipment whose stage is not done.
    /// A request without a stage counts as open.
    pub async fn open_count_for_equipment(&self, equipment_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM maintenance_requests r
            LEFT JOIN stages s ON s.id = r.stage_id
            WHERE r.equipment_id = $1 AND r.active = TRUE AND s.done IS NOT TRUE
            "#,
        )
        .bind(equipment_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count requests for one team whose stage is not done
    pub async fn open_count_for_team(&self, team_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM maintenance_requests r
            LEFT JOIN stages s ON s.id = r.stage_id
            WHERE r.maintenance_team_id = $1 AND r.active = TRUE AND s.done IS NOT TRUE
            "#,
        )
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Create request (team/technician auto-fill already resolved by the service)
    pub async fn create(&self, data: &CreateRequest) -> AppResult<MaintenanceRequest> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO maintenance_requests (
                name, active, request_type, priority, color, equipment_id,
                maintenance_team_id, technician_id, schedule_date, close_date,
                duration, stage_id, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(data.active.unwrap_or(true))
        .bind(data.request_type.unwrap_or(crate::models::request::RequestType::Corrective))
        .bind(data.priority.unwrap_or(crate::models::request::Priority::Medium))
        .bind(data.color.unwrap_or(0))
        .bind(data.equipment_id)
        .bind(data.maintenance_team_id)
        .bind(data.technician_id)
        .bind(data.schedule_date)
        .bind(data.close_date)
        .bind(data.duration)
        .bind(data.stage_id)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update request (partial), applying stage-transition side effects in
    /// the same transaction as the field assignment.
    ///
    /// When the payload moves the request to a different stage:
    /// - a scrap stage scraps the linked equipment,
    /// - a done stage sets close_date once (never overwriting),
    /// - a non-done stage clears a previously set close_date, so a
    ///   reopened request does not keep a stale completion time.
    pub async fn update(&self, id: i32, data: &UpdateRequest) -> AppResult<MaintenanceRequest> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE r.id = $1 FOR UPDATE OF r", SELECT_REQUEST);
        let current = sqlx::query_as::<_, MaintenanceRequest>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))?;

        // Side effects are evaluated against the old row and the target stage,
        // before the generic field assignment below.
        let mut close_action: Option<Option<DateTime<Utc>>> = None;
        if let Some(new_stage_id) = data.stage_id {
            if current.stage_id != Some(new_stage_id) {
                let stage = sqlx::query_as::<_, Stage>("SELECT * FROM stages WHERE id = $1")
                    .bind(new_stage_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Stage {} not found", new_stage_id))
                    })?;

                if stage.is_scrap {
                    sqlx::query(
                        r#"
                        UPDATE equipment
                        SET is_scrap = TRUE, scrap_date = CURRENT_DATE,
                            active = FALSE, updated_at = NOW()
                        WHERE id = $1
                        "#,
                    )
                    .bind(current.equipment_id)
                    .execute(&mut *tx)
                    .await?;
                }

                if stage.done {
                    if current.close_date.is_none() {
                        close_action = Some(Some(Utc::now()));
                    }
                } else if current.close_date.is_some() {
                    close_action = Some(None);
                }
            }
        }
        // An explicit close_date in the payload wins over the transition default
        if data.close_date.is_some() {
            close_action = Some(data.close_date);
        }

        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

        if close_action.is_some() {
            sets.push(format!("close_date = ${}", idx));
            idx += 1;
        }

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.active, "active");
        add_field!(data.request_type, "request_type");
        add_field!(data.priority, "priority");
        add_field!(data.color, "color");
        add_field!(data.maintenance_team_id, "maintenance_team_id");
        add_field!(data.technician_id, "technician_id");
        add_field!(data.schedule_date, "schedule_date");
        add_field!(data.duration, "duration");
        add_field!(data.stage_id, "stage_id");
        add_field!(data.description, "description");
        let _ = idx;

        let query = format!(
            "UPDATE maintenance_requests SET {} WHERE id = {}",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query(&query);

        if let Some(close) = close_action {
            builder = builder.bind(close);
        }

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.active);
        bind_field!(data.request_type);
        bind_field!(data.priority);
        bind_field!(data.color);
        bind_field!(data.maintenance_team_id);
        bind_field!(data.technician_id);
        bind_field!(data.schedule_date);
        bind_field!(data.duration);
        bind_field!(data.stage_id);
        bind_field!(data.description);

        builder.execute(&mut *tx).await?;

        let sql = format!("{} WHERE r.id = $1", SELECT_REQUEST);
        let updated = sqlx::query_as::<_, MaintenanceRequest>(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Assign a technician to a request (membership already checked)
    pub async fn assign_technician(&self, id: i32, user_id: i32) -> AppResult<MaintenanceRequest> {
        let result = sqlx::query(
            "UPDATE maintenance_requests SET technician_id = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(user_id)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Request {} not found", id)));
        }
        self.get_by_id(id).await
    }

    /// Total request count (for dashboard)
    pub async fn count_total(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_requests")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Requests whose stage is not done (stage-less requests count as open)
    pub async fn count_open(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM maintenance_requests r
            LEFT JOIN stages s ON s.id = r.stage_id
            WHERE s.done IS NOT TRUE
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Requests whose stage is flagged done
    pub async fn count_completed(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM maintenance_requests r
            JOIN stages s ON s.id = r.stage_id
            WHERE s.done = TRUE
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Urgent requests (priority 3)
    pub async fn count_urgent(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM maintenance_requests WHERE priority = '3'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
