//! Equipment repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentDetails, UpdateEquipment},
};

/// Projection shared by all equipment reads: the warranty flag is derived
/// from warranty_date at query time.
const SELECT_EQUIPMENT: &str = r#"
    SELECT e.*,
           (e.warranty_date IS NOT NULL AND e.warranty_date >= CURRENT_DATE) AS is_warranty_valid
    FROM equipment e
"#;

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment, optionally restricted to active records
    pub async fn list(&self, skip: i64, limit: i64, active_only: bool) -> AppResult<Vec<Equipment>> {
        let query = if active_only {
            format!(
                "{} WHERE e.active = TRUE ORDER BY e.name OFFSET $1 LIMIT $2",
                SELECT_EQUIPMENT
            )
        } else {
            format!("{} ORDER BY e.name OFFSET $1 LIMIT $2", SELECT_EQUIPMENT)
        };
        let rows = sqlx::query_as::<_, Equipment>(&query)
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        let query = format!("{} WHERE e.id = $1", SELECT_EQUIPMENT);
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Equipment details for auto-population of maintenance requests
    pub async fn get_details(&self, id: i32) -> AppResult<EquipmentDetails> {
        sqlx::query_as::<_, EquipmentDetails>(
            r#"
            SELECT id, name, category_id, maintenance_team_id, technician_id, is_scrap
            FROM equipment
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// List equipment assigned to a maintenance team
    pub async fn list_for_team(&self, team_id: i32) -> AppResult<Vec<Equipment>> {
        let query = format!(
            "{} WHERE e.maintenance_team_id = $1 ORDER BY e.name",
            SELECT_EQUIPMENT
        );
        let rows = sqlx::query_as::<_, Equipment>(&query)
            .bind(team_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Create equipment (warranty_date already resolved by the service)
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, active, serial_no, model, category_id, color, department,
                owner_id, purchase_date, purchase_value, warranty_date,
                warranty_period, location, maintenance_team_id, technician_id,
                note, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *,
                (warranty_date IS NOT NULL AND warranty_date >= CURRENT_DATE) AS is_warranty_valid
            "#,
        )
        .bind(&data.name)
        .bind(data.active.unwrap_or(true))
        .bind(&data.serial_no)
        .bind(&data.model)
        .bind(data.category_id)
        .bind(data.color.unwrap_or(0))
        .bind(&data.department)
        .bind(data.owner_id)
        .bind(data.purchase_date)
        .bind(data.purchase_value)
        .bind(data.warranty_date)
        .bind(data.warranty_period)
        .bind(&data.location)
        .bind(data.maintenance_team_id)
        .bind(data.technician_id)
        .bind(&data.note)
        .bind(&data.image_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update equipment (partial)
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

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
        add_field!(data.serial_no, "serial_no");
        add_field!(data.model, "model");
        add_field!(data.category_id, "category_id");
        add_field!(data.color, "color");
        add_field!(data.department, "department");
        add_field!(data.owner_id, "owner_id");
        add_field!(data.purchase_date, "purchase_date");
        add_field!(data.purchase_value, "purchase_value");
        add_field!(data.warranty_date, "warranty_date");
        add_field!(data.warranty_period, "warranty_period");
        add_field!(data.location, "location");
        add_field!(data.maintenance_team_id, "maintenance_team_id");
        add_field!(data.technician_id, "technician_id");
        add_field!(data.note, "note");
        add_field!(data.image_url, "image_url");
        let _ = idx;

        let query = format!(
            r#"
            UPDATE equipment SET {} WHERE id = {}
            RETURNING *,
                (warranty_date IS NOT NULL AND warranty_date >= CURRENT_DATE) AS is_warranty_valid
            "#,
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.active);
        bind_field!(data.serial_no);
        bind_field!(data.model);
        bind_field!(data.category_id);
        bind_field!(data.color);
        bind_field!(data.department);
        bind_field!(data.owner_id);
        bind_field!(data.purchase_date);
        bind_field!(data.purchase_value);
        bind_field!(data.warranty_date);
        bind_field!(data.warranty_period);
        bind_field!(data.location);
        bind_field!(data.maintenance_team_id);
        bind_field!(data.technician_id);
        bind_field!(data.note);
        bind_field!(data.image_url);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Mark equipment as scrapped. One-way: no un-scrap exists.
    pub async fn scrap(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET is_scrap = TRUE, scrap_date = CURRENT_DATE, active = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING *,
                (warranty_date IS NOT NULL AND warranty_date >= CURRENT_DATE) AS is_warranty_valid
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Total equipment count (for dashboard)
    pub async fn count_total(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Active equipment count (for dashboard)
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE active = TRUE")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Scrapped equipment count (for dashboard)
    pub async fn count_scrapped(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE is_scrap = TRUE")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
