//! Stages repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::stage::{CreateStage, Stage, UpdateStage},
};

#[derive(Clone)]
pub struct StagesRepository {
    pool: Pool<Postgres>,
}

impl StagesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all stages in workflow order
    pub async fn list(&self) -> AppResult<Vec<Stage>> {
        let rows = sqlx::query_as::<_, Stage>("SELECT * FROM stages ORDER BY sequence, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get stage by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Stage> {
        sqlx::query_as::<_, Stage>("SELECT * FROM stages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Stage {} not found", id)))
    }

    /// Create stage
    pub async fn create(&self, data: &CreateStage) -> AppResult<Stage> {
        let row = sqlx::query_as::<_, Stage>(
            r#"
            INSERT INTO stages (name, sequence, fold, done, is_scrap, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.sequence.unwrap_or(10))
        .bind(data.fold.unwrap_or(false))
        .bind(data.done.unwrap_or(false))
        .bind(data.is_scrap.unwrap_or(false))
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update stage (partial)
    pub async fn update(&self, id: i32, data: &UpdateStage) -> AppResult<Stage> {
        let mut sets = Vec::new();
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
        add_field!(data.sequence, "sequence");
        add_field!(data.fold, "fold");
        add_field!(data.done, "done");
        add_field!(data.is_scrap, "is_scrap");
        add_field!(data.description, "description");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }
        let _ = idx;

        let query = format!(
            "UPDATE stages SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Stage>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.sequence);
        bind_field!(data.fold);
        bind_field!(data.done);
        bind_field!(data.is_scrap);
        bind_field!(data.description);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Stage {} not found", id)))
    }

    /// Delete stage
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM stages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Stage {} not found", id)));
        }
        Ok(())
    }
}
