//! Teams repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::team::{CreateTeam, Team, TeamRow, UpdateTeam},
    models::user::UserBasic,
};

#[derive(Clone)]
pub struct TeamsRepository {
    pool: Pool<Postgres>,
}

impl TeamsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List active teams with pagination, members embedded
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(
            "SELECT * FROM teams WHERE active = TRUE ORDER BY name OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut teams = Vec::with_capacity(rows.len());
        for row in rows {
            teams.push(self.assemble(row).await?);
        }
        Ok(teams)
    }

    /// Get team by ID, members embedded
    pub async fn get_by_id(&self, id: i32) -> AppResult<Team> {
        let row = sqlx::query_as::<_, TeamRow>("SELECT * FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;
        self.assemble(row).await
    }

    /// Create team with an optional initial membership set
    pub async fn create(&self, data: &CreateTeam) -> AppResult<Team> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            INSERT INTO teams (name, active, color, description, leader_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.active.unwrap_or(true))
        .bind(data.color.unwrap_or(0))
        .bind(&data.description)
        .bind(data.leader_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(ref member_ids) = data.member_ids {
            if !member_ids.is_empty() {
                sqlx::query(
                    r#"
                    INSERT INTO team_members (team_id, user_id)
                    SELECT $1, unnest($2::int[])
                    ON CONFLICT DO NOTHING
                    "#,
                )
                .bind(row.id)
                .bind(member_ids)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        self.assemble(row).await
    }

    /// Update team (partial); a member_ids value replaces the membership set
    pub async fn update(&self, id: i32, data: &UpdateTeam) -> AppResult<Team> {
        let mut tx = self.pool.begin().await?;

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
        add_field!(data.active, "active");
        add_field!(data.color, "color");
        add_field!(data.description, "description");
        add_field!(data.leader_id, "leader_id");
        let _ = idx;

        let row = if sets.is_empty() {
            sqlx::query_as::<_, TeamRow>("SELECT * FROM teams WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        } else {
            let query = format!(
                "UPDATE teams SET {} WHERE id = {} RETURNING *",
                sets.join(", "),
                id
            );

            let mut builder = sqlx::query_as::<_, TeamRow>(&query);

            macro_rules! bind_field {
                ($field:expr) => {
                    if let Some(ref val) = $field {
                        builder = builder.bind(val);
                    }
                };
            }

            bind_field!(data.name);
            bind_field!(data.active);
            bind_field!(data.color);
            bind_field!(data.description);
            bind_field!(data.leader_id);

            builder.fetch_optional(&mut *tx).await?
        };

        let row = row.ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;

        if let Some(ref member_ids) = data.member_ids {
            sqlx::query("DELETE FROM team_members WHERE team_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if !member_ids.is_empty() {
                sqlx::query(
                    r#"
                    INSERT INTO team_members (team_id, user_id)
                    SELECT $1, unnest($2::int[])
                    ON CONFLICT DO NOTHING
                    "#,
                )
                .bind(id)
                .bind(member_ids)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        self.assemble(row).await
    }

    /// Delete team (membership rows cascade)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }
        Ok(())
    }

    /// Members of a team, as basic user info
    pub async fn members(&self, team_id: i32) -> AppResult<Vec<UserBasic>> {
        let members = sqlx::query_as::<_, UserBasic>(
            r#"
            SELECT u.id, u.name, u.email, u.profile_picture, u.role
            FROM users u
            JOIN team_members tm ON tm.user_id = u.id
            WHERE tm.team_id = $1
            ORDER BY u.name
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    /// Whether a user is a member or the leader of the team
    pub async fn is_member_or_leader(&self, team_id: i32, user_id: i32) -> AppResult<bool> {
        let allowed: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM team_members WHERE team_id = $1 AND user_id = $2
            ) OR EXISTS(
                SELECT 1 FROM teams WHERE id = $1 AND leader_id = $2
            )
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(allowed)
    }

    async fn assemble(&self, row: TeamRow) -> AppResult<Team> {
        let members = self.members(row.id).await?;
        let leader = match row.leader_id {
            Some(leader_id) => {
                sqlx::query_as::<_, UserBasic>(
                    "SELECT id, name, email, profile_picture, role FROM users WHERE id = $1",
                )
                .bind(leader_id)
                .fetch_optional(&self.pool)
                .await?
            }
            None => None,
        };
        Ok(row.into_team(leader, members))
    }
}
