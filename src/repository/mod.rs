//! Repository layer for database operations

pub mod categories;
pub mod equipment;
pub mod requests;
pub mod stages;
pub mod teams;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub categories: categories::CategoriesRepository,
    pub teams: teams::TeamsRepository,
    pub equipment: equipment::EquipmentRepository,
    pub stages: stages::StagesRepository,
    pub requests: requests::RequestsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            teams: teams::TeamsRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            stages: stages::StagesRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            pool,
        }
    }
}
