//! Repository layer for database operations

pub mod activity;
pub mod borrows;
pub mod inventory;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub borrows: borrows::BorrowsRepository,
    pub inventory: inventory::InventoryLedger,
    pub activity: activity::ActivityLogRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            borrows: borrows::BorrowsRepository::new(pool.clone()),
            inventory: inventory::InventoryLedger::new(pool.clone()),
            activity: activity::ActivityLogRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}
