//! Storage capability: trait seam plus Postgres and in-memory implementations.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_schema, PgRestaurantStore};

use crate::error::AppError;
use crate::model::{NewRestaurant, Restaurant, RestaurantUpdate};
use async_trait::async_trait;

/// CRUD over the `restaurants` table. Injected into handlers through
/// `AppState` so tests can substitute an in-memory double.
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Insert a row; storage assigns the id. Returns the created row.
    async fn create(&self, new: NewRestaurant) -> Result<Restaurant, AppError>;

    /// Fetch one row by id.
    async fn get(&self, id: i64) -> Result<Option<Restaurant>, AppError>;

    /// Rows ordered by id descending.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Restaurant>, AppError>;

    /// Overwrite the columns present in `patch`. Returns rows affected;
    /// zero means no row matched (not an error).
    async fn update(&self, id: i64, patch: &RestaurantUpdate) -> Result<u64, AppError>;

    /// Delete by id. Returns rows affected; zero means no row matched.
    async fn delete(&self, id: i64) -> Result<u64, AppError>;
}
