use async_trait::async_trait;
use sqlx::FromRow;

use crate::repos::error::RepoError;

/// A drink as stored: the recipe is kept as serialized JSON text and only
/// parsed back into a structured value at the response boundary.
#[derive(Debug, Clone, FromRow)]
pub struct DrinkRow {
    pub id: i64,
    pub title: String,
    pub recipe: String,
}

/// Storage interface for drinks.
///
/// Backends: [`PgStore`](crate::repos::pg::PgStore) against Postgres, and
/// [`MemStore`](crate::repos::memory::MemStore) for tests and local runs.
#[async_trait]
pub trait DrinkStore: Send + Sync {
    async fn list(&self) -> Result<Vec<DrinkRow>, RepoError>;

    async fn get(&self, drink_id: i64) -> Result<Option<DrinkRow>, RepoError>;

    async fn create(&self, title: &str, recipe: &str) -> Result<DrinkRow, RepoError>;

    /// Partial update: `None` fields are left unchanged. Returns `None`
    /// when no row has `drink_id`.
    async fn update(
        &self,
        drink_id: i64,
        title: Option<&str>,
        recipe: Option<&str>,
    ) -> Result<Option<DrinkRow>, RepoError>;

    /// Returns whether a row was actually deleted.
    async fn delete(&self, drink_id: i64) -> Result<bool, RepoError>;
}
