/*
 * Responsibility
 * - SQLx operations for the drinks table
 * - Schema bootstrap (drop-and-recreate demo behavior, or create-if-missing)
 */
use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::drink_store::{DrinkRow, DrinkStore};
use crate::repos::error::RepoError;

/// Recreate the drinks table from scratch. Inherited demo behavior: the
/// original deployment dropped and rebuilt its schema on every boot.
pub async fn drop_and_create_all(pool: &PgPool) -> Result<(), RepoError> {
    sqlx::query("DROP TABLE IF EXISTS drinks")
        .execute(pool)
        .await?;
    create_table(pool).await
}

pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepoError> {
    create_table(pool).await
}

async fn create_table(pool: &PgPool) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS drinks (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL UNIQUE,
            recipe TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DrinkStore for PgStore {
    async fn list(&self) -> Result<Vec<DrinkRow>, RepoError> {
        let rows = sqlx::query_as::<_, DrinkRow>(
            r#"
            SELECT id, title, recipe
            FROM drinks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, drink_id: i64) -> Result<Option<DrinkRow>, RepoError> {
        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            SELECT id, title, recipe
            FROM drinks
            WHERE id = $1
            "#,
        )
        .bind(drink_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, title: &str, recipe: &str) -> Result<DrinkRow, RepoError> {
        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES ($1, $2)
            RETURNING id, title, recipe
            "#,
        )
        .bind(title)
        .bind(recipe)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        drink_id: i64,
        title: Option<&str>,
        recipe: Option<&str>,
    ) -> Result<Option<DrinkRow>, RepoError> {
        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            UPDATE drinks
            SET
                title = COALESCE($2, title),
                recipe = COALESCE($3, recipe)
            WHERE id = $1
            RETURNING id, title, recipe
            "#,
        )
        .bind(drink_id)
        .bind(title)
        .bind(recipe)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, drink_id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM drinks
            WHERE id = $1
            "#,
        )
        .bind(drink_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
