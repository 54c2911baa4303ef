/*
 * Responsibility
 * - The meaning a store conveys upward when it fails
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
}
