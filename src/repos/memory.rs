/*
 * Responsibility
 * - In-memory DrinkStore backend (tests, local runs without Postgres)
 * - Same observable semantics as the Postgres backend
 */
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::repos::drink_store::{DrinkRow, DrinkStore};
use crate::repos::error::RepoError;

#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: Vec<DrinkRow>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another test panicked mid-write.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DrinkStore for MemStore {
    async fn list(&self) -> Result<Vec<DrinkRow>, RepoError> {
        Ok(self.lock().rows.clone())
    }

    async fn get(&self, drink_id: i64) -> Result<Option<DrinkRow>, RepoError> {
        Ok(self.lock().rows.iter().find(|r| r.id == drink_id).cloned())
    }

    async fn create(&self, title: &str, recipe: &str) -> Result<DrinkRow, RepoError> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let row = DrinkRow {
            id: inner.next_id,
            title: title.to_string(),
            recipe: recipe.to_string(),
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        drink_id: i64,
        title: Option<&str>,
        recipe: Option<&str>,
    ) -> Result<Option<DrinkRow>, RepoError> {
        let mut inner = self.lock();
        let Some(row) = inner.rows.iter_mut().find(|r| r.id == drink_id) else {
            return Ok(None);
        };
        if let Some(title) = title {
            row.title = title.to_string();
        }
        if let Some(recipe) = recipe {
            row.recipe = recipe.to_string();
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, drink_id: i64) -> Result<bool, RepoError> {
        let mut inner = self.lock();
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id != drink_id);
        Ok(inner.rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_assigned_in_sequence() {
        let store = MemStore::new();
        let a = store.create("Water", "[]").await.unwrap();
        let b = store.create("Coffee", "[]").await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn update_none_leaves_field_unchanged() {
        let store = MemStore::new();
        let row = store.create("Water", r#"[{"name":"water"}]"#).await.unwrap();

        let updated = store
            .update(row.id, Some("Sparkling Water"), None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Sparkling Water");
        assert_eq!(updated.recipe, r#"[{"name":"water"}]"#);
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let store = MemStore::new();
        assert!(store.update(42, Some("x"), None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let store = MemStore::new();
        let row = store.create("Water", "[]").await.unwrap();
        assert!(store.delete(row.id).await.unwrap());
        assert!(!store.delete(row.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
