/*
 * Responsibility
 * - Drink request/response DTOs and the success envelope
 * - validate() for body-shape checks (failures read as 422 upstream)
 */
use serde::{Deserialize, Serialize};

use crate::repos::drink_store::DrinkRow;

#[derive(Debug, Deserialize)]
pub struct CreateDrinkRequest {
    pub title: String,
    pub recipe: serde_json::Value,
}

impl CreateDrinkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if !(self.recipe.is_array() || self.recipe.is_object()) {
            return Err("recipe must be a JSON array or object");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDrinkRequest {
    // Fields absent in the body are left unchanged.
    pub title: Option<String>,
    pub recipe: Option<serde_json::Value>,
}

impl UpdateDrinkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(recipe) = &self.recipe
            && !(recipe.is_array() || recipe.is_object())
        {
            return Err("recipe must be a JSON array or object");
        }
        Ok(())
    }
}

/// Short shape for the public listing: no recipe.
#[derive(Debug, Serialize)]
pub struct DrinkSummary {
    pub id: i64,
    pub title: String,
}

impl From<DrinkRow> for DrinkSummary {
    fn from(row: DrinkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
        }
    }
}

/// Full shape: the stored recipe text parsed back into structured JSON.
#[derive(Debug, Serialize)]
pub struct DrinkDetail {
    pub id: i64,
    pub title: String,
    pub recipe: serde_json::Value,
}

impl TryFrom<DrinkRow> for DrinkDetail {
    type Error = serde_json::Error;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            title: row.title,
            recipe: serde_json::from_str(&row.recipe)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    pub fn new(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted: i64,
}

impl DeleteResponse {
    pub fn new(deleted: i64) -> Self {
        Self {
            success: true,
            deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_body_leaves_absent_fields_none() {
        let req: UpdateDrinkRequest =
            serde_json::from_value(serde_json::json!({"title": "New Name"})).unwrap();
        assert_eq!(req.title.as_deref(), Some("New Name"));
        assert!(req.recipe.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_rejects_scalar_recipe() {
        let req: CreateDrinkRequest =
            serde_json::from_value(serde_json::json!({"title": "Water", "recipe": "blue"}))
                .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_rejects_blank_title() {
        let req: CreateDrinkRequest =
            serde_json::from_value(serde_json::json!({"title": "  ", "recipe": []})).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_body_requires_both_fields() {
        let missing_recipe: Result<CreateDrinkRequest, _> =
            serde_json::from_value(serde_json::json!({"title": "Water"}));
        assert!(missing_recipe.is_err());
    }

    #[test]
    fn detail_parses_stored_recipe_text() {
        let row = DrinkRow {
            id: 1,
            title: "Water".to_string(),
            recipe: r#"[{"name":"water","color":"blue","parts":1}]"#.to_string(),
        };
        let detail = DrinkDetail::try_from(row).unwrap();
        assert_eq!(detail.recipe[0]["color"], "blue");
    }

    #[test]
    fn detail_rejects_corrupt_recipe_text() {
        let row = DrinkRow {
            id: 1,
            title: "Water".to_string(),
            recipe: "not json".to_string(),
        };
        assert!(DrinkDetail::try_from(row).is_err());
    }
}
