/*
 * Responsibility
 * - /drinks CRUD handlers
 * - Path/Json via extractors, DTO validation → store call → envelope
 * - Body-shape failures are captured as JsonRejection and read as 422
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::api::dto::drinks::{
    CreateDrinkRequest, DeleteResponse, DrinkDetail, DrinkSummary, DrinksResponse,
    UpdateDrinkRequest,
};
use crate::error::AppError;
use crate::middleware::access::BearerClaims;
use crate::state::AppState;

/// GET /drinks — public, short shape. An empty collection reads as not
/// found (inherited contract; existing clients rely on the 404).
pub async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<DrinkSummary>>, AppError> {
    let rows = state.store.list().await?;
    if rows.is_empty() {
        return Err(AppError::NotFound);
    }

    let drinks = rows.into_iter().map(DrinkSummary::from).collect();
    Ok(Json(DrinksResponse::new(drinks)))
}

/// GET /drinks-detail — requires `get:drinks-detail`, full shape.
pub async fn list_drinks_detail(
    BearerClaims(_claims): BearerClaims,
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<DrinkDetail>>, AppError> {
    let rows = state.store.list().await?;
    if rows.is_empty() {
        return Err(AppError::NotFound);
    }

    let drinks = rows
        .into_iter()
        .map(DrinkDetail::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DrinksResponse::new(drinks)))
}

/// POST /drinks — requires `post:drinks`. Returns the created drink, full
/// shape, as a one-element list.
pub async fn create_drink(
    BearerClaims(_claims): BearerClaims,
    State(state): State<AppState>,
    body: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkDetail>>, AppError> {
    let Json(req) = body.map_err(|_| AppError::Unprocessable)?;
    req.validate().map_err(|_| AppError::Unprocessable)?;

    let recipe = serde_json::to_string(&req.recipe)?;
    let row = state.store.create(&req.title, &recipe).await?;

    Ok(Json(DrinksResponse::new(vec![DrinkDetail::try_from(row)?])))
}

/// PATCH /drinks/{drink_id} — requires `patch:drinks`. Partial update:
/// fields absent in the body are left unchanged.
pub async fn update_drink(
    BearerClaims(_claims): BearerClaims,
    State(state): State<AppState>,
    Path(drink_id): Path<i64>,
    body: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkDetail>>, AppError> {
    // Unknown id is 404 no matter what the body holds, so look up first.
    if state.store.get(drink_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let Json(req) = body.map_err(|_| AppError::Unprocessable)?;
    req.validate().map_err(|_| AppError::Unprocessable)?;

    let recipe = req
        .recipe
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    let row = state
        .store
        .update(drink_id, req.title.as_deref(), recipe.as_deref())
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(DrinksResponse::new(vec![DrinkDetail::try_from(row)?])))
}

/// DELETE /drinks/{drink_id} — requires `delete:drinks`. Returns the
/// deleted id.
pub async fn delete_drink(
    BearerClaims(_claims): BearerClaims,
    State(state): State<AppState>,
    Path(drink_id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.store.delete(drink_id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(Json(DeleteResponse::new(drink_id)))
}
