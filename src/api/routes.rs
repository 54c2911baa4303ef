/*
 * Responsibility
 * - URL structure for the drinks API
 * - Per-route authorization: each protected method names its permission
 *   and is wrapped by the access gate; GET /drinks stays public
 */
use axum::{
    Router,
    extract::{Request, State},
    handler::Handler,
    middleware::{self, Next},
    routing::{get, patch},
};

use crate::api::handlers::drinks::{
    create_drink, delete_drink, list_drinks, list_drinks_detail, update_drink,
};
use crate::middleware::access;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/drinks",
            get(list_drinks).post(create_drink.layer(middleware::from_fn_with_state(
                state.clone(),
                |State(state): State<AppState>, req: Request, next: Next| {
                    access::check(state, "post:drinks", req, next)
                },
            ))),
        )
        .route(
            "/drinks-detail",
            get(list_drinks_detail.layer(middleware::from_fn_with_state(
                state.clone(),
                |State(state): State<AppState>, req: Request, next: Next| {
                    access::check(state, "get:drinks-detail", req, next)
                },
            ))),
        )
        .route(
            "/drinks/{drink_id}",
            patch(update_drink.layer(middleware::from_fn_with_state(
                state.clone(),
                |State(state): State<AppState>, req: Request, next: Next| {
                    access::check(state, "patch:drinks", req, next)
                },
            )))
            .delete(delete_drink.layer(middleware::from_fn_with_state(
                state.clone(),
                |State(state): State<AppState>, req: Request, next: Next| {
                    access::check(state, "delete:drinks", req, next)
                },
            ))),
        )
}
