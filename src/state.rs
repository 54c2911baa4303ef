/*
 * Responsibility
 * - Shared context handed to the Router (AppState)
 * - Clone is cheap (Arc all the way down)
 */
use std::sync::Arc;

use crate::repos::drink_store::DrinkStore;
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DrinkStore>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn DrinkStore>, auth: Arc<AuthService>) -> Self {
        Self { store, auth }
    }
}
