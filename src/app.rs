/*
 * Responsibility
 * - Config load → dependency construction → Router assembly
 * - Middleware application (CORS, fixed headers, request-id/trace/timeout)
 * - axum::serve() startup
 */
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::{cors, http};
use crate::repos::pg::{self, PgStore};
use crate::services::auth::{AuthService, RemoteKeys};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise a sensible default.
    // Ex: RUST_LOG=info,coffeeshop_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("connecting to database")?;

    if config.db_reset {
        tracing::warn!("DB_RESET active: dropping and recreating the drinks table");
        pg::drop_and_create_all(&pool).await?;
    } else {
        pg::ensure_schema(&pool).await?;
    }

    let keys = Arc::new(RemoteKeys::new(config.jwks_url()?)?);
    let auth = AuthService::new(
        keys,
        &config.issuer(),
        &config.auth_audience,
        config.access_token_leeway_seconds,
    );

    Ok(AppState::new(Arc::new(PgStore::new(pool)), Arc::new(auth)))
}

/// Router assembly, shared with the end-to-end tests (which inject their
/// own state and a static key set).
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes::routes(&state).with_state(state);
    let router = cors::apply(router, config);
    http::apply(router)
}
