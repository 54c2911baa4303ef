//! CORS policy plus the API's fixed response headers.
//!
//! Responsibility:
//! - Preflight handling: permissive in development, allowlist origins from
//!   Config in production (exact match, no credentials).
//! - Stamp the contract headers on every response, success or error:
//!   `Access-Control-Allow-Headers: Content-Type,Authorization,true` and
//!   `Access-Control-Allow-Methods: GET,PATCH,POST,DELETE`. Existing
//!   clients assert on these exact values.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::Config;

pub fn apply(router: Router, config: &Config) -> Router {
    let cors = if config.app_env.is_production() {
        // An empty allowlist intentionally allows none.
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
            allowed.iter().any(|v| v == origin)
        });

        CorsLayer::new().allow_origin(allow_origin)
    } else {
        CorsLayer::new().allow_origin(Any)
    }
    .allow_methods([
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    // Outermost layers run last on the way out, so these override whatever
    // CorsLayer set.
    router
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-headers"),
            HeaderValue::from_static("Content-Type,Authorization,true"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-methods"),
            HeaderValue::from_static("GET,PATCH,POST,DELETE"),
        ))
}
