//! Authorization gate: bearer extraction → token verification → permission
//! check → claims into request extensions.
//!
//! Applied per protected route with `middleware::from_fn_with_state`; each
//! route names the permission it requires (see `api::routes`). Failures
//! short-circuit with the structured error envelope before any handler
//! logic runs.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{HeaderMap, Request, header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{AuthError, Claims};
use crate::state::AppState;

pub async fn check(
    state: AppState,
    permission: &'static str,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?.to_string();

    let claims = match state.auth.verify(&token).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, permission, "token verification failed");
            return Err(err.into());
        }
    };

    if let Err(err) = claims.require(permission) {
        tracing::warn!(sub = %claims.sub, permission, "permission check failed");
        return Err(err.into());
    }

    // middleware → extractor handoff
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// `Authorization: Bearer <token>`. Anything else is a missing token.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MissingHeader)?;

    let token = value.strip_prefix("Bearer ").ok_or(AuthError::NotBearer)?;

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::EmptyToken);
    }

    Ok(token)
}

/// Decoded claims for handlers behind the gate. The middleware has already
/// inserted them; a miss means the route was wired without the gate.
#[derive(Debug, Clone)]
pub struct BearerClaims(pub Claims);

impl<S> FromRequestParts<S> for BearerClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(BearerClaims)
            .ok_or(AppError::Auth(AuthError::MissingHeader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn absent_header_is_missing_token() {
        assert!(matches!(
            bearer_token(&headers(None)).unwrap_err(),
            AuthError::MissingHeader
        ));
    }

    #[test]
    fn wrong_scheme_is_rejected() {
        assert!(matches!(
            bearer_token(&headers(Some("Basic dXNlcjpwdw=="))).unwrap_err(),
            AuthError::NotBearer
        ));
    }

    #[test]
    fn bearer_without_token_is_rejected() {
        assert!(matches!(
            bearer_token(&headers(Some("Bearer "))).unwrap_err(),
            AuthError::EmptyToken
        ));
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(
            bearer_token(&headers(Some("Bearer abc.def.ghi"))).unwrap(),
            "abc.def.ghi"
        );
    }
}
