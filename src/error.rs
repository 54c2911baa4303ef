/*
 * Responsibility
 * - App-wide ApiError definition and the JSON error envelope
 * - IntoResponse impl (HTTP status / {"success": false, ...} body)
 * - Convert RepoError / AuthError / recipe-decode errors uniformly
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::AuthError;

/// `{"success": false, "error": <status>, "message": <text>}`, plus a
/// `code` kind string on authorization failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("resource not found")]
    NotFound,
    #[error("unprocessable")]
    Unprocessable,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, None, "resource not found".to_string()),
            AppError::Unprocessable => (
                StatusCode::UNPROCESSABLE_ENTITY,
                None,
                "unprocessable".to_string(),
            ),
            AppError::Auth(e) => (e.status(), Some(e.code()), e.to_string()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                None,
                "internal server error".to_string(),
            ),
        };

        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            code,
            message,
        };

        (status, Json(body)).into_response()
    }
}

// Every storage failure during a handler reads as 422. Intentionally coarse;
// the envelope never leaks driver detail.
impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "storage failure");
        AppError::Unprocessable
    }
}

// A recipe column that no longer parses as JSON is unprocessable, not a 500.
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        tracing::error!(error = %e, "recipe (de)serialization failure");
        AppError::Unprocessable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_envelope() {
        let (status, body) = body_json(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 404);
        assert_eq!(body["message"], "resource not found");
        assert!(body.get("code").is_none());
    }

    #[tokio::test]
    async fn unprocessable_envelope() {
        let (status, body) = body_json(AppError::Unprocessable).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], 422);
        assert_eq!(body["message"], "unprocessable");
    }

    #[tokio::test]
    async fn permission_denied_envelope() {
        let (status, body) = body_json(AppError::Auth(AuthError::PermissionDenied)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["message"], "Permission not found.");
    }
}
