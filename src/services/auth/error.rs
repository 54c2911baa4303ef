use axum::http::StatusCode;
use thiserror::Error;

/// Authorization-gate failures. Each variant carries the human-readable
/// description surfaced to the caller; `code()` is the stable kind string
/// and `status()` the HTTP status the gate short-circuits with.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,
    #[error("Authorization header must be a bearer token.")]
    NotBearer,
    #[error("Token not found.")]
    EmptyToken,
    #[error("Unable to parse authentication token.")]
    MalformedHeader,
    #[error("Unable to find the appropriate key.")]
    UnknownKey,
    #[error("Token expired.")]
    Expired,
    #[error("Unable to verify authentication token: {0}")]
    Verification(String),
    #[error("Permissions not included in JWT.")]
    PermissionsMissing,
    #[error("Permission not found.")]
    PermissionDenied,
    #[error("Unable to fetch signing keys.")]
    KeyFetch(#[from] reqwest::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingHeader
            | Self::NotBearer
            | Self::EmptyToken
            | Self::MalformedHeader
            | Self::UnknownKey
            | Self::Expired
            | Self::Verification(_) => StatusCode::UNAUTHORIZED,
            Self::PermissionsMissing => StatusCode::BAD_REQUEST,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::KeyFetch(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader | Self::NotBearer | Self::EmptyToken => "missing_token",
            Self::MalformedHeader | Self::UnknownKey => "invalid_header",
            Self::Expired => "token_expired",
            Self::Verification(_) => "invalid_token",
            Self::PermissionsMissing => "invalid_claims",
            Self::PermissionDenied => "unauthorized",
            Self::KeyFetch(_) => "service_unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_kinds() {
        assert_eq!(AuthError::MissingHeader.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::MissingHeader.code(), "missing_token");

        assert_eq!(AuthError::Expired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Expired.code(), "token_expired");

        assert_eq!(
            AuthError::PermissionsMissing.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::PermissionsMissing.code(), "invalid_claims");

        assert_eq!(AuthError::PermissionDenied.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::PermissionDenied.code(), "unauthorized");
    }
}
