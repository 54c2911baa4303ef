use serde::Deserialize;

use super::error::AuthError;

/// Decoded access-token claims.
///
/// NOTE:
/// - `aud` in a JWT can be either a string or an array; jsonwebtoken
///   validates it via `Validation::set_audience`, so we keep it as a raw
///   `Value` here.
/// - `permissions` is the issuer's flat list of permission strings; its
///   absence is distinct from it being empty.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    #[serde(default)]
    pub aud: serde_json::Value,
    pub exp: u64,

    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// The one authorization model this service supports: the token must
    /// carry `permission` in its `permissions` list.
    pub fn require(&self, permission: &str) -> Result<(), AuthError> {
        let permissions = self
            .permissions
            .as_ref()
            .ok_or(AuthError::PermissionsMissing)?;

        if permissions.iter().any(|p| p == permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(permissions: Option<Vec<&str>>) -> Claims {
        Claims {
            iss: "https://tenant.example.com/".to_string(),
            sub: "auth0|abc123".to_string(),
            aud: serde_json::Value::String("drinks".to_string()),
            exp: 4_102_444_800,
            permissions: permissions.map(|p| p.into_iter().map(String::from).collect()),
        }
    }

    #[test]
    fn present_permission_passes() {
        assert!(claims(Some(vec!["get:drinks-detail"]))
            .require("get:drinks-detail")
            .is_ok());
    }

    #[test]
    fn absent_permission_is_denied() {
        let err = claims(Some(vec!["get:drinks-detail"]))
            .require("post:drinks")
            .unwrap_err();
        assert!(matches!(err, AuthError::PermissionDenied));
    }

    #[test]
    fn missing_list_is_invalid_claims() {
        let err = claims(None).require("post:drinks").unwrap_err();
        assert!(matches!(err, AuthError::PermissionsMissing));
    }

    #[test]
    fn empty_list_is_denied_not_invalid() {
        let err = claims(Some(vec![])).require("post:drinks").unwrap_err();
        assert!(matches!(err, AuthError::PermissionDenied));
    }

    #[test]
    fn deserializes_without_permissions_claim() {
        let c: Claims = serde_json::from_value(serde_json::json!({
            "iss": "https://tenant.example.com/",
            "sub": "auth0|abc123",
            "aud": "drinks",
            "exp": 4102444800u64,
        }))
        .unwrap();
        assert!(c.permissions.is_none());
    }
}
