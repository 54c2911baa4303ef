use std::sync::Arc;

use jsonwebtoken::{Algorithm, Validation, decode, decode_header, errors::ErrorKind};

use super::claims::Claims;
use super::error::AuthError;
use super::keys::KeySource;

/// RS256 access-token verifier.
///
/// - Keys come from a [`KeySource`] (remote JWKS in production, static in
///   tests), selected per token by the `kid` header.
/// - `jsonwebtoken::Validation` checks signature, `exp`, `iss` and `aud`
///   (because we set them) with the configured leeway.
pub struct AuthService {
    keys: Arc<dyn KeySource>,
    validation: Validation,
}

impl AuthService {
    pub fn new(keys: Arc<dyn KeySource>, issuer: &str, audience: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Self { keys, validation }
    }

    /// Verify a bearer token end to end: header parse, key lookup by `kid`,
    /// signature, and standard-claim validation.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedHeader)?;
        let kid = header.kid.ok_or(AuthError::MalformedHeader)?;

        let key = self.keys.decoding_key(&kid).await?;

        let data = decode::<Claims>(token, &key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Verification(e.to_string()),
        })?;

        Ok(data.claims)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}
