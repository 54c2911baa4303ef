//! Signing-key directory (JWKS) lookup.
//!
//! Responsibility:
//! - Model the issuer's published key set and select a key by `kid`.
//! - `RemoteKeys` fetches the JWKS over HTTPS once and caches it for the
//!   process lifetime: key rotation requires a restart.
//! - `StaticKeys` holds a fixed set, for tests and offline runs.

use async_trait::async_trait;
use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use tokio::sync::OnceCell;
use url::Url;

use super::error::AuthError;

#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(rename = "use", default)]
    pub use_: Option<String>,
    // RSA public components (base64url). Absent on non-RSA keys.
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    /// A token's signature must validate against exactly one key in the
    /// set, selected by matching key identifiers.
    pub fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let jwk = self
            .keys
            .iter()
            .find(|k| k.kty == "RSA" && k.kid == kid)
            .ok_or(AuthError::UnknownKey)?;

        match (&jwk.n, &jwk.e) {
            (Some(n), Some(e)) => {
                DecodingKey::from_rsa_components(n, e).map_err(|_| AuthError::UnknownKey)
            }
            _ => Err(AuthError::UnknownKey),
        }
    }
}

/// Where verification keys come from.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError>;
}

/// Lazily fetches the issuer's JWKS and keeps it for the process lifetime.
pub struct RemoteKeys {
    client: reqwest::Client,
    jwks_url: Url,
    cache: OnceCell<Jwks>,
}

impl RemoteKeys {
    pub fn new(jwks_url: Url) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            jwks_url,
            cache: OnceCell::new(),
        })
    }

    async fn jwks(&self) -> Result<&Jwks, AuthError> {
        self.cache
            .get_or_try_init(|| async {
                tracing::info!(url = %self.jwks_url, "fetching signing-key directory");
                let jwks = self
                    .client
                    .get(self.jwks_url.clone())
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<Jwks>()
                    .await?;
                Ok(jwks)
            })
            .await
    }
}

#[async_trait]
impl KeySource for RemoteKeys {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        self.jwks().await?.decoding_key(kid)
    }
}

/// Fixed key set.
pub struct StaticKeys(pub Jwks);

#[async_trait]
impl KeySource for StaticKeys {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        self.0.decoding_key(kid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwks(json: serde_json::Value) -> Jwks {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn unknown_kid_is_rejected() {
        let set = jwks(serde_json::json!({
            "keys": [{"kty": "RSA", "kid": "a", "use": "sig", "n": "AQAB", "e": "AQAB"}]
        }));
        assert!(matches!(
            set.decoding_key("b").unwrap_err(),
            AuthError::UnknownKey
        ));
    }

    #[test]
    fn non_rsa_keys_are_skipped() {
        let set = jwks(serde_json::json!({
            "keys": [{"kty": "EC", "kid": "a", "use": "sig"}]
        }));
        assert!(matches!(
            set.decoding_key("a").unwrap_err(),
            AuthError::UnknownKey
        ));
    }

    #[test]
    fn rsa_key_without_components_is_rejected() {
        let set = jwks(serde_json::json!({
            "keys": [{"kty": "RSA", "kid": "a", "use": "sig"}]
        }));
        assert!(matches!(
            set.decoding_key("a").unwrap_err(),
            AuthError::UnknownKey
        ));
    }
}
