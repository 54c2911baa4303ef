/*
 * Responsibility
 * - Load environment configuration (DATABASE_URL, auth issuer/audience, CORS)
 * - Validate settings at startup (missing required vars fail the boot)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    /// Issuer domain, e.g. `dev-xyz.us.auth0.com`. The issuer URL and the
    /// JWKS endpoint are both derived from it.
    pub auth_domain: String,
    pub auth_audience: String,
    pub access_token_leeway_seconds: u64,

    /// Drop and recreate the drinks table on boot. Defaults to on in
    /// development (demo behavior inherited from the original deployment),
    /// off in production. `DB_RESET=true|false` overrides.
    pub db_reset: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_domain =
            std::env::var("AUTH_DOMAIN").map_err(|_| ConfigError::Missing("AUTH_DOMAIN"))?;

        let auth_audience =
            std::env::var("AUTH_AUDIENCE").map_err(|_| ConfigError::Missing("AUTH_AUDIENCE"))?;

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let db_reset = std::env::var("DB_RESET")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(!app_env.is_production());

        let config = Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            auth_domain,
            auth_audience,
            access_token_leeway_seconds,
            db_reset,
        };

        // Fail at boot rather than on the first protected request.
        config.jwks_url()?;

        Ok(config)
    }

    /// Expected `iss` claim. Trailing slash matters: issuers mint tokens with it.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.auth_domain)
    }

    pub fn jwks_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&format!(
            "https://{}/.well-known/jwks.json",
            self.auth_domain
        ))
        .map_err(|_| ConfigError::Invalid("AUTH_DOMAIN"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(domain: &str) -> Config {
        Config {
            addr: "0.0.0.0:8080".parse().unwrap(),
            database_url: String::new(),
            app_env: AppEnv::Development,
            cors_allowed_origins: vec![],
            auth_domain: domain.to_string(),
            auth_audience: "drinks".to_string(),
            access_token_leeway_seconds: 0,
            db_reset: false,
        }
    }

    #[test]
    fn issuer_carries_trailing_slash() {
        assert_eq!(config("tenant.example.com").issuer(), "https://tenant.example.com/");
    }

    #[test]
    fn jwks_url_points_at_well_known() {
        let url = config("tenant.example.com").jwks_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://tenant.example.com/.well-known/jwks.json"
        );
    }
}
