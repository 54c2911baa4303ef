/*
 * Responsibility
 * - Bearer token verification against the issuer's signing-key directory
 * - Permission checks over decoded claims
 */
pub mod claims;
pub mod error;
pub mod keys;
pub mod service;

pub use claims::Claims;
pub use error::AuthError;
pub use keys::{Jwks, KeySource, RemoteKeys, StaticKeys};
pub use service::AuthService;
