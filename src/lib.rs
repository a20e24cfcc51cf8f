//! Shared helpers for Cognito-protected, DynamoDB-backed handlers.
//!
//! - [`auth`]: bearer token verification against a user pool's JWKS
//! - [`dynamodb`]: pagination cursors and record/item conversion
//! - [`api`]: response envelopes

pub mod api;
pub mod auth;
pub mod config;
pub mod dynamodb;
pub mod error;
pub mod logging;

pub use auth::{ClaimSet, KeySet, KeySetResolver, RequireAuth, TokenVerifier};
pub use config::{CognitoConfig, CognitoOverrides, Environment, Settings};
pub use error::{
    AuthError, ConfigError, FetchError, FormatError, ResolveError, ValidationError, VerifyError,
};

/// Build a verifier from process settings.
pub fn verifier_from_settings(settings: &Settings) -> Result<TokenVerifier, FetchError> {
    let resolver =
        KeySetResolver::new(std::time::Duration::from_secs(settings.jwks_timeout_seconds))?;
    Ok(TokenVerifier::new(resolver, settings.cognito.clone()))
}
