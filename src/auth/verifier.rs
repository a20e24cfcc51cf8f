//! Cognito bearer token verification

use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde_json::{Map, Value};

use super::header::{extract_bearer, AuthorizationSource};
use super::{ClaimSet, KeySetResolver};
use crate::config::{CognitoConfig, CognitoOverrides};
use crate::error::{AuthError, VerifyError};

/// Verifies Cognito-issued JWTs against the user pool's published keys.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    resolver: KeySetResolver,
    defaults: CognitoConfig,
}

impl TokenVerifier {
    pub fn new(resolver: KeySetResolver, defaults: CognitoConfig) -> Self {
        Self { resolver, defaults }
    }

    pub fn resolver(&self) -> &KeySetResolver {
        &self.resolver
    }

    pub fn defaults(&self) -> &CognitoConfig {
        &self.defaults
    }

    /// Verify the bearer token carried by `headers` and return its claims.
    ///
    /// Configuration problems surface as [`VerifyError::Config`], JWKS
    /// retrieval problems as [`VerifyError::Fetch`], everything else as
    /// [`VerifyError::Auth`].
    pub async fn verify<H>(
        &self,
        headers: &H,
        overrides: &CognitoOverrides,
    ) -> Result<ClaimSet, VerifyError>
    where
        H: AuthorizationSource + ?Sized,
    {
        let auth_header = headers
            .authorization()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                tracing::warn!("Missing Authorization header");
                AuthError::MissingHeader
            })?;

        let token = extract_bearer(auth_header).map_err(|e| {
            tracing::warn!("Invalid Authorization header format");
            e
        })?;

        let config = self.defaults.resolve(overrides);
        config.validate()?;

        self.verify_token(token, &config).await
    }

    /// Verify a bare token (no header parsing) against `config`.
    pub async fn verify_token(
        &self,
        token: &str,
        config: &CognitoConfig,
    ) -> Result<ClaimSet, VerifyError> {
        config.validate()?;

        let key_set = self
            .resolver
            .resolve(&config.region, &config.user_pool_id)
            .await?;

        // Unverified header read, used only to pick the key
        let header = decode_header(token).map_err(|e| {
            tracing::warn!(error = %e, "JWT validation failed");
            AuthError::InvalidToken
        })?;

        let kid = header.kid.unwrap_or_default();
        let jwk = key_set.find(&kid).filter(|_| !kid.is_empty()).ok_or_else(|| {
            tracing::warn!(kid = %kid, "Public key not found for kid");
            AuthError::UnknownKey
        })?;

        let decoding_key = jwk.decoding_key().map_err(|e| {
            tracing::error!(kid = %kid, error = %e, "Unexpected error during token validation");
            AuthError::ValidationFailed
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[config.issuer()]);
        validation.set_audience(&[&config.app_client_id]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        let token_data =
            decode::<Map<String, Value>>(token, &decoding_key, &validation).map_err(|e| {
                tracing::warn!(error = %e, "JWT validation failed");
                AuthError::InvalidToken
            })?;

        let claims = ClaimSet::from(token_data.claims);
        tracing::info!(
            username = claims.username().unwrap_or_default(),
            "Token validated"
        );

        Ok(claims)
    }
}
