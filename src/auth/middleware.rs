use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::sync::Arc;

use super::{ClaimSet, TokenVerifier};
use crate::config::CognitoOverrides;
use crate::error::VerifyError;

/// Extractor that requires a valid Cognito token.
///
/// The router state must provide an `Arc<TokenVerifier>` through `FromRef`.
///
/// Example:
/// ```ignore
/// async fn protected_route(auth: RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}", auth.username().unwrap_or("anonymous"))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub ClaimSet);

impl std::ops::Deref for RequireAuth {
    type Target = ClaimSet;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
    Arc<TokenVerifier>: FromRef<S>,
{
    type Rejection = VerifyError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verifier = Arc::<TokenVerifier>::from_ref(state);
        let claims = verifier
            .verify(&parts.headers, &CognitoOverrides::default())
            .await?;

        Ok(RequireAuth(claims))
    }
}
