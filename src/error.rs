//! Error taxonomy for token verification and the store helpers
//!
//! Each failure family gets its own type; `VerifyError` is the classified
//! result of a verification and knows how to render itself as a response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Required provider configuration is missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{} environment variable or {} parameter is required", env_var(.0), .0)]
    MissingField(&'static str),
}

impl ConfigError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
        }
    }
}

fn env_var(field: &str) -> &'static str {
    match field {
        "user_pool_id" => "COGNITO_USER_POOL_ID",
        "app_client_id" => "COGNITO_APP_CLIENT_ID",
        "region" => "COGNITO_REGION",
        _ => "COGNITO_*",
    }
}

/// The key set could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Invalid JWKS URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to fetch JWKS")]
    Transport(#[source] reqwest::Error),

    #[error("JWKS fetch failed with status: {0}")]
    Status(u16),

    #[error("Failed to parse JWKS")]
    Decode(#[source] reqwest::Error),
}

/// Failure of the key set resolver.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Authentication failure. Messages are deliberately generic; the concrete
/// cause is only ever logged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format")]
    MalformedHeader,

    #[error("Invalid token")]
    UnknownKey,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token validation failed")]
    ValidationFailed,
}

/// Classified outcome of a failed verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl From<ResolveError> for VerifyError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Config(e) => Self::Config(e),
            ResolveError::Fetch(e) => Self::Fetch(e),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl VerifyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Config(_) | Self::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(_) => "UNAUTHORIZED",
            Self::Config(_) => "CONFIGURATION_ERROR",
            Self::Fetch(_) => "JWKS_UNAVAILABLE",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Auth(e) => e.to_string(),
            // Don't leak internal error details
            Self::Config(_) | Self::Fetch(_) => "An internal error occurred".to_string(),
        }
    }

    pub fn as_auth(&self) -> Option<AuthError> {
        match self {
            Self::Auth(e) => Some(*e),
            _ => None,
        }
    }
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        match &self {
            Self::Config(e) => {
                tracing::error!(error = %e, "Cognito configuration error");
            }
            Self::Fetch(e) => {
                tracing::error!(error = ?e, "JWKS retrieval failed");
            }
            Self::Auth(_) => {}
        }

        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// A pagination token could not be decoded.
#[derive(Debug, Error)]
#[error("Invalid pagination token: {reason}")]
pub struct FormatError {
    reason: String,
}

impl FormatError {
    pub(crate) fn new(reason: impl std::fmt::Display) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

/// A record and a store item disagree on shape.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Record does not serialize to an object")]
    NotAnObject,

    #[error("Item does not match schema: {0}")]
    Schema(#[from] serde_json::Error),
}
