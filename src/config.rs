use std::env;

use crate::error::ConfigError;

/// Region used when neither the caller nor `COGNITO_REGION` supplies one.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Timeout applied to JWKS retrieval unless overridden.
pub const DEFAULT_JWKS_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

/// Cognito user pool parameters used to verify tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CognitoConfig {
    pub region: String,
    pub user_pool_id: String,
    pub app_client_id: String,
}

/// Per-call overrides. Any field left `None` (or empty) falls back to the
/// process defaults.
#[derive(Debug, Clone, Default)]
pub struct CognitoOverrides {
    pub region: Option<String>,
    pub user_pool_id: Option<String>,
    pub app_client_id: Option<String>,
}

impl CognitoOverrides {
    pub fn new(
        region: impl Into<String>,
        user_pool_id: impl Into<String>,
        app_client_id: impl Into<String>,
    ) -> Self {
        Self {
            region: Some(region.into()),
            user_pool_id: Some(user_pool_id.into()),
            app_client_id: Some(app_client_id.into()),
        }
    }
}

impl Default for CognitoConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            user_pool_id: String::new(),
            app_client_id: String::new(),
        }
    }
}

impl CognitoConfig {
    /// Read `COGNITO_REGION`, `COGNITO_USER_POOL_ID` and
    /// `COGNITO_APP_CLIENT_ID`. Missing values are left empty; they are only
    /// rejected once a verification actually needs them.
    pub fn from_env() -> Self {
        let region = env::var("COGNITO_REGION")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let user_pool_id = env::var("COGNITO_USER_POOL_ID").unwrap_or_default();
        let app_client_id = env::var("COGNITO_APP_CLIENT_ID").unwrap_or_default();

        Self {
            region,
            user_pool_id,
            app_client_id,
        }
    }

    /// Apply per-call overrides on top of these defaults. Explicit values win.
    pub fn resolve(&self, overrides: &CognitoOverrides) -> Self {
        fn pick(explicit: &Option<String>, fallback: &str) -> String {
            match explicit.as_deref() {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => fallback.to_string(),
            }
        }

        let region = pick(&overrides.region, &self.region);
        Self {
            region: if region.is_empty() {
                DEFAULT_REGION.to_string()
            } else {
                region
            },
            user_pool_id: pick(&overrides.user_pool_id, &self.user_pool_id),
            app_client_id: pick(&overrides.app_client_id, &self.app_client_id),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_pool_id.is_empty() {
            return Err(ConfigError::MissingField("user_pool_id"));
        }
        if self.app_client_id.is_empty() {
            return Err(ConfigError::MissingField("app_client_id"));
        }
        Ok(())
    }

    /// Expected `iss` claim for tokens minted by this user pool
    pub fn issuer(&self) -> String {
        issuer_for(&self.region, &self.user_pool_id)
    }

    pub fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer())
    }
}

pub fn issuer_for(region: &str, user_pool_id: &str) -> String {
    format!(
        "https://cognito-idp.{}.amazonaws.com/{}",
        region, user_pool_id
    )
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,

    // Cognito
    pub cognito: CognitoConfig,
    pub jwks_timeout_seconds: u64,
}

impl Settings {
    /// Load `.env` (if present) and then read settings from the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));

        let cognito = CognitoConfig::from_env();
        let jwks_timeout_seconds = env::var("COGNITO_JWKS_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_JWKS_TIMEOUT_SECONDS);

        Settings {
            env,
            cognito,
            jwks_timeout_seconds,
        }
    }
}
