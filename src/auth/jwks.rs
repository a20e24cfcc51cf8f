//! JWKS retrieval and caching for Cognito user pools

use jsonwebtoken::DecodingKey;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::error::{ConfigError, FetchError, ResolveError};

/// JWKS response structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    pub keys: Vec<Jwk>,
}

impl KeySet {
    /// First key whose `kid` matches. Uniqueness is not enforced.
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|jwk| jwk.kid == kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Individual JWK key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kid: String,
    #[serde(default)]
    pub kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    /// RSA modulus (base64url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// RSA exponent (base64url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
}

#[derive(Debug, Error)]
pub enum KeyMaterialError {
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("RSA key missing '{0}'")]
    MissingComponent(&'static str),

    #[error("Failed to create RSA DecodingKey: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

impl Jwk {
    pub fn decoding_key(&self) -> Result<DecodingKey, KeyMaterialError> {
        if self.kty != "RSA" {
            return Err(KeyMaterialError::UnsupportedKeyType(self.kty.clone()));
        }

        let n = self.n.as_deref().ok_or(KeyMaterialError::MissingComponent("n"))?;
        let e = self.e.as_deref().ok_or(KeyMaterialError::MissingComponent("e"))?;

        Ok(DecodingKey::from_rsa_components(n, e)?)
    }
}

struct CachedKeySet {
    keys: Arc<KeySet>,
    region: String,
    user_pool_id: String,
}

/// Lazily populated JWKS cache.
///
/// The first successful fetch is kept for the lifetime of the resolver and
/// served for every later call, whatever pool it names. Clones share the
/// same cache.
#[derive(Clone)]
pub struct KeySetResolver {
    inner: Arc<RwLock<Option<CachedKeySet>>>,
    http_client: reqwest::Client,
    base_url: Option<String>,
}

impl KeySetResolver {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            inner: Arc::new(RwLock::new(None)),
            http_client,
            base_url: None,
        })
    }

    /// Fetch keys from `{base_url}/{user_pool_id}/.well-known/jwks.json`
    /// instead of the regional Cognito host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn jwks_url(&self, region: &str, user_pool_id: &str) -> Result<Url, FetchError> {
        let base = match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://cognito-idp.{}.amazonaws.com", region),
        };

        Ok(Url::parse(&format!(
            "{}/{}/.well-known/jwks.json",
            base, user_pool_id
        ))?)
    }

    /// Return the cached key set, fetching it on first use.
    pub async fn resolve(
        &self,
        region: &str,
        user_pool_id: &str,
    ) -> Result<Arc<KeySet>, ResolveError> {
        if user_pool_id.is_empty() {
            return Err(ConfigError::MissingField("user_pool_id").into());
        }

        {
            let cache = self.inner.read();
            if let Some(cached) = cache.as_ref() {
                if cached.region != region || cached.user_pool_id != user_pool_id {
                    tracing::warn!(
                        cached_region = %cached.region,
                        cached_user_pool_id = %cached.user_pool_id,
                        region = %region,
                        user_pool_id = %user_pool_id,
                        "Serving JWKS cached for a different user pool"
                    );
                }
                return Ok(cached.keys.clone());
            }
        }

        let keys = Arc::new(self.fetch(region, user_pool_id).await?);

        // Concurrent first calls may both get here; last writer wins.
        *self.inner.write() = Some(CachedKeySet {
            keys: keys.clone(),
            region: region.to_string(),
            user_pool_id: user_pool_id.to_string(),
        });

        tracing::info!(key_count = keys.len(), "JWKS cache populated");
        Ok(keys)
    }

    async fn fetch(&self, region: &str, user_pool_id: &str) -> Result<KeySet, FetchError> {
        let url = self.jwks_url(region, user_pool_id)?;
        tracing::info!(url = %url, "Fetching JWKS");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response.json().await.map_err(FetchError::Decode)
    }

    pub fn is_cached(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Drop the cached key set so the next call fetches again.
    pub fn clear(&self) {
        self.inner.write().take();
    }
}

impl std::fmt::Debug for KeySetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySetResolver")
            .field("base_url", &self.base_url)
            .field("cached", &self.is_cached())
            .finish()
    }
}
