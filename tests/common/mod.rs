//! Shared fixtures for integration tests: a mock JWKS endpoint, a fixed RSA
//! signing key and token minting helpers.

#![allow(dead_code)]

use cognito_common::{CognitoConfig, CognitoOverrides, KeySetResolver, TokenVerifier};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Map, Value};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const REGION: &str = "us-west-2";
pub const USER_POOL_ID: &str = "us-west-2_TestPool";
pub const APP_CLIENT_ID: &str = "test-client";
pub const KID: &str = "test-kid";

/// Private half of the key published under [`KID`]
pub const SIGNING_KEY_PEM: &[u8] = include_bytes!("../fixtures/signing_key.pem");

/// A key that is never published
pub const ROGUE_KEY_PEM: &[u8] = include_bytes!("../fixtures/rogue_key.pem");

/// Base64url modulus of [`SIGNING_KEY_PEM`]
pub const SIGNING_KEY_N: &str = "k1kx1t3LGrn4laVu29YfcQ9vAmYUhO_5Tpvaw966mGICGvu7KLEv9gh8khUKPC_9kx1gjA-B9T1L9LvWI48Iy_JOUVum4usbW_67cqhNzN8byOtW_NqzecyOC_0fPWbkLY1vQhy65JruFa3PkUB8YUAVMdUSckTzQneXwlnK9QW2nEeSS6DeVRPAfrlJHjVEtvE509FTR9mpoMegjzZhUd73yi7zCdqZ7lA6RRokq3-MC7uN9_zYDiG15_RfJJdM15S8krXVAOWeYf-PTRIF6GEFPwDn6Brqs-faWxdgVQfcJDo8fsbv0-OEjFflKvMpMlt9L3bD_b59DbOAz3tldw";

pub fn jwk(kid: &str) -> Value {
    json!({
        "kid": kid,
        "kty": "RSA",
        "alg": "RS256",
        "use": "sig",
        "n": SIGNING_KEY_N,
        "e": "AQAB",
    })
}

pub struct MockJwks {
    pub server: MockServer,
}

impl MockJwks {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn jwks_path(user_pool_id: &str) -> String {
        format!("/{}/.well-known/jwks.json", user_pool_id)
    }

    /// Serve `keys` for `USER_POOL_ID`, expecting exactly `calls` fetches.
    pub async fn serve_keys(&self, keys: Vec<Value>, calls: u64) {
        Mock::given(method("GET"))
            .and(path(Self::jwks_path(USER_POOL_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "keys": keys })))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    pub async fn serve_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(Self::jwks_path(USER_POOL_ID)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub fn resolver(&self) -> KeySetResolver {
        KeySetResolver::new(Duration::from_secs(10))
            .expect("Failed to build resolver")
            .with_base_url(self.server.uri())
    }

    /// Verifier with no process defaults; every call passes overrides.
    pub fn verifier(&self) -> TokenVerifier {
        TokenVerifier::new(self.resolver(), CognitoConfig::default())
    }
}

pub fn overrides() -> CognitoOverrides {
    CognitoOverrides::new(REGION, USER_POOL_ID, APP_CLIENT_ID)
}

pub fn issuer() -> String {
    format!("https://cognito-idp.{}.amazonaws.com/{}", REGION, USER_POOL_ID)
}

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs() as i64
}

/// Claims of a Cognito ID token for user-123 / alice
pub fn id_token_claims(exp_offset_secs: i64) -> Map<String, Value> {
    let now = current_timestamp();
    json!({
        "sub": "user-123",
        "cognito:username": "alice",
        "email": "alice@example.com",
        "iss": issuer(),
        "aud": APP_CLIENT_ID,
        "token_use": "id",
        "iat": now,
        "exp": now + exp_offset_secs,
    })
    .as_object()
    .cloned()
    .expect("claims are an object")
}

pub fn mint(kid: Option<&str>, claims: &Map<String, Value>, pem: &[u8]) -> String {
    let key = EncodingKey::from_rsa_pem(pem).expect("Invalid RSA key");
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);

    encode(&header, claims, &key).expect("Failed to encode test JWT")
}

pub fn mint_valid(claims: &Map<String, Value>) -> String {
    mint(Some(KID), claims, SIGNING_KEY_PEM)
}

pub fn bearer_headers(token: &str) -> std::collections::HashMap<String, String> {
    [("Authorization".to_string(), format!("Bearer {}", token))].into()
}
