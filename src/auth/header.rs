//! Authorization header lookup and bearer parsing

use axum::http::{header::AUTHORIZATION, HeaderMap};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::error::AuthError;

/// Anything that can hand over the raw `Authorization` header of a request.
pub trait AuthorizationSource {
    fn authorization(&self) -> Option<&str>;
}

impl AuthorizationSource for HeaderMap {
    fn authorization(&self) -> Option<&str> {
        self.get(AUTHORIZATION)?.to_str().ok()
    }
}

impl AuthorizationSource for HashMap<String, String> {
    fn authorization(&self) -> Option<&str> {
        self.get("authorization")
            .filter(|value| !value.is_empty())
            .or_else(|| self.get("Authorization"))
            .map(String::as_str)
    }
}

impl AuthorizationSource for BTreeMap<String, String> {
    fn authorization(&self) -> Option<&str> {
        self.get("authorization")
            .filter(|value| !value.is_empty())
            .or_else(|| self.get("Authorization"))
            .map(String::as_str)
    }
}

/// API Gateway style event: `{"headers": {"Authorization": "..."}}`
impl AuthorizationSource for Value {
    fn authorization(&self) -> Option<&str> {
        let headers = self.get("headers")?;
        headers
            .get("authorization")
            .filter(|value| value.as_str().map_or(false, |v| !v.is_empty()))
            .or_else(|| headers.get("Authorization"))
            .and_then(Value::as_str)
    }
}

impl<T: AuthorizationSource + ?Sized> AuthorizationSource for &T {
    fn authorization(&self) -> Option<&str> {
        (**self).authorization()
    }
}

/// Split `Bearer <token>` into its token.
///
/// Requires exactly two whitespace separated parts, the first being
/// `bearer` in any case.
pub fn extract_bearer(header: &str) -> Result<&str, AuthError> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}
