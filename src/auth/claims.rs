use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Verified JWT payload, exactly as the token carried it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    pub fn get(&self, claim: &str) -> Option<&Value> {
        self.0.get(claim)
    }

    fn get_str(&self, claim: &str) -> Option<&str> {
        self.0.get(claim).and_then(Value::as_str)
    }

    /// Subject (user ID)
    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }

    /// Cognito username
    pub fn username(&self) -> Option<&str> {
        self.get_str("cognito:username")
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

impl PartialEq<Value> for ClaimSet {
    fn eq(&self, other: &Value) -> bool {
        other.as_object() == Some(&self.0)
    }
}
