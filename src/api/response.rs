//! Standard API response types
//!
//! Two envelope styles are in use across services: a status-code style
//! (`status` + `data`/`error`) and a success-boolean style (`success` +
//! `data`/`error` + `message`). Both serialize every field, null included.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Generic API response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: Option<u16>,
    pub success: Option<bool>,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl<T> Default for ApiResponse<T> {
    fn default() -> Self {
        Self {
            status: None,
            success: None,
            data: None,
            error: None,
            message: None,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Status-code pattern with data
    pub fn with_status(status: u16, data: T) -> Self {
        Self {
            status: Some(status),
            data: Some(data),
            ..Self::default()
        }
    }

    /// Status-code pattern with an error
    pub fn status_error(status: u16, error: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Success-boolean pattern with data
    pub fn ok(data: T) -> Self {
        Self {
            success: Some(true),
            data: Some(data),
            ..Self::default()
        }
    }

    /// Success-boolean pattern with an error
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = match self.status {
            Some(code) => StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            None => StatusCode::OK,
        };

        (status, Json(self)).into_response()
    }
}

/// Paginated list response; `next_token` is an opaque cursor for the next page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub count: usize,
    pub next_token: Option<String>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self {
            count: items.len(),
            items,
            next_token,
        }
    }

    /// Build the page from a query's `LastEvaluatedKey`.
    pub fn from_last_key(
        items: Vec<T>,
        last_key: Option<&serde_json::Map<String, serde_json::Value>>,
    ) -> Self {
        Self::new(
            items,
            last_key.map(crate::dynamodb::encode_pagination_token),
        )
    }

    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}

impl<T: Serialize> IntoResponse for PaginatedResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
