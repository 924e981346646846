//! Response envelope and error-to-status mapping.
//!
//! Every response body is the uniform `{ "message": ..., "data": ... }`
//! envelope; the `data` key is omitted when there is no payload. Validation
//! and not-found conditions terminate the request with their own statuses;
//! everything else lands on the single 500 recovery boundary.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use thiserror::Error;

use sakila_core::DomainError;
use sakila_store::StoreError;

/// Build an envelope response.
pub fn respond(status: StatusCode, message: impl Into<String>, data: Option<Value>) -> Response {
    let mut body = serde_json::Map::new();
    body.insert("message".to_string(), Value::String(message.into()));
    if let Some(data) = data {
        body.insert("data".to_string(), data);
    }
    (status, Json(Value::Object(body))).into_response()
}

/// Request failure, carrying the message surfaced to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not valid JSON.
    #[error("Invalid JSON body")]
    MalformedBody,

    /// Missing/blank required field, bad email format, unparseable id.
    #[error("{0}")]
    Validation(String),

    /// Business-rule conflict (email already in use).
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Delete refused because dependent records exist.
    #[error("{0}")]
    Integrity(String),

    /// Storage or other unexpected failure.
    #[error("{0}")]
    Storage(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn integrity(msg: impl Into<String>) -> Self {
        Self::Integrity(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::Conflict(msg) => Self::Conflict(msg),
            DomainError::NotFound => Self::NotFound("not found".to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Storage(format!("Internal server error: {err}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        Self::MalformedBody
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MalformedBody
            | Self::Validation(_)
            | Self::Conflict(_)
            | Self::Integrity(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        respond(status, self.to_string(), None)
    }
}
