use crate::error::{OrderError, StoreError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// JSON body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Set on catalog listings served from the built-in substitute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_substitute: Option<bool>,
    /// Set on order listings read while the primary store was unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            is_substitute: None,
            degraded: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> Envelope<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            count: Some(items.len()),
            ..Self::data(items)
        }
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            is_substitute: None,
            degraded: None,
            data: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Admin token required")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(_) => {
                ApiError::Unavailable("Primary store is unavailable, try again later".to_string())
            }
            StoreError::Validation(msg) => ApiError::BadRequest(msg),
            StoreError::NotFound(id) => ApiError::NotFound(format!("Not found: {}", id)),
            StoreError::Duplicate(_) => ApiError::BadRequest(e.to_string()),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::ValidationError(msg) => ApiError::BadRequest(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, error = %self, "Request failed");
        } else {
            warn!(%status, error = %self, "Request rejected");
        }
        let body = Envelope::<()> {
            success: false,
            message: Some(self.to_string()),
            count: None,
            is_substitute: None,
            degraded: None,
            data: None,
        };
        (status, Json(body)).into_response()
    }
}
