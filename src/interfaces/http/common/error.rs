//! Domain error → HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Body of every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

pub type ApiResult<T> = Result<Json<T>, DomainError>;

/// Domain failures are all 400; only authentication and storage differ.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
