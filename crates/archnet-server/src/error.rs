//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use archnet_core::ArchError;

/// Wrapper turning `ArchError` into an HTTP response. Handlers return
/// `Result<_, AppError>` and use `?` throughout.
pub struct AppError(pub ArchError);

impl From<ArchError> for AppError {
    fn from(err: ArchError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ArchError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ArchError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            ArchError::Forbidden(_) => (StatusCode::FORBIDDEN, self.0.to_string()),
            ArchError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            ArchError::Conflict(_) => (StatusCode::CONFLICT, self.0.to_string()),
            ArchError::Database(_) | ArchError::Internal(_) => {
                // detail stays server-side
                tracing::error!("request failed: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
