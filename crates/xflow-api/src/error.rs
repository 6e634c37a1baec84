//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use xflow_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Wrapper so the orphan rule lets handlers return `AppError` directly.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = match err.kind {
            ErrorKind::AlreadyRegistered => (StatusCode::CONFLICT, "ALREADY_REGISTERED"),
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::StoreUnavailable => {
                tracing::error!(error = %err.message, "Store unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
            }
            ErrorKind::DigestUnavailable
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(error = %err.message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type returned by handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, ApiErrorResponse) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_store_outage_is_service_unavailable() {
        let (status, body) = render(AppError::store_unavailable("Redis error: connection refused")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error, "STORE_UNAVAILABLE");
        assert_eq!(body.message, "Redis error: connection refused");
    }

    #[tokio::test]
    async fn test_status_per_kind() {
        assert_eq!(
            render(AppError::already_registered("dup")).await.0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            render(AppError::validation("bad queue")).await.0,
            StatusCode::BAD_REQUEST
        );
        let (status, body) = render(AppError::digest_unavailable("md5")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "INTERNAL_ERROR");
    }
}
