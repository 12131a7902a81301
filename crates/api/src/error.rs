//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use read_model::ReadModelError;

/// API-level error type that maps to HTTP responses.
///
/// Every variant renders as `{"detail": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be read as the expected JSON.
    Rejected(JsonRejection),
    /// Domain logic error.
    Domain(DomainError),
    /// Order history could not be assembled.
    ReadModel(ReadModelError),
    /// The store did not answer a readiness query.
    StoreUnavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Rejected(rejection) => (rejection.status(), rejection.body_text()),
            ApiError::Domain(err) => domain_error_to_response(err),
            ApiError::ReadModel(err) => {
                tracing::error!(error = %err, "failed to list orders");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::StoreUnavailable => {
                tracing::warn!("store failed readiness check");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Store is unavailable.".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "detail": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    if err.is_input_error() {
        return (StatusCode::BAD_REQUEST, err.to_string());
    }
    tracing::error!(error = %err, "internal server error");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<ReadModelError> for ApiError {
    fn from(err: ReadModelError) -> Self {
        ApiError::ReadModel(err)
    }
}
