//! The single error-translation boundary at the transport edge.
//!
//! Every failure surfaces as a JSON body with a `detail` string and an HTTP
//! status. The retryable upstream case maps to 502; everything else is
//! 500-class. No raw remote payloads or backtraces ever reach the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use chatrelay_core::error::ProviderError;

/// Failures a handler can surface.
#[derive(Debug)]
pub enum ApiError {
    /// A provider-layer failure (construction or generation).
    Provider(ProviderError),
    /// A required local static resource is missing or unreadable. Surfaced
    /// as 500: a deployment precondition failed, not a routing miss.
    StaticAsset(String, std::io::Error),
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::Provider(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Provider(e) if e.is_retryable() => {
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            ApiError::Provider(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::StaticAsset(path, e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("static resource unavailable: {path}: {e}"),
            ),
        };

        error!(status = %status, detail = %detail, "request failed");

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}
