//! The HTTP error envelope.
//!
//! Every application error leaves the service in the same shape:
//!
//! ```json
//! { "message": "...", "statusCode": 404, "timestamp": "..." }
//! ```
//!
//! The mapping is flat: NotFound is 404, every other application error
//! is 400, store failures are 500.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;
use tracing::error;

use fintrack_shared::AppError;

/// Builds the error envelope response for an application error.
///
/// Store-level failures are logged here; client errors are not.
pub fn error_response(err: &AppError) -> Response {
    let status_code = err.status_code();
    let status =
        StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %err, "Request failed with a store error");
    }

    (
        status,
        Json(json!({
            "message": err.message(),
            "statusCode": status_code,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}
