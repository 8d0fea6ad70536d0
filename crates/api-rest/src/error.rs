//! API error type and its HTTP mapping.
//!
//! Validation failures are 4xx and carry the validation message. Storage
//! failures are 5xx: the error is logged in full, the caller gets the
//! operation-level message without internal detail such as paths.

use annot_core::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

#[derive(Debug)]
pub enum ApiError {
    /// A required request parameter (the document name) is absent.
    MissingParameter(String),
    /// The uploaded MIME type is not allow-listed for the endpoint.
    UnsupportedType(String),
    /// The upload exceeds the endpoint's size limit.
    PayloadTooLarge(String),
    /// Any other malformed request (bad multipart, no file field).
    BadRequest(String),
    /// A storage operation failed.
    Storage(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::MissingParameter(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::UnsupportedType(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Storage(err) => {
                tracing::error!("storage error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
