use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use iamview_core::AppError;
use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    /// Stable category the console switches on.
    code: &'static str,
    message: String,
}

/// HTTP API error wrapper around core application errors.
///
/// * `Validation`: malformed aggregation payloads, blank action ids, paste
///   across resource types, bad configuration values.
/// * `NotFound`: unknown route tokens in paths, request positions outside
///   the submitted aggregation list.
/// * `Conflict`: paste into a group that does not accept it.
/// * `Internal`: anything the console cannot act on.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                code,
                message: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
