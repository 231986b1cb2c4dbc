//! # HTTP Errors
//!
//! Maps subsystem errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::executor::ExecutionError;
use crate::search::SearchError;

/// Result type for handlers
pub type HttpResult<T> = Result<T, HttpError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum HttpError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request rejected before planning
    #[error("{}", .0.message())]
    Search(#[from] SearchError),

    // ==================
    // Upstream Errors (5xx)
    // ==================
    /// Search engine call failed
    #[error("{0}")]
    Execution(#[from] ExecutionError),

    /// Index lifecycle operation failed
    #[error("{0}")]
    Catalog(#[from] CatalogError),
}

impl HttpError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        let status = match self {
            HttpError::Search(e) => e.status_code(),
            HttpError::Execution(e) => e.status_code(),
            HttpError::Catalog(e) => e.status_code(),
        };
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            HttpError::Search(e) => e.code().code(),
            HttpError::Execution(e) => e.code(),
            HttpError::Catalog(e) => e.code(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<&HttpError> for ErrorResponse {
    fn from(err: &HttpError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code().to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let rejected = HttpError::from(SearchError::unsupported_filter_kind("prefix", "brand"));
        assert_eq!(rejected.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(rejected.code(), "SHOP_UNSUPPORTED_FILTER_KIND");

        let upstream = HttpError::from(ExecutionError::EngineStatus {
            status: 503,
            body: "unavailable".into(),
        });
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.code(), "SHOP_ENGINE_REJECTED");
    }

    #[test]
    fn test_error_body() {
        let err = HttpError::from(SearchError::invalid_filter("price", "missing bounds"));
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, "SHOP_INVALID_FILTER");
        assert!(body.error.contains("price"));
    }
}
