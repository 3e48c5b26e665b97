//! Error types for dpfa-web
//!
//! [`ApiError`] renders as a JSON error body; [`PageError`] wraps the same
//! error for HTML routes and renders an error page with the same status.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pages::layout::{escape_html, page};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// dpfa-common error
    #[error("{0}")]
    Common(#[from] dpfa_common::Error),
}

impl ApiError {
    /// HTTP status, machine-readable code and client-facing message
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        use dpfa_common::Error as CommonError;

        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
            ApiError::Common(CommonError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            ApiError::Common(CommonError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone())
            }
            // Query faults never leak driver detail to the client
            ApiError::Common(CommonError::Database(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database query failed".to_string(),
            ),
            ApiError::Common(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        }
    }

    fn log(&self, status: StatusCode) {
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = self.parts();
        self.log(status);

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTML page error
#[derive(Debug, Error)]
#[error(transparent)]
pub struct PageError(#[from] pub ApiError);

impl From<dpfa_common::Error> for PageError {
    fn from(err: dpfa_common::Error) -> Self {
        PageError(ApiError::Common(err))
    }
}

impl PageError {
    pub fn not_found(what: impl Into<String>) -> Self {
        PageError(ApiError::NotFound(what.into()))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, _, message) = self.0.parts();
        self.0.log(status);

        let heading = match status {
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::BAD_REQUEST => "Bad Request",
            _ => "Something went wrong",
        };
        let body = format!(
            "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to the archive</a></p>",
            heading,
            escape_html(&message)
        );

        (status, Html(page(heading, &body))).into_response()
    }
}

/// Result type for page handlers
pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_errors_map_by_variant() {
        let bad = ApiError::from(dpfa_common::Error::InvalidInput("blank".into()));
        assert_eq!(bad.parts().0, StatusCode::BAD_REQUEST);

        let missing = ApiError::from(dpfa_common::Error::NotFound("song 9".into()));
        assert_eq!(missing.parts().0, StatusCode::NOT_FOUND);

        let internal = ApiError::from(dpfa_common::Error::Internal("boom".into()));
        assert_eq!(internal.parts().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_detail_stays_in_logs() {
        let err = ApiError::from(dpfa_common::Error::Config(
            "Database not found: /srv/dpfa/archive.db".into(),
        ));
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
        assert!(!message.contains("/srv/dpfa"));
    }

    #[test]
    fn test_page_error_keeps_status() {
        let response = PageError::not_found("Video 7").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
