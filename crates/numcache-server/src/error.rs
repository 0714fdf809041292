use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Request failures, each rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid number category")]
    InvalidCategory(String),

    #[error("Authentication failure")]
    Authentication,

    #[error("Failed to retrieve numbers from API")]
    NumbersUnavailable,

    #[error("{0}")]
    BadRequest(&'static str),

    /// Read-through request failed; carries the client-facing message.
    #[error("{0}")]
    ReadThrough(&'static str),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidCategory(_) | ServerError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::NumbersUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Authentication | ServerError::ReadThrough(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<numcache_core::Error> for ServerError {
    fn from(err: numcache_core::Error) -> Self {
        match err {
            numcache_core::Error::InvalidCategory(code) => ServerError::InvalidCategory(code),
            numcache_core::Error::Authentication(_) => ServerError::Authentication,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numcache_core::ApiError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::InvalidCategory("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServerError::Authentication.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ServerError::NumbersUnavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ServerError::ReadThrough("Could not fetch users.").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_core_errors_convert() {
        let err: ServerError = numcache_core::Error::Authentication(ApiError::InvalidResponse("no token".to_string())).into();
        assert!(matches!(err, ServerError::Authentication));

        let err: ServerError = numcache_core::Error::InvalidCategory("z".to_string()).into();
        assert_eq!(err.to_string(), "Invalid number category");
    }

    #[test]
    fn test_into_response_status() {
        let response = ServerError::NumbersUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
