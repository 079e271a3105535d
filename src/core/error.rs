// Centralized error handling for the user API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("Corrupt user record {id}: {reason}")]
    Corrupt { id: i64, reason: String },
}

/// Errors raised by business operations
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}

/// Outcome of a denied authorization check
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Caller is not permitted to perform this operation")]
    Forbidden,
}

/// Errors surfaced by HTTP handlers. The only place kinds become status codes.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable")]
    StorageUnavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

impl From<AccessDenied> for ApiError {
    fn from(denied: AccessDenied) -> Self {
        match denied {
            AccessDenied::Unauthenticated => ApiError::Unauthenticated,
            AccessDenied::Forbidden => ApiError::Forbidden,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e) => ApiError::StorageUnavailable(e.to_string()),
            ServiceError::PasswordHash(e) => ApiError::Internal(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use crate::models::payload::ErrorResponse;

        let status = self.status();

        // Internal details stay in the logs, not in the body
        let error_message = match &self {
            ApiError::StorageUnavailable(detail) | ApiError::Internal(detail) => {
                tracing::warn!(error = %detail, "Request failed");
                self.to_string()
            }
            _ => self.to_string(),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: error_message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::StorageUnavailable("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Internal("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_access_denied_mapping() {
        assert!(matches!(
            ApiError::from(AccessDenied::Unauthenticated),
            ApiError::Unauthenticated
        ));
        assert!(matches!(ApiError::from(AccessDenied::Forbidden), ApiError::Forbidden));
    }

    #[test]
    fn test_store_error_maps_to_storage_unavailable() {
        let err = ServiceError::from(StoreError::Unavailable(sqlx::Error::PoolClosed));
        let api = ApiError::from(err);

        assert!(matches!(api, ApiError::StorageUnavailable(_)));
        assert_eq!(api.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_hash_error_maps_to_internal() {
        let api = ApiError::from(ServiceError::PasswordHash("salt".into()));
        assert!(matches!(api, ApiError::Internal(_)));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_storage_failure_logged_as_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();

        let response = tracing::subscriber::with_default(subscriber, || {
            ApiError::StorageUnavailable("disk I/O error".into()).into_response()
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "logs: {}", output);
        assert!(!output.contains("ERROR"), "logs: {}", output);
        assert!(output.contains("disk I/O error"));
    }
}
