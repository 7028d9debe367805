use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use sea_orm::SqlErr;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use service::ServiceError;

/// Error body returned by every API route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub error: &'static str,
    pub message: String,
    pub path: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
    pub path: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self { status, error, message: message.into(), path: path.into() }
    }

    /// Status mapping: absent row 404, bad input 400, constraint violation 409, rest 500.
    pub fn from_service(err: ServiceError, path: &str) -> Self {
        let (status, kind) = match &err {
            ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, "EntityNotFound"),
            ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "ValidationError"),
            ServiceError::Db(db) => match db.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) | Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    (StatusCode::CONFLICT, "DataIntegrityViolation")
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "DatabaseError"),
            },
        };
        if status.is_server_error() {
            error!(code = err.code(), error = %err, path, "request failed");
        } else {
            warn!(code = err.code(), error = %err, path, "request rejected");
        }
        Self::new(status, kind, err.to_string(), path)
    }

    /// `map_err` adapter that records the request path.
    pub fn at(uri: &Uri) -> impl FnOnce(ServiceError) -> ApiError {
        let path = uri.path().to_string();
        move |err| ApiError::from_service(err, &path)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            timestamp: Utc::now(),
            status: self.status.as_u16().to_string(),
            error: self.error,
            message: self.message,
            path: self.path,
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn not_found_maps_to_404() {
        let e = ApiError::from_service(ServiceError::not_found("Course", 3), "/api/v1/courses/3");
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, "Course with ID 3 not found");
        assert_eq!(e.path, "/api/v1/courses/3");
    }

    #[test]
    fn validation_maps_to_400() {
        let e = ApiError::from_service(ServiceError::Validation("title must not be blank".into()), "/x");
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn opaque_store_error_maps_to_500() {
        let e = ApiError::from_service(ServiceError::Db(DbErr::Custom("boom".into())), "/x");
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(e.message.contains("boom"));
    }
}
