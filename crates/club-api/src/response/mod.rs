//! Response types and error handling for API endpoints
//!
//! Every failure renders as `{"error": {"code", "message", "details"?}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use club_common::{AppError, ErrorResponse};
use club_core::DomainError;
use club_service::ServiceError;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl ApiError {
    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => status_from(e.status_code()),
            Self::Service(e) => status_from(e.status_code()),
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Stable error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            Self::InvalidBody(_) => "INVALID_BODY",
        }
    }

    /// Structured context clients can act on without parsing the message
    fn details(&self) -> Option<Value> {
        match self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            Self::Service(ServiceError::Domain(e)) | Self::App(AppError::Domain(e)) => {
                domain_details(e)
            }
            _ => None,
        }
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

fn domain_details(err: &DomainError) -> Option<Value> {
    match err {
        DomainError::MonthlyLimitReached { kind, month } => Some(json!({
            "activity_type": kind,
            "month": month.to_string(),
        })),
        DomainError::InsufficientStock {
            available,
            requested,
        } => Some(json!({ "available": available, "requested": requested })),
        DomainError::ActivityAlreadyReviewed(status) | DomainError::ComandaNotOpen(status) => {
            Some(json!({ "status": status }))
        }
        _ => None,
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let body = ErrorBody {
            error: ErrorResponse {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use club_core::YearMonth;
    use uuid::Uuid;

    use super::*;

    fn service(err: DomainError) -> ApiError {
        ApiError::Service(ServiceError::from(err))
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::invalid_path("bad id").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::invalid_body("expected a date").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            service(DomainError::MemberNotFound(Uuid::nil())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            service(DomainError::ComandaNotOpen("paid")).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            service(DomainError::invalid_record("member", "bad case_type")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_monthly_limit_details() {
        let err = service(DomainError::MonthlyLimitReached {
            kind: "meeting_attendance",
            month: YearMonth { year: 2024, month: 3 },
        });
        assert_eq!(err.error_code(), "MONTHLY_LIMIT_REACHED");

        let details = err.details().unwrap();
        assert_eq!(details["activity_type"], "meeting_attendance");
        assert_eq!(details["month"], YearMonth { year: 2024, month: 3 }.to_string());
    }

    #[test]
    fn test_insufficient_stock_details() {
        let err = service(DomainError::InsufficientStock {
            available: 2,
            requested: 5,
        });
        let details = err.details().unwrap();
        assert_eq!(details["available"], 2);
        assert_eq!(details["requested"], 5);
    }

    #[test]
    fn test_created_sets_status() {
        let response = Created(Json(json!({ "ok": true }))).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(NoContent.into_response().status(), StatusCode::NO_CONTENT);
    }
}
