//! Console error types with HTTP status code mapping.
//!
//! [`ConsoleError`] is the central error type for the service. Each
//! variant maps to a numeric error code and an HTTP status, rendered
//! as a structured JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid phone number: \"012\"",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ConsoleError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category           | HTTP Status                  |
/// |-----------|--------------------|------------------------------|
/// | 1000–1999 | Validation         | 400 Bad Request              |
/// | 2000–2999 | Not Found/Conflict | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server/Upstream    | 500 / 502                    |
/// | 4000–4999 | Auth               | 401 Unauthorized             |
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    Validation(String),

    /// A date-range filter had `from` after `to`.
    #[error("invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// Inclusive range start.
        from: chrono::NaiveDate,
        /// Inclusive range end.
        to: chrono::NaiveDate,
    },

    /// Equipment with the given id or code was not found.
    #[error("equipment not found: {0}")]
    EquipmentNotFound(String),

    /// User with the given id was not found.
    #[error("user not found: {0}")]
    UserNotFound(uuid::Uuid),

    /// Grade with the given id was not found.
    #[error("grade not found: {0}")]
    GradeNotFound(uuid::Uuid),

    /// Visit record with the given id was not found.
    #[error("visit not found: {0}")]
    VisitNotFound(uuid::Uuid),

    /// Equipment code already registered.
    #[error("equipment code already exists: {0}")]
    DuplicateCode(String),

    /// Candidate grade range intersects an existing grade's range.
    #[error("grade range overlaps {name} [{min}, {max}]")]
    GradeOverlap {
        /// Name of the conflicting grade.
        name: String,
        /// Conflicting range's inclusive lower bound.
        min: i64,
        /// Conflicting range's inclusive upper bound.
        max: i64,
    },

    /// Current password did not verify on a password change.
    #[error("current password is incorrect")]
    PasswordMismatch,

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The external address-lookup service failed or was unreachable.
    #[error("address lookup failed: {0}")]
    AddressLookup(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::InvalidDateRange { .. } => 1002,
            Self::EquipmentNotFound(_) => 2001,
            Self::UserNotFound(_) => 2002,
            Self::GradeNotFound(_) => 2003,
            Self::VisitNotFound(_) => 2004,
            Self::DuplicateCode(_) => 2101,
            Self::GradeOverlap { .. } => 2102,
            Self::PasswordMismatch => 4001,
            Self::Persistence(_) => 3001,
            Self::AddressLookup(_) => 3002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidDateRange { .. } => StatusCode::BAD_REQUEST,
            Self::EquipmentNotFound(_)
            | Self::UserNotFound(_)
            | Self::GradeNotFound(_)
            | Self::VisitNotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateCode(_) | Self::GradeOverlap { .. } => StatusCode::CONFLICT,
            Self::PasswordMismatch => StatusCode::UNAUTHORIZED,
            Self::AddressLookup(_) => StatusCode::BAD_GATEWAY,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ConsoleError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Self::Internal("unexpected empty result".to_string()),
            other => Self::Persistence(other.to_string()),
        }
    }
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let e = ConsoleError::Validation("bad".to_string());
        assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(e.error_code(), 1001);
    }

    #[test]
    fn conflicts_map_to_409() {
        let e = ConsoleError::DuplicateCode("BB-001".to_string());
        assert_eq!(e.status_code(), StatusCode::CONFLICT);
        let e = ConsoleError::GradeOverlap {
            name: "Silver".to_string(),
            min: 1000,
            max: 4999,
        };
        assert_eq!(e.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn password_mismatch_maps_to_401() {
        assert_eq!(
            ConsoleError::PasswordMismatch.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn upstream_failure_maps_to_502() {
        let e = ConsoleError::AddressLookup("timeout".to_string());
        assert_eq!(e.status_code(), StatusCode::BAD_GATEWAY);
    }
}
