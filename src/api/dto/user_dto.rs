//! User and grade DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PageMeta;
use crate::domain::grade::Grade;
use crate::domain::user::{UserRole, UserStatus};
use crate::service::user_service::ClassifiedUser;

/// One account in API responses. Password material is never exposed.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    /// Unique identifier.
    pub id: uuid::Uuid,
    /// Login id.
    pub login_id: String,
    /// Display name.
    pub name: String,
    /// Mobile number, digits only.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Account role.
    pub role: UserRole,
    /// Cumulative points.
    pub points: i64,
    /// Derived grade name, when a range matches.
    pub grade: Option<String>,
    /// Account status.
    pub status: UserStatus,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<ClassifiedUser> for UserDto {
    fn from(u: ClassifiedUser) -> Self {
        Self {
            id: *u.profile.id.as_uuid(),
            login_id: u.profile.login_id,
            name: u.profile.name,
            phone: u.profile.phone,
            email: u.profile.email,
            role: u.profile.role,
            points: u.profile.points,
            grade: u.grade,
            status: u.profile.status,
            created_at: u.profile.created_at,
            updated_at: u.profile.updated_at,
        }
    }
}

/// Paginated list response for `GET /users`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    /// Accounts on this page.
    pub data: Vec<UserDto>,
    /// Pagination metadata.
    pub pagination: PageMeta,
}

/// Request body for `PUT /users/{id}`. Absent fields keep their
/// current values.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New phone number; hyphens allowed.
    pub phone: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New point total.
    pub points: Option<i64>,
}

/// Request body for `POST /users/{id}/password`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    /// Current password, verified before any change.
    pub current_password: String,
    /// New password, at least 8 characters.
    pub new_password: String,
}

/// Request body for grade create and update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GradeRequest {
    /// Display name.
    pub name: String,
    /// Inclusive lower bound of the point range.
    pub min_points: i64,
    /// Inclusive upper bound of the point range.
    pub max_points: i64,
}

/// One grade in API responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct GradeDto {
    /// Unique identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Inclusive lower bound.
    pub min_points: i64,
    /// Inclusive upper bound.
    pub max_points: i64,
}

impl From<Grade> for GradeDto {
    fn from(g: Grade) -> Self {
        Self {
            id: *g.id.as_uuid(),
            name: g.name,
            min_points: g.min_points,
            max_points: g.max_points,
        }
    }
}
