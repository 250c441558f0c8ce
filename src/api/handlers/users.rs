//! User handlers: list, detail, edit, withdraw, password, barcode.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::dto::{
    ChangePasswordRequest, PageQuery, UpdateUserRequest, UserDto, UserListResponse,
};
use crate::app_state::AppState;
use crate::domain::barcode::BarcodePayload;
use crate::domain::user::UserId;
use crate::error::{ConsoleError, ErrorResponse};
use crate::persistence::user_repo::UserFilter;
use crate::service::user_service::UserPatch;

/// Filter query parameters for `GET /users`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct UserListQuery {
    /// Status match: `active` or `withdrawn`.
    pub status: Option<String>,
    /// Role match: `admin` or `member`.
    pub role: Option<String>,
    /// Substring over login id and name.
    pub q: Option<String>,
}

/// `GET /users` — List accounts with filters and pagination.
///
/// # Errors
///
/// Returns [`ConsoleError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    summary = "List accounts",
    params(UserListQuery, PageQuery),
    responses(
        (status = 200, description = "Paginated account list", body = UserListResponse),
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserListQuery>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let page = page.clamped();
    let result = state
        .user_service
        .list(
            &UserFilter {
                status: filter.status,
                role: filter.role,
                keyword: filter.q,
            },
            page.limit(),
            page.offset(),
        )
        .await?;

    Ok(Json(UserListResponse {
        data: result.rows.into_iter().map(UserDto::from).collect(),
        pagination: page.meta(result.has_more),
    }))
}

/// `GET /users/:id` — Account detail with derived grade.
///
/// # Errors
///
/// Returns [`ConsoleError::UserNotFound`] if unknown.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    summary = "Get account details",
    params(("id" = uuid::Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Account details", body = UserDto),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ConsoleError> {
    let user = state.user_service.get(UserId::from_uuid(id)).await?;
    Ok(Json(UserDto::from(user)))
}

/// `PUT /users/:id` — Admin edit of an account.
///
/// # Errors
///
/// Returns [`ConsoleError`] on bad contact fields or an unknown user.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    summary = "Edit an account",
    params(("id" = uuid::Uuid, Path, description = "User UUID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated account", body = UserDto),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    let updated = state
        .user_service
        .update(
            UserId::from_uuid(id),
            UserPatch {
                name: req.name,
                phone: req.phone,
                email: req.email,
                role: req.role,
                points: req.points,
            },
        )
        .await?;
    Ok(Json(UserDto::from(updated)))
}

/// `POST /users/:id/withdraw` — Flag an account as withdrawn.
///
/// # Errors
///
/// Returns [`ConsoleError::UserNotFound`] if unknown.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/withdraw",
    tag = "Users",
    summary = "Withdraw an account",
    params(("id" = uuid::Uuid, Path, description = "User UUID")),
    responses(
        (status = 204, description = "Account withdrawn"),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn withdraw_user(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ConsoleError> {
    state.user_service.withdraw(UserId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /users/:id/password` — Change a password.
///
/// # Errors
///
/// Returns [`ConsoleError::PasswordMismatch`] on a wrong current
/// password and [`ConsoleError::Validation`] on a weak new one.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/password",
    tag = "Users",
    summary = "Change a password",
    params(("id" = uuid::Uuid, Path, description = "User UUID")),
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "New password rejected", body = ErrorResponse),
        (status = 401, description = "Current password incorrect", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    state
        .user_service
        .change_password(UserId::from_uuid(id), &req.current_password, &req.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /users/:id/barcode` — Member-card barcode payload. Contains
/// no password material; see the service docs for the token shape.
///
/// # Errors
///
/// Returns [`ConsoleError::UserNotFound`] if unknown.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/barcode",
    tag = "Users",
    summary = "Issue a barcode payload",
    params(("id" = uuid::Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Barcode payload", body = BarcodePayload),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn user_barcode(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ConsoleError> {
    let payload = state.user_service.barcode(UserId::from_uuid(id)).await?;
    Ok(Json(payload))
}

/// User account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).put(update_user))
        .route("/users/{id}/withdraw", post(withdraw_user))
        .route("/users/{id}/password", post(change_password))
        .route("/users/{id}/barcode", get(user_barcode))
}
