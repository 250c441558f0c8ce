//! Grade handlers: CRUD with range-overlap enforcement.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::api::dto::{GradeDto, GradeRequest};
use crate::app_state::AppState;
use crate::domain::grade::GradeId;
use crate::error::{ConsoleError, ErrorResponse};
use crate::service::user_service::GradeInput;

/// `POST /grades` — Create a grade.
///
/// # Errors
///
/// Returns [`ConsoleError::GradeOverlap`] when the range intersects an
/// existing grade's.
#[utoipa::path(
    post,
    path = "/api/v1/grades",
    tag = "Grades",
    summary = "Create a grade",
    request_body = GradeRequest,
    responses(
        (status = 201, description = "Grade created", body = GradeDto),
        (status = 400, description = "Inverted range or empty name", body = ErrorResponse),
        (status = 409, description = "Range overlaps an existing grade", body = ErrorResponse),
    )
)]
pub async fn create_grade(
    State(state): State<AppState>,
    Json(req): Json<GradeRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    let created = state
        .user_service
        .create_grade(GradeInput {
            name: req.name,
            min_points: req.min_points,
            max_points: req.max_points,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(GradeDto::from(created))))
}

/// `GET /grades` — The full grade table, ordered by range start.
///
/// # Errors
///
/// Returns [`ConsoleError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/grades",
    tag = "Grades",
    summary = "List grades",
    responses(
        (status = 200, description = "Grade table", body = Vec<GradeDto>),
    )
)]
pub async fn list_grades(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ConsoleError> {
    let grades = state.user_service.grade_table().await?;
    let data: Vec<GradeDto> = grades.into_iter().map(GradeDto::from).collect();
    Ok(Json(data))
}

/// `PUT /grades/:id` — Update a grade's name and range.
///
/// # Errors
///
/// Returns [`ConsoleError::GradeOverlap`] on an intersecting range and
/// [`ConsoleError::GradeNotFound`] if unknown.
#[utoipa::path(
    put,
    path = "/api/v1/grades/{id}",
    tag = "Grades",
    summary = "Update a grade",
    params(("id" = uuid::Uuid, Path, description = "Grade UUID")),
    request_body = GradeRequest,
    responses(
        (status = 200, description = "Updated grade", body = GradeDto),
        (status = 404, description = "Grade not found", body = ErrorResponse),
        (status = 409, description = "Range overlaps an existing grade", body = ErrorResponse),
    )
)]
pub async fn update_grade(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<GradeRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    let updated = state
        .user_service
        .update_grade(
            GradeId::from_uuid(id),
            GradeInput {
                name: req.name,
                min_points: req.min_points,
                max_points: req.max_points,
            },
        )
        .await?;
    Ok(Json(GradeDto::from(updated)))
}

/// `DELETE /grades/:id` — Delete a grade.
///
/// # Errors
///
/// Returns [`ConsoleError::GradeNotFound`] if unknown.
#[utoipa::path(
    delete,
    path = "/api/v1/grades/{id}",
    tag = "Grades",
    summary = "Delete a grade",
    params(("id" = uuid::Uuid, Path, description = "Grade UUID")),
    responses(
        (status = 204, description = "Grade deleted"),
        (status = 404, description = "Grade not found", body = ErrorResponse),
    )
)]
pub async fn delete_grade(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ConsoleError> {
    state
        .user_service
        .delete_grade(GradeId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Grade routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/grades", get(list_grades).post(create_grade))
        .route("/grades/{id}", put(update_grade).delete(delete_grade))
}
