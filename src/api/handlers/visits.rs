//! Visit handlers: manual visit-collection CRUD.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::dto::{
    CreateVisitRequest, PageQuery, UpdateVisitRequest, VisitDto, VisitListResponse,
};
use crate::app_state::AppState;
use crate::domain::visit::VisitId;
use crate::error::{ConsoleError, ErrorResponse};
use crate::persistence::visit_repo::VisitFilter;
use crate::service::visit_service::{NewVisit, VisitPatch};

/// Filter query parameters for `GET /visits`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct VisitListQuery {
    /// Substring over customer name.
    pub q: Option<String>,
    /// Inclusive start date.
    pub from: Option<chrono::NaiveDate>,
    /// Inclusive end date.
    pub to: Option<chrono::NaiveDate>,
}

/// `POST /visits` — Register a visit collection.
///
/// # Errors
///
/// Returns [`ConsoleError::Validation`] on bad fields.
#[utoipa::path(
    post,
    path = "/api/v1/visits",
    tag = "Visits",
    summary = "Register a visit collection",
    request_body = CreateVisitRequest,
    responses(
        (status = 201, description = "Visit registered", body = VisitDto),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
    )
)]
pub async fn create_visit(
    State(state): State<AppState>,
    Json(req): Json<CreateVisitRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    let created = state
        .visit_service
        .register(NewVisit {
            customer_name: req.customer_name,
            phone: req.phone,
            address: req.address,
            visit_date: req.visit_date,
            amount_g: req.amount_g,
            note: req.note,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(VisitDto::from(created))))
}

/// `GET /visits` — List visits with filters and pagination.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidDateRange`] when `from > to`.
#[utoipa::path(
    get,
    path = "/api/v1/visits",
    tag = "Visits",
    summary = "List visits",
    params(VisitListQuery, PageQuery),
    responses(
        (status = 200, description = "Paginated visit list", body = VisitListResponse),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
    )
)]
pub async fn list_visits(
    State(state): State<AppState>,
    Query(filter): Query<VisitListQuery>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let page = page.clamped();
    let result = state
        .visit_service
        .list(
            &VisitFilter {
                keyword: filter.q,
                from: filter.from,
                to: filter.to,
            },
            page.limit(),
            page.offset(),
        )
        .await?;

    Ok(Json(VisitListResponse {
        data: result.rows.into_iter().map(VisitDto::from).collect(),
        pagination: page.meta(result.has_more),
    }))
}

/// `GET /visits/:id` — Visit detail.
///
/// # Errors
///
/// Returns [`ConsoleError::VisitNotFound`] if unknown.
#[utoipa::path(
    get,
    path = "/api/v1/visits/{id}",
    tag = "Visits",
    summary = "Get visit details",
    params(("id" = uuid::Uuid, Path, description = "Visit UUID")),
    responses(
        (status = 200, description = "Visit details", body = VisitDto),
        (status = 404, description = "Visit not found", body = ErrorResponse),
    )
)]
pub async fn get_visit(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ConsoleError> {
    let visit = state.visit_service.get(VisitId::from_uuid(id)).await?;
    Ok(Json(VisitDto::from(visit)))
}

/// `PUT /visits/:id` — Edit a visit.
///
/// # Errors
///
/// Returns [`ConsoleError`] on bad fields or an unknown visit.
#[utoipa::path(
    put,
    path = "/api/v1/visits/{id}",
    tag = "Visits",
    summary = "Edit a visit",
    params(("id" = uuid::Uuid, Path, description = "Visit UUID")),
    request_body = UpdateVisitRequest,
    responses(
        (status = 200, description = "Updated visit", body = VisitDto),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "Visit not found", body = ErrorResponse),
    )
)]
pub async fn update_visit(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateVisitRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    let updated = state
        .visit_service
        .update(
            VisitId::from_uuid(id),
            VisitPatch {
                customer_name: req.customer_name,
                phone: req.phone,
                address: req.address,
                visit_date: req.visit_date,
                amount_g: req.amount_g,
                note: req.note,
            },
        )
        .await?;
    Ok(Json(VisitDto::from(updated)))
}

/// `DELETE /visits/:id` — Delete a visit.
///
/// # Errors
///
/// Returns [`ConsoleError::VisitNotFound`] if unknown.
#[utoipa::path(
    delete,
    path = "/api/v1/visits/{id}",
    tag = "Visits",
    summary = "Delete a visit",
    params(("id" = uuid::Uuid, Path, description = "Visit UUID")),
    responses(
        (status = 204, description = "Visit deleted"),
        (status = 404, description = "Visit not found", body = ErrorResponse),
    )
)]
pub async fn delete_visit(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ConsoleError> {
    state.visit_service.delete(VisitId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Visit routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/visits", post(create_visit).get(list_visits))
        .route(
            "/visits/{id}",
            get(get_visit).put(update_visit).delete(delete_visit),
        )
}
