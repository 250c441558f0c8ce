//! Equipment handlers: CRUD, soft-disable, and input records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::dto::{
    CreateEquipmentRequest, EquipmentDto, EquipmentListResponse, InputRecordDto, PageQuery,
    RecordInputRequest, RecordListResponse, UpdateEquipmentRequest,
};
use crate::app_state::AppState;
use crate::domain::equipment::EquipmentId;
use crate::domain::map_point::MapPoint;
use crate::error::{ConsoleError, ErrorResponse};
use crate::persistence::equipment_repo::{EquipmentFilter, InputRecordFilter};
use crate::service::equipment_service::{EquipmentPatch, NewEquipment, NewInputRecord};

/// Filter query parameters for `GET /equipment`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct EquipmentListQuery {
    /// Exact region match.
    pub region: Option<String>,
    /// In-service flag match.
    pub usable: Option<bool>,
    /// Substring over code and location.
    pub q: Option<String>,
}

/// Filter query parameters for `GET /records`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RecordListQuery {
    /// Exact fleet-code match.
    pub equipment_code: Option<String>,
    /// Inclusive start date.
    pub from: Option<chrono::NaiveDate>,
    /// Inclusive end date.
    pub to: Option<chrono::NaiveDate>,
}

/// `POST /equipment` — Register a robot.
///
/// # Errors
///
/// Returns [`ConsoleError`] on a bad code, location, or duplicate.
#[utoipa::path(
    post,
    path = "/api/v1/equipment",
    tag = "Equipment",
    summary = "Register a robot",
    request_body = CreateEquipmentRequest,
    responses(
        (status = 201, description = "Robot registered", body = EquipmentDto),
        (status = 400, description = "Invalid code or location", body = ErrorResponse),
        (status = 409, description = "Code already registered", body = ErrorResponse),
    )
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    Json(req): Json<CreateEquipmentRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    let created = state
        .equipment_service
        .register(NewEquipment {
            code: req.code,
            location: req.location,
            region: req.region,
            map_point: MapPoint::new(req.map_x, req.map_y),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(EquipmentDto::from(created))))
}

/// `GET /equipment` — List robots with filters and pagination.
///
/// # Errors
///
/// Returns [`ConsoleError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/equipment",
    tag = "Equipment",
    summary = "List robots",
    params(EquipmentListQuery, PageQuery),
    responses(
        (status = 200, description = "Paginated robot list", body = EquipmentListResponse),
    )
)]
pub async fn list_equipment(
    State(state): State<AppState>,
    Query(filter): Query<EquipmentListQuery>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let page = page.clamped();
    let result = state
        .equipment_service
        .list(
            &EquipmentFilter {
                region: filter.region,
                usable: filter.usable,
                keyword: filter.q,
            },
            page.limit(),
            page.offset(),
        )
        .await?;

    Ok(Json(EquipmentListResponse {
        data: result.rows.into_iter().map(EquipmentDto::from).collect(),
        pagination: page.meta(result.has_more),
    }))
}

/// `GET /equipment/:id` — Robot detail including normalized map
/// coordinates.
///
/// # Errors
///
/// Returns [`ConsoleError::EquipmentNotFound`] if unknown.
#[utoipa::path(
    get,
    path = "/api/v1/equipment/{id}",
    tag = "Equipment",
    summary = "Get robot details",
    params(("id" = uuid::Uuid, Path, description = "Equipment UUID")),
    responses(
        (status = 200, description = "Robot details", body = EquipmentDto),
        (status = 404, description = "Robot not found", body = ErrorResponse),
    )
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ConsoleError> {
    let equipment = state
        .equipment_service
        .get(EquipmentId::from_uuid(id))
        .await?;
    Ok(Json(EquipmentDto::from(equipment)))
}

/// `PUT /equipment/:id` — Edit a robot.
///
/// # Errors
///
/// Returns [`ConsoleError`] on bad fields or an unknown robot.
#[utoipa::path(
    put,
    path = "/api/v1/equipment/{id}",
    tag = "Equipment",
    summary = "Edit a robot",
    params(("id" = uuid::Uuid, Path, description = "Equipment UUID")),
    request_body = UpdateEquipmentRequest,
    responses(
        (status = 200, description = "Updated robot", body = EquipmentDto),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "Robot not found", body = ErrorResponse),
    )
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateEquipmentRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    let map_point = match (req.map_x, req.map_y) {
        (Some(x), Some(y)) => Some(MapPoint::new(x, y)),
        (None, None) => None,
        _ => {
            return Err(ConsoleError::Validation(
                "map_x and map_y must be supplied together".to_string(),
            ));
        }
    };

    let updated = state
        .equipment_service
        .update(
            EquipmentId::from_uuid(id),
            EquipmentPatch {
                location: req.location,
                region: req.region,
                map_point,
                usable: req.usable,
            },
        )
        .await?;
    Ok(Json(EquipmentDto::from(updated)))
}

/// `DELETE /equipment/:id` — Soft-disable a robot.
///
/// # Errors
///
/// Returns [`ConsoleError::EquipmentNotFound`] if unknown.
#[utoipa::path(
    delete,
    path = "/api/v1/equipment/{id}",
    tag = "Equipment",
    summary = "Soft-disable a robot",
    params(("id" = uuid::Uuid, Path, description = "Equipment UUID")),
    responses(
        (status = 204, description = "Robot disabled"),
        (status = 404, description = "Robot not found", body = ErrorResponse),
    )
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ConsoleError> {
    state
        .equipment_service
        .disable(EquipmentId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /equipment/:id/inputs` — Append a collection event.
///
/// # Errors
///
/// Returns [`ConsoleError`] on a bad amount or unknown robot.
#[utoipa::path(
    post,
    path = "/api/v1/equipment/{id}/inputs",
    tag = "Equipment",
    summary = "Record a collection event",
    params(("id" = uuid::Uuid, Path, description = "Equipment UUID")),
    request_body = RecordInputRequest,
    responses(
        (status = 201, description = "Event recorded", body = InputRecordDto),
        (status = 400, description = "Invalid amount", body = ErrorResponse),
        (status = 404, description = "Robot not found", body = ErrorResponse),
    )
)]
pub async fn record_input(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<RecordInputRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    let record = state
        .equipment_service
        .append_input(
            EquipmentId::from_uuid(id),
            NewInputRecord {
                collected_at: req.collected_at,
                amount_g: req.amount_g,
                points: req.points,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(InputRecordDto::from(record))))
}

/// `GET /records` — List input records with filters and pagination.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidDateRange`] when `from > to`.
#[utoipa::path(
    get,
    path = "/api/v1/records",
    tag = "Equipment",
    summary = "List collection events",
    params(RecordListQuery, PageQuery),
    responses(
        (status = 200, description = "Paginated record list", body = RecordListResponse),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
    )
)]
pub async fn list_records(
    State(state): State<AppState>,
    Query(filter): Query<RecordListQuery>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let page = page.clamped();
    let result = state
        .equipment_service
        .list_inputs(
            &InputRecordFilter {
                equipment_code: filter.equipment_code,
                from: filter.from,
                to: filter.to,
            },
            page.limit(),
            page.offset(),
        )
        .await?;

    Ok(Json(RecordListResponse {
        data: result.rows.into_iter().map(InputRecordDto::from).collect(),
        pagination: page.meta(result.has_more),
    }))
}

/// Equipment and record routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/equipment", post(create_equipment).get(list_equipment))
        .route(
            "/equipment/{id}",
            get(get_equipment)
                .put(update_equipment)
                .delete(delete_equipment),
        )
        .route("/equipment/{id}/inputs", post(record_input))
        .route("/records", get(list_records))
}
