//! Equipment and input-record DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PageMeta;
use crate::domain::equipment::Equipment;
use crate::domain::map_point::{MapPoint, NormalizedPoint};
use crate::persistence::models::InputRecordRow;

/// Request body for `POST /equipment`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEquipmentRequest {
    /// Fleet code, `BB-NNN` format.
    pub code: String,
    /// Install location.
    pub location: String,
    /// Administrative region.
    pub region: String,
    /// Raw pixel x on the reference map image.
    pub map_x: f64,
    /// Raw pixel y on the reference map image.
    pub map_y: f64,
}

/// Request body for `PUT /equipment/{id}`. Absent fields keep their
/// current values; `map_x` and `map_y` must be supplied together.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEquipmentRequest {
    /// New install location.
    pub location: Option<String>,
    /// New region.
    pub region: Option<String>,
    /// New raw pixel x.
    pub map_x: Option<f64>,
    /// New raw pixel y.
    pub map_y: Option<f64>,
    /// New in-service flag.
    pub usable: Option<bool>,
}

/// One robot in API responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentDto {
    /// Unique identifier.
    pub id: uuid::Uuid,
    /// Fleet code.
    pub code: String,
    /// Install location.
    pub location: String,
    /// Administrative region.
    pub region: String,
    /// Raw pixel position on the reference image.
    pub map_point: MapPoint,
    /// Position as fractions of the reference image, for re-projection
    /// onto the rendered map.
    pub normalized: NormalizedPoint,
    /// In-service flag.
    pub usable: bool,
    /// Running input total in grams.
    pub total_input_g: i64,
    /// Running input event count.
    pub total_input_count: i64,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Equipment> for EquipmentDto {
    fn from(e: Equipment) -> Self {
        Self {
            id: *e.id.as_uuid(),
            normalized: e.map_point.normalize(),
            code: e.code,
            location: e.location,
            region: e.region,
            map_point: e.map_point,
            usable: e.usable,
            total_input_g: e.total_input_g,
            total_input_count: e.total_input_count,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Paginated list response for `GET /equipment`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentListResponse {
    /// Robots on this page.
    pub data: Vec<EquipmentDto>,
    /// Pagination metadata.
    pub pagination: PageMeta,
}

/// Request body for `POST /equipment/{id}/inputs`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordInputRequest {
    /// Collection timestamp; defaults to now.
    pub collected_at: Option<DateTime<Utc>>,
    /// Collected amount in grams, must be positive.
    pub amount_g: i64,
    /// Awarded points; derived from the amount when absent.
    pub points: Option<i64>,
}

/// One input record in API responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct InputRecordDto {
    /// Unique identifier.
    pub id: uuid::Uuid,
    /// Fleet code of the reporting robot.
    pub equipment_code: String,
    /// Collection timestamp.
    pub collected_at: DateTime<Utc>,
    /// Collected amount in grams.
    pub amount_g: i64,
    /// Points awarded.
    pub points: i64,
}

impl From<InputRecordRow> for InputRecordDto {
    fn from(r: InputRecordRow) -> Self {
        Self {
            id: r.id,
            equipment_code: r.equipment_code,
            collected_at: r.collected_at,
            amount_g: r.amount_g,
            points: r.points,
        }
    }
}

/// Paginated list response for `GET /records`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordListResponse {
    /// Input records on this page.
    pub data: Vec<InputRecordDto>,
    /// Pagination metadata.
    pub pagination: PageMeta,
}
