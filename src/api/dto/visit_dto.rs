//! Visit-collection DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PageMeta;
use crate::domain::visit::VisitRecord;

/// Request body for `POST /visits`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVisitRequest {
    /// Customer display name.
    pub customer_name: String,
    /// Customer phone; hyphens allowed.
    pub phone: String,
    /// Pickup address.
    pub address: String,
    /// Scheduled visit date.
    pub visit_date: NaiveDate,
    /// Collected amount in grams, must be positive.
    pub amount_g: i64,
    /// Operator note.
    pub note: Option<String>,
}

/// Request body for `PUT /visits/{id}`. Absent fields keep their
/// current values.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateVisitRequest {
    /// New customer name.
    pub customer_name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New visit date.
    pub visit_date: Option<NaiveDate>,
    /// New collected amount.
    pub amount_g: Option<i64>,
    /// New note.
    pub note: Option<String>,
}

/// One visit in API responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct VisitDto {
    /// Unique identifier.
    pub id: uuid::Uuid,
    /// Customer display name.
    pub customer_name: String,
    /// Customer mobile number.
    pub phone: String,
    /// Pickup address.
    pub address: String,
    /// Scheduled visit date.
    pub visit_date: NaiveDate,
    /// Collected amount in grams.
    pub amount_g: i64,
    /// Operator note.
    pub note: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<VisitRecord> for VisitDto {
    fn from(v: VisitRecord) -> Self {
        Self {
            id: *v.id.as_uuid(),
            customer_name: v.customer_name,
            phone: v.phone,
            address: v.address,
            visit_date: v.visit_date,
            amount_g: v.amount_g,
            note: v.note,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

/// Paginated list response for `GET /visits`.
#[derive(Debug, Serialize, ToSchema)]
pub struct VisitListResponse {
    /// Visits on this page.
    pub data: Vec<VisitDto>,
    /// Pagination metadata.
    pub pagination: PageMeta,
}
