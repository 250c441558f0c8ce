//! Database row models and conversions into domain types.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::domain::equipment::{Equipment, EquipmentId};
use crate::domain::grade::{Grade, GradeId};
use crate::domain::map_point::MapPoint;
use crate::domain::stats::InputEvent;
use crate::domain::user::{UserId, UserProfile, UserRole, UserStatus};
use crate::domain::visit::{VisitId, VisitRecord};
use crate::error::ConsoleError;

/// An `equipment` table row.
#[derive(Debug, Clone, FromRow)]
pub struct EquipmentRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Fleet code.
    pub code: String,
    /// Install location.
    pub location: String,
    /// Administrative region.
    pub region: String,
    /// Raw map pixel x.
    pub map_x: f64,
    /// Raw map pixel y.
    pub map_y: f64,
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

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        Self {
            id: EquipmentId::from_uuid(row.id),
            code: row.code,
            location: row.location,
            region: row.region,
            map_point: MapPoint::new(row.map_x, row.map_y),
            usable: row.usable,
            total_input_g: row.total_input_g,
            total_input_count: row.total_input_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// An `input_records` table row.
#[derive(Debug, Clone, FromRow)]
pub struct InputRecordRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Fleet code of the reporting robot.
    pub equipment_code: String,
    /// Collection timestamp.
    pub collected_at: DateTime<Utc>,
    /// Collected amount in grams.
    pub amount_g: i64,
    /// Points awarded for the event.
    pub points: i64,
}

impl InputRecordRow {
    /// Projects the row onto the aggregation source shape.
    #[must_use]
    pub fn as_event(&self) -> InputEvent {
        InputEvent {
            date: self.collected_at.date_naive(),
            amount_g: self.amount_g,
            points: self.points,
        }
    }
}

/// A `users` table row.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Unique login id.
    pub login_id: String,
    /// Display name.
    pub name: String,
    /// Mobile number, digits only.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Role string, `admin` or `member`.
    pub role: String,
    /// Cumulative points.
    pub points: i64,
    /// Status string, `active` or `withdrawn`.
    pub status: String,
    /// Salted password digest.
    pub password_hash: String,
    /// Per-user salt.
    pub password_salt: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserProfile {
    type Error = ConsoleError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            login_id: row.login_id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            role: UserRole::parse(&row.role)?,
            points: row.points,
            status: UserStatus::parse(&row.status)?,
            password_hash: row.password_hash,
            password_salt: row.password_salt,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A `grades` table row.
#[derive(Debug, Clone, FromRow)]
pub struct GradeRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Unique grade name.
    pub name: String,
    /// Inclusive range lower bound.
    pub min_points: i64,
    /// Inclusive range upper bound.
    pub max_points: i64,
}

impl From<GradeRow> for Grade {
    fn from(row: GradeRow) -> Self {
        Self {
            id: GradeId::from_uuid(row.id),
            name: row.name,
            min_points: row.min_points,
            max_points: row.max_points,
        }
    }
}

/// A `visits` table row.
#[derive(Debug, Clone, FromRow)]
pub struct VisitRow {
    /// Primary key.
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

impl From<VisitRow> for VisitRecord {
    fn from(row: VisitRow) -> Self {
        Self {
            id: VisitId::from_uuid(row.id),
            customer_name: row.customer_name,
            phone: row.phone,
            address: row.address,
            visit_date: row.visit_date,
            amount_g: row.amount_g,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A per-region aggregate row for `GET /stats/regions`.
#[derive(Debug, Clone, FromRow)]
pub struct RegionTotalsRow {
    /// Region name.
    pub region: String,
    /// Number of registered robots in the region.
    pub equipment_count: i64,
    /// Summed input amount across the region's robots.
    pub total_input_g: i64,
}

/// A per-equipment aggregate row for `GET /stats/heatmap`.
#[derive(Debug, Clone, FromRow)]
pub struct HeatmapRow {
    /// Fleet code.
    pub code: String,
    /// Raw map pixel x.
    pub map_x: f64,
    /// Raw map pixel y.
    pub map_y: f64,
    /// Running input total in grams.
    pub total_input_g: i64,
}
