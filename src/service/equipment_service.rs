//! Equipment service: robot registration, edits, soft-disable, and
//! the append-only input-record stream.

use chrono::{DateTime, Utc};

use crate::domain::equipment::{self, Equipment, EquipmentId};
use crate::domain::map_point::MapPoint;
use crate::error::ConsoleError;
use crate::persistence::equipment_repo::{EquipmentFilter, InputRecordFilter};
use crate::persistence::models::{EquipmentRow, InputRecordRow};
use crate::persistence::{EquipmentRepo, PageRows};

/// Points awarded per 100 g collected when the reporting robot does
/// not supply an explicit point value.
const POINTS_PER_100G: i64 = 1;

/// Fields accepted when registering a robot.
#[derive(Debug, Clone)]
pub struct NewEquipment {
    /// Fleet code, `BB-NNN` format.
    pub code: String,
    /// Install location.
    pub location: String,
    /// Administrative region.
    pub region: String,
    /// Raw map pixel position.
    pub map_point: MapPoint,
}

/// Fields accepted when editing a robot; `None` keeps the current
/// value.
#[derive(Debug, Clone, Default)]
pub struct EquipmentPatch {
    /// New install location.
    pub location: Option<String>,
    /// New region.
    pub region: Option<String>,
    /// New raw map pixel position.
    pub map_point: Option<MapPoint>,
    /// New in-service flag.
    pub usable: Option<bool>,
}

/// One robot collection event as reported by the robot.
#[derive(Debug, Clone)]
pub struct NewInputRecord {
    /// Collection timestamp; defaults to now when absent.
    pub collected_at: Option<DateTime<Utc>>,
    /// Collected amount in grams, must be positive.
    pub amount_g: i64,
    /// Awarded points; derived from the amount when absent.
    pub points: Option<i64>,
}

/// Orchestration layer for equipment operations.
#[derive(Debug, Clone)]
pub struct EquipmentService {
    repo: EquipmentRepo,
}

impl EquipmentService {
    /// Creates a new `EquipmentService`.
    #[must_use]
    pub fn new(repo: EquipmentRepo) -> Self {
        Self { repo }
    }

    /// Registers a new robot.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] on a bad code or location
    /// and [`ConsoleError::DuplicateCode`] when the code is taken.
    pub async fn register(&self, new: NewEquipment) -> Result<Equipment, ConsoleError> {
        equipment::validate_code(&new.code)?;
        equipment::validate_location(&new.location)?;
        if new.region.trim().is_empty() {
            return Err(ConsoleError::Validation(
                "region must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let row = EquipmentRow {
            id: *EquipmentId::new().as_uuid(),
            code: new.code,
            location: new.location.trim().to_string(),
            region: new.region.trim().to_string(),
            map_x: new.map_point.x,
            map_y: new.map_point.y,
            usable: true,
            total_input_g: 0,
            total_input_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert(&row).await?;

        tracing::info!(code = %row.code, region = %row.region, "equipment registered");
        Ok(row.into())
    }

    /// Fetches one robot by id.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::EquipmentNotFound`] when unknown.
    pub async fn get(&self, id: EquipmentId) -> Result<Equipment, ConsoleError> {
        Ok(self.repo.find_by_id(*id.as_uuid()).await?.into())
    }

    /// Lists robots with filters and pagination.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn list(
        &self,
        filter: &EquipmentFilter,
        limit: i64,
        offset: i64,
    ) -> Result<PageRows<Equipment>, ConsoleError> {
        let page = self.repo.list(filter, limit, offset).await?;
        Ok(PageRows {
            rows: page.rows.into_iter().map(Equipment::from).collect(),
            has_more: page.has_more,
        })
    }

    /// Applies an edit and returns the updated robot.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] on a bad location and
    /// [`ConsoleError::EquipmentNotFound`] when unknown.
    pub async fn update(
        &self,
        id: EquipmentId,
        patch: EquipmentPatch,
    ) -> Result<Equipment, ConsoleError> {
        if let Some(location) = &patch.location {
            equipment::validate_location(location)?;
        }
        if let Some(region) = &patch.region {
            if region.trim().is_empty() {
                return Err(ConsoleError::Validation(
                    "region must not be empty".to_string(),
                ));
            }
        }

        self.repo
            .update(
                *id.as_uuid(),
                patch.location.as_deref(),
                patch.region.as_deref(),
                patch.map_point.map(|p| p.x),
                patch.map_point.map(|p| p.y),
                patch.usable,
            )
            .await?;

        tracing::info!(%id, "equipment updated");
        self.get(id).await
    }

    /// Soft-disables a robot. The row and its history stay.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::EquipmentNotFound`] when unknown.
    pub async fn disable(&self, id: EquipmentId) -> Result<(), ConsoleError> {
        self.repo.soft_disable(*id.as_uuid()).await?;
        tracing::info!(%id, "equipment disabled");
        Ok(())
    }

    /// Appends a collection event to a robot's input stream and bumps
    /// its running totals. Out-of-service robots still report, so no
    /// `usable` check here.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] on a non-positive amount
    /// and [`ConsoleError::EquipmentNotFound`] on an unknown robot.
    pub async fn append_input(
        &self,
        id: EquipmentId,
        new: NewInputRecord,
    ) -> Result<InputRecordRow, ConsoleError> {
        if new.amount_g <= 0 {
            return Err(ConsoleError::Validation(format!(
                "collected amount must be positive, got {}",
                new.amount_g
            )));
        }
        if let Some(points) = new.points {
            if points < 0 {
                return Err(ConsoleError::Validation(format!(
                    "points must not be negative, got {points}"
                )));
            }
        }

        let owner = self.repo.find_by_id(*id.as_uuid()).await?;
        let record = InputRecordRow {
            id: uuid::Uuid::new_v4(),
            equipment_code: owner.code,
            collected_at: new.collected_at.unwrap_or_else(Utc::now),
            amount_g: new.amount_g,
            points: new.points.unwrap_or(new.amount_g / 100 * POINTS_PER_100G),
        };
        self.repo.append_input(*id.as_uuid(), &record).await?;

        tracing::info!(code = %record.equipment_code, amount_g = record.amount_g, "input recorded");
        Ok(record)
    }

    /// Lists input records with filters and pagination, validating
    /// the date range.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidDateRange`] when `from > to`.
    pub async fn list_inputs(
        &self,
        filter: &InputRecordFilter,
        limit: i64,
        offset: i64,
    ) -> Result<PageRows<InputRecordRow>, ConsoleError> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(ConsoleError::InvalidDateRange { from, to });
            }
        }
        self.repo.list_inputs(filter, limit, offset).await
    }
}
