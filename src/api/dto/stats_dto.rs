//! Statistics DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::map_point::NormalizedPoint;
use crate::persistence::models::{HeatmapRow, RegionTotalsRow};

/// Query parameters for `GET /stats/inputs`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct StatsQuery {
    /// Granularity: `daily`, `weekly`, `monthly` or `yearly`.
    pub bucket: String,
    /// Inclusive start date.
    pub from: Option<NaiveDate>,
    /// Inclusive end date.
    pub to: Option<NaiveDate>,
    /// Restrict to one region.
    pub region: Option<String>,
}

/// One region's totals for `GET /stats/regions`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegionTotalsDto {
    /// Region name.
    pub region: String,
    /// Number of registered robots.
    pub equipment_count: i64,
    /// Summed input amount in grams.
    pub total_input_g: i64,
}

impl From<RegionTotalsRow> for RegionTotalsDto {
    fn from(r: RegionTotalsRow) -> Self {
        Self {
            region: r.region,
            equipment_count: r.equipment_count,
            total_input_g: r.total_input_g,
        }
    }
}

/// One robot's heatmap entry for `GET /stats/heatmap`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HeatmapEntryDto {
    /// Fleet code.
    pub code: String,
    /// Pin position as fractions of the reference map image.
    pub position: NormalizedPoint,
    /// Running input total in grams, the pin's intensity.
    pub total_input_g: i64,
}

impl From<HeatmapRow> for HeatmapEntryDto {
    fn from(r: HeatmapRow) -> Self {
        Self {
            code: r.code,
            position: crate::domain::map_point::MapPoint::new(r.map_x, r.map_y).normalize(),
            total_input_g: r.total_input_g,
        }
    }
}
