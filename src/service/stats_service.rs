//! Statistics service: date bucketing, regional totals, heatmap.

use chrono::NaiveDate;

use crate::domain::stats::{self, BucketKind, StatBucket};
use crate::error::ConsoleError;
use crate::persistence::StatsRepo;
use crate::persistence::models::{HeatmapRow, RegionTotalsRow};

/// Orchestration layer for the statistics reads.
#[derive(Debug, Clone)]
pub struct StatsService {
    repo: StatsRepo,
}

impl StatsService {
    /// Creates a new `StatsService`.
    #[must_use]
    pub fn new(repo: StatsRepo) -> Self {
        Self { repo }
    }

    /// Buckets input records at the requested granularity, optionally
    /// bounded by date and restricted to one region.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidDateRange`] when `from > to` and
    /// [`ConsoleError::Persistence`] on database failure.
    pub async fn input_buckets(
        &self,
        kind: BucketKind,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        region: Option<&str>,
    ) -> Result<Vec<StatBucket>, ConsoleError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ConsoleError::InvalidDateRange { from, to });
            }
        }
        let rows = self.repo.input_events(from, to, region).await?;
        let events: Vec<_> = rows.iter().map(|r| r.as_event()).collect();
        Ok(stats::aggregate(&events, kind))
    }

    /// Per-region equipment counts and input totals.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn region_totals(&self) -> Result<Vec<RegionTotalsRow>, ConsoleError> {
        self.repo.region_totals().await
    }

    /// Per-robot totals with map positions for the heatmap overlay.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn heatmap(&self) -> Result<Vec<HeatmapRow>, ConsoleError> {
        self.repo.heatmap().await
    }
}
