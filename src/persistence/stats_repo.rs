//! Read-side repository for the statistics endpoints.

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{HeatmapRow, InputRecordRow, RegionTotalsRow};
use crate::error::ConsoleError;

/// PostgreSQL-backed statistics reader.
#[derive(Debug, Clone)]
pub struct StatsRepo {
    pool: PgPool,
}

impl StatsRepo {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the input-record rows feeding the bucketed aggregation,
    /// optionally bounded by date and restricted to one region (via a
    /// join on the owning equipment).
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn input_events(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        region: Option<&str>,
    ) -> Result<Vec<InputRecordRow>, ConsoleError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT r.id, r.equipment_code, r.collected_at, r.amount_g, r.points \
             FROM input_records r",
        );
        if region.is_some() {
            qb.push(" JOIN equipment e ON e.code = r.equipment_code");
        }
        qb.push(" WHERE 1 = 1");
        if let Some(from) = from {
            qb.push(" AND r.collected_at::date >= ").push_bind(from);
        }
        if let Some(to) = to {
            qb.push(" AND r.collected_at::date <= ").push_bind(to);
        }
        if let Some(region) = region {
            qb.push(" AND e.region = ").push_bind(region);
        }
        qb.push(" ORDER BY r.collected_at");

        let rows = qb
            .build_query_as::<InputRecordRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Per-region equipment counts and input totals, largest total
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn region_totals(&self) -> Result<Vec<RegionTotalsRow>, ConsoleError> {
        let rows = sqlx::query_as::<_, RegionTotalsRow>(
            "SELECT region, COUNT(*) AS equipment_count, \
             COALESCE(SUM(total_input_g), 0) AS total_input_g \
             FROM equipment GROUP BY region ORDER BY total_input_g DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Per-robot totals for the fleet-map heatmap. Out-of-service
    /// robots are excluded.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn heatmap(&self) -> Result<Vec<HeatmapRow>, ConsoleError> {
        let rows = sqlx::query_as::<_, HeatmapRow>(
            "SELECT code, map_x, map_y, total_input_g \
             FROM equipment WHERE usable = TRUE ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
