//! Statistics handlers: bucketed inputs, regional totals, heatmap.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{HeatmapEntryDto, RegionTotalsDto, StatsQuery};
use crate::app_state::AppState;
use crate::domain::stats::{BucketKind, StatBucket};
use crate::error::{ConsoleError, ErrorResponse};

/// `GET /stats/inputs` — Date-bucketed input aggregates.
///
/// # Errors
///
/// Returns [`ConsoleError`] on an unknown bucket kind or an inverted
/// date range.
#[utoipa::path(
    get,
    path = "/api/v1/stats/inputs",
    tag = "Statistics",
    summary = "Bucketed input totals",
    description = "Groups collection events by formatted date key at the requested \
                   granularity, summing amount and points per key. One row per \
                   distinct key, sorted ascending.",
    params(StatsQuery),
    responses(
        (status = 200, description = "Aggregated buckets", body = Vec<StatBucket>),
        (status = 400, description = "Bad bucket kind or date range", body = ErrorResponse),
    )
)]
pub async fn input_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let kind = BucketKind::parse(&query.bucket)?;
    let buckets = state
        .stats_service
        .input_buckets(kind, query.from, query.to, query.region.as_deref())
        .await?;
    Ok(Json(buckets))
}

/// `GET /stats/regions` — Per-region equipment counts and totals.
///
/// # Errors
///
/// Returns [`ConsoleError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/stats/regions",
    tag = "Statistics",
    summary = "Regional totals",
    responses(
        (status = 200, description = "Per-region totals, largest first", body = Vec<RegionTotalsDto>),
    )
)]
pub async fn region_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ConsoleError> {
    let rows = state.stats_service.region_totals().await?;
    let data: Vec<RegionTotalsDto> = rows.into_iter().map(RegionTotalsDto::from).collect();
    Ok(Json(data))
}

/// `GET /stats/heatmap` — Per-robot totals with normalized map pins.
/// Out-of-service robots are excluded.
///
/// # Errors
///
/// Returns [`ConsoleError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/stats/heatmap",
    tag = "Statistics",
    summary = "Fleet-map heatmap",
    responses(
        (status = 200, description = "Heatmap entries", body = Vec<HeatmapEntryDto>),
    )
)]
pub async fn heatmap_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ConsoleError> {
    let rows = state.stats_service.heatmap().await?;
    let data: Vec<HeatmapEntryDto> = rows.into_iter().map(HeatmapEntryDto::from).collect();
    Ok(Json(data))
}

/// Statistics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats/inputs", get(input_stats))
        .route("/stats/regions", get(region_stats))
        .route("/stats/heatmap", get(heatmap_stats))
}
