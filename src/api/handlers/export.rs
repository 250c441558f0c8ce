//! CSV export handlers for records and visits.
//!
//! Exports reuse the list filters but ignore pagination, bounded by a
//! fixed row cap. The body is built in memory; these tables are small
//! enough that streaming is not worth the machinery.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::app_state::AppState;
use crate::error::{ConsoleError, ErrorResponse};
use crate::persistence::equipment_repo::InputRecordFilter;
use crate::persistence::visit_repo::VisitFilter;

/// Upper bound on exported rows per request.
const EXPORT_CAP: i64 = 10_000;

/// Filter query parameters for `GET /export/records.csv`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RecordExportQuery {
    /// Exact fleet-code match.
    pub equipment_code: Option<String>,
    /// Inclusive start date.
    pub from: Option<chrono::NaiveDate>,
    /// Inclusive end date.
    pub to: Option<chrono::NaiveDate>,
}

/// Filter query parameters for `GET /export/visits.csv`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct VisitExportQuery {
    /// Substring over customer name.
    pub q: Option<String>,
    /// Inclusive start date.
    pub from: Option<chrono::NaiveDate>,
    /// Inclusive end date.
    pub to: Option<chrono::NaiveDate>,
}

/// `GET /export/records.csv` — Input records as CSV.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidDateRange`] when `from > to` and
/// [`ConsoleError::Internal`] if CSV serialization fails.
#[utoipa::path(
    get,
    path = "/api/v1/export/records.csv",
    tag = "Export",
    summary = "Export collection events as CSV",
    params(RecordExportQuery),
    responses(
        (status = 200, description = "CSV body", content_type = "text/csv"),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
    )
)]
pub async fn export_records(
    State(state): State<AppState>,
    Query(query): Query<RecordExportQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let page = state
        .equipment_service
        .list_inputs(
            &InputRecordFilter {
                equipment_code: query.equipment_code,
                from: query.from,
                to: query.to,
            },
            EXPORT_CAP,
            0,
        )
        .await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    write_row(
        &mut writer,
        &["equipment_code", "collected_at", "amount_g", "points"],
    )?;
    for record in &page.rows {
        write_row(
            &mut writer,
            &[
                record.equipment_code.as_str(),
                &record.collected_at.to_rfc3339(),
                &record.amount_g.to_string(),
                &record.points.to_string(),
            ],
        )?;
    }

    Ok(csv_response("records.csv", into_bytes(writer)?))
}

/// `GET /export/visits.csv` — Visit history as CSV.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidDateRange`] when `from > to` and
/// [`ConsoleError::Internal`] if CSV serialization fails.
#[utoipa::path(
    get,
    path = "/api/v1/export/visits.csv",
    tag = "Export",
    summary = "Export visit history as CSV",
    params(VisitExportQuery),
    responses(
        (status = 200, description = "CSV body", content_type = "text/csv"),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
    )
)]
pub async fn export_visits(
    State(state): State<AppState>,
    Query(query): Query<VisitExportQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let page = state
        .visit_service
        .list(
            &VisitFilter {
                keyword: query.q,
                from: query.from,
                to: query.to,
            },
            EXPORT_CAP,
            0,
        )
        .await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    write_row(
        &mut writer,
        &[
            "customer_name",
            "phone",
            "address",
            "visit_date",
            "amount_g",
            "note",
        ],
    )?;
    for visit in &page.rows {
        write_row(
            &mut writer,
            &[
                visit.customer_name.as_str(),
                visit.phone.as_str(),
                visit.address.as_str(),
                &visit.visit_date.to_string(),
                &visit.amount_g.to_string(),
                visit.note.as_deref().unwrap_or(""),
            ],
        )?;
    }

    Ok(csv_response("visits.csv", into_bytes(writer)?))
}

fn write_row(
    writer: &mut csv::Writer<Vec<u8>>,
    fields: &[&str],
) -> Result<(), ConsoleError> {
    writer
        .write_record(fields)
        .map_err(|e| ConsoleError::Internal(format!("csv write: {e}")))
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, ConsoleError> {
    writer
        .into_inner()
        .map_err(|e| ConsoleError::Internal(format!("csv flush: {e}")))
}

fn csv_response(filename: &str, body: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

/// Export routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/export/records.csv", get(export_records))
        .route("/export/visits.csv", get(export_visits))
}
