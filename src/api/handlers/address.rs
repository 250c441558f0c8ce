//! Address-lookup proxy handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::app_state::AppState;
use crate::error::{ConsoleError, ErrorResponse};
use crate::service::address_client::AddressHit;

/// Query parameters for `GET /address/search`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AddressSearchQuery {
    /// Search keyword, e.g. a street name.
    pub keyword: String,
}

/// `GET /address/search` — Road-address candidates for a keyword,
/// proxied from the external address-search service.
///
/// # Errors
///
/// Returns [`ConsoleError::Validation`] on an empty keyword and
/// [`ConsoleError::AddressLookup`] on upstream failure.
#[utoipa::path(
    get,
    path = "/api/v1/address/search",
    tag = "Address",
    summary = "Search road addresses",
    params(AddressSearchQuery),
    responses(
        (status = 200, description = "Address candidates", body = Vec<AddressHit>),
        (status = 400, description = "Empty keyword", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn search_address(
    State(state): State<AppState>,
    Query(query): Query<AddressSearchQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let hits = state.address_client.search(&query.keyword).await?;
    Ok(Json(hits))
}

/// Address-lookup routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/address/search", get(search_address))
}
