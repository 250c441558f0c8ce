//! REST endpoint handlers organized by resource.

pub mod address;
pub mod equipment;
pub mod export;
pub mod grades;
pub mod stats;
pub mod system;
pub mod users;
pub mod visits;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(equipment::routes())
        .merge(users::routes())
        .merge(grades::routes())
        .merge(visits::routes())
        .merge(stats::routes())
        .merge(export::routes())
        .merge(address::routes())
}
