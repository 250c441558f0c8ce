//! OpenAPI document assembly for the console API.

use utoipa::OpenApi;

use super::handlers;

/// Aggregated OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "binibot-console API",
        description = "JSON backend for the BiniBot fleet admin console"
    ),
    paths(
        handlers::equipment::create_equipment,
        handlers::equipment::list_equipment,
        handlers::equipment::get_equipment,
        handlers::equipment::update_equipment,
        handlers::equipment::delete_equipment,
        handlers::equipment::record_input,
        handlers::equipment::list_records,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::withdraw_user,
        handlers::users::change_password,
        handlers::users::user_barcode,
        handlers::grades::create_grade,
        handlers::grades::list_grades,
        handlers::grades::update_grade,
        handlers::grades::delete_grade,
        handlers::visits::create_visit,
        handlers::visits::list_visits,
        handlers::visits::get_visit,
        handlers::visits::update_visit,
        handlers::visits::delete_visit,
        handlers::stats::input_stats,
        handlers::stats::region_stats,
        handlers::stats::heatmap_stats,
        handlers::export::export_records,
        handlers::export::export_visits,
        handlers::address::search_address,
        handlers::system::health_handler,
    )
)]
pub struct ApiDoc;
