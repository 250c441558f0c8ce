//! binibot-console server entry point.
//!
//! Starts the Axum HTTP server backing the fleet admin console.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use binibot_console::api;
use binibot_console::app_state::AppState;
use binibot_console::config::ConsoleConfig;
use binibot_console::persistence::{
    EquipmentRepo, GradeRepo, StatsRepo, UserRepo, VisitRepo,
};
use binibot_console::service::{
    AddressClient, EquipmentService, StatsService, UserService, VisitService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ConsoleConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting binibot-console");

    // Connect to PostgreSQL and run pending migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Build service layer
    let equipment_service = Arc::new(EquipmentService::new(EquipmentRepo::new(pool.clone())));
    let user_service = Arc::new(UserService::new(
        UserRepo::new(pool.clone()),
        GradeRepo::new(pool.clone()),
        config.barcode_secret.clone(),
    ));
    let visit_service = Arc::new(VisitService::new(VisitRepo::new(pool.clone())));
    let stats_service = Arc::new(StatsService::new(StatsRepo::new(pool)));
    let address_client = Arc::new(AddressClient::new(
        config.address_lookup_url.clone(),
        config.address_lookup_timeout_secs,
    )?);

    // Build application state
    let app_state = AppState {
        equipment_service,
        user_service,
        visit_service,
        stats_service,
        address_client,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
