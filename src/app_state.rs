//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{AddressClient, EquipmentService, StatsService, UserService, VisitService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Equipment and input-record operations.
    pub equipment_service: Arc<EquipmentService>,
    /// Account and grade operations.
    pub user_service: Arc<UserService>,
    /// Visit-collection operations.
    pub visit_service: Arc<VisitService>,
    /// Statistics reads.
    pub stats_service: Arc<StatsService>,
    /// Address-lookup upstream client.
    pub address_client: Arc<AddressClient>,
}
