//! Service layer: per-resource orchestration over the repositories.
//!
//! Handlers never touch `sqlx` directly; each service owns its
//! repositories, runs domain validation, and logs state changes.

pub mod address_client;
pub mod equipment_service;
pub mod stats_service;
pub mod user_service;
pub mod visit_service;

pub use address_client::AddressClient;
pub use equipment_service::EquipmentService;
pub use stats_service::StatsService;
pub use user_service::UserService;
pub use visit_service::VisitService;
