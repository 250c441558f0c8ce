//! # binibot-console
//!
//! REST API backend for the BiniBot recycling-robot fleet
//! administrative console.
//!
//! The browser console renders dashboards, fleet maps, statistics
//! charts, and CRUD forms; this crate is the JSON service behind those
//! screens. It owns validation, grade classification, date-bucketed
//! aggregation, and PostgreSQL persistence.
//!
//! ## Architecture
//!
//! ```text
//! Browser console (HTTP/JSON)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── EquipmentService / UserService /
//!     │   VisitService / StatsService (service/)
//!     ├── AddressClient → external address-search upstream
//!     │
//!     ├── Domain logic: validation, grades, bucketing (domain/)
//!     │
//!     └── PostgreSQL repositories (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
