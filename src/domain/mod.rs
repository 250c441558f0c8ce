//! Domain layer: core entity types and the pure logic behind them.
//!
//! This module contains the server-side domain model for the fleet
//! console: equipment identity and map placement, user profiles with
//! phone/email validation, grade ranges and classification, visit
//! records, input-record date bucketing, and barcode payloads.

pub mod barcode;
pub mod equipment;
pub mod grade;
pub mod map_point;
pub mod stats;
pub mod user;
pub mod visit;

pub use equipment::{Equipment, EquipmentId};
pub use grade::{Grade, GradeId};
pub use map_point::{MapPoint, NormalizedPoint};
pub use stats::{BucketKind, StatBucket};
pub use user::{UserId, UserProfile, UserRole, UserStatus};
pub use visit::{VisitId, VisitRecord};
