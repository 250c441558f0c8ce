//! Equipment (collection robot) entity and code validation.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::map_point::MapPoint;
use crate::error::ConsoleError;

/// Equipment codes look like `BB-0042`: the `BB-` prefix followed by
/// three to six digits.
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Literal pattern, always compiles.
    #[allow(clippy::unwrap_used)]
    let re = Regex::new(r"^BB-\d{3,6}$").unwrap();
    re
});

/// Type-safe equipment identifier.
///
/// Wraps a UUID v4 so equipment ids cannot be confused with user or
/// visit ids in handler signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentId(uuid::Uuid);

impl EquipmentId {
    /// Creates a new random `EquipmentId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates an `EquipmentId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for EquipmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for EquipmentId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

/// A collection robot installed at a fixed location.
///
/// Rows are never hard-deleted: decommissioning flips `usable` off and
/// the robot drops out of the heatmap while its history stays intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    /// Unique identifier.
    pub id: EquipmentId,
    /// Fleet code, e.g. `BB-0042`. Unique across the fleet.
    pub code: String,
    /// Human-readable install location.
    pub location: String,
    /// Administrative region the robot belongs to.
    pub region: String,
    /// Raw pixel position on the reference floor image.
    pub map_point: MapPoint,
    /// Whether the robot is in service.
    pub usable: bool,
    /// Running total of collected material in grams.
    pub total_input_g: i64,
    /// Running count of collection events.
    pub total_input_count: i64,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validates a fleet code against the `BB-NNN` format.
///
/// # Errors
///
/// Returns [`ConsoleError::Validation`] when the code does not match.
pub fn validate_code(code: &str) -> Result<(), ConsoleError> {
    if CODE_RE.is_match(code) {
        Ok(())
    } else {
        Err(ConsoleError::Validation(format!(
            "invalid equipment code: {code:?} (expected BB- followed by 3-6 digits)"
        )))
    }
}

/// Validates an install location: non-empty after trimming, at most
/// 200 characters.
///
/// # Errors
///
/// Returns [`ConsoleError::Validation`] on an empty or oversized value.
pub fn validate_location(location: &str) -> Result<(), ConsoleError> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(ConsoleError::Validation(
            "install location must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > 200 {
        return Err(ConsoleError::Validation(
            "install location exceeds 200 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_codes() {
        for code in ["BB-001", "BB-0042", "BB-123456"] {
            assert!(validate_code(code).is_ok(), "{code} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_codes() {
        for code in ["BB-01", "bb-0042", "BB-1234567", "XX-001", "BB-00a2", ""] {
            assert!(validate_code(code).is_err(), "{code} should be rejected");
        }
    }

    #[test]
    fn rejects_blank_location() {
        assert!(validate_location("   ").is_err());
        assert!(validate_location("1F lobby, Mapo-gu office").is_ok());
    }

    #[test]
    fn rejects_oversized_location() {
        let long = "x".repeat(201);
        assert!(validate_location(&long).is_err());
    }

    #[test]
    fn id_serde_is_transparent() {
        let id = EquipmentId::new();
        let json = serde_json::to_string(&id).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.starts_with('"'));
    }
}
