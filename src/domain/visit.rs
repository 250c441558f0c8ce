//! Visit records: manually logged, non-robot collection events.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// Type-safe visit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitId(uuid::Uuid);

impl VisitId {
    /// Creates a new random `VisitId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `VisitId` from an existing [`uuid::Uuid`].
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

impl Default for VisitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One manual visit collection tied to a scheduled customer visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Unique identifier.
    pub id: VisitId,
    /// Customer display name.
    pub customer_name: String,
    /// Customer mobile number, digits only.
    pub phone: String,
    /// Pickup address.
    pub address: String,
    /// Scheduled visit date.
    pub visit_date: NaiveDate,
    /// Collected amount in grams.
    pub amount_g: i64,
    /// Free-form operator note.
    pub note: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validates visit fields shared by create and update: non-empty
/// customer name and address, positive amount.
///
/// # Errors
///
/// Returns [`ConsoleError::Validation`] on the first failing field.
pub fn validate_fields(
    customer_name: &str,
    address: &str,
    amount_g: i64,
) -> Result<(), ConsoleError> {
    if customer_name.trim().is_empty() {
        return Err(ConsoleError::Validation(
            "customer name must not be empty".to_string(),
        ));
    }
    if address.trim().is_empty() {
        return Err(ConsoleError::Validation(
            "address must not be empty".to_string(),
        ));
    }
    if amount_g <= 0 {
        return Err(ConsoleError::Validation(format!(
            "collected amount must be positive, got {amount_g}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_fields() {
        assert!(validate_fields("Kim Jiwoo", "12 Mapo-daero, Seoul", 1500).is_ok());
    }

    #[test]
    fn rejects_blank_name_or_address() {
        assert!(validate_fields("  ", "12 Mapo-daero", 100).is_err());
        assert!(validate_fields("Kim", "", 100).is_err());
    }

    #[test]
    fn rejects_non_positive_amount() {
        assert!(validate_fields("Kim", "addr", 0).is_err());
        assert!(validate_fields("Kim", "addr", -5).is_err());
    }
}
