//! Membership grades: named point-range buckets.
//!
//! A grade is a named inclusive `[min_points, max_points]` range. A
//! user's grade is derived at read time from their cumulative point
//! total; it is never stored on the profile. Ranges must not overlap,
//! enforced at write time against the current grade table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// Type-safe grade identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeId(uuid::Uuid);

impl GradeId {
    /// Creates a new random `GradeId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `GradeId` from an existing [`uuid::Uuid`].
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

impl Default for GradeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named point-range bucket, e.g. `Green: [0, 999]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    /// Unique identifier.
    pub id: GradeId,
    /// Display name, unique across grades.
    pub name: String,
    /// Inclusive lower bound of the point range.
    pub min_points: i64,
    /// Inclusive upper bound of the point range.
    pub max_points: i64,
}

impl Grade {
    /// Returns `true` when `points` falls inside this grade's range.
    #[must_use]
    pub const fn contains(&self, points: i64) -> bool {
        self.min_points <= points && points <= self.max_points
    }

    /// Returns `true` when this grade's range intersects `other`'s.
    /// Ranges are inclusive on both ends, so touching bounds count as
    /// an overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.min_points <= other.max_points && other.min_points <= self.max_points
    }
}

/// Validates a candidate range and checks it against existing grades.
///
/// `exclude` carries the id of the grade being updated so it does not
/// collide with itself.
///
/// # Errors
///
/// Returns [`ConsoleError::Validation`] for an inverted range and
/// [`ConsoleError::GradeOverlap`] when the range intersects another
/// grade's.
pub fn check_range(
    candidate: &Grade,
    existing: &[Grade],
    exclude: Option<GradeId>,
) -> Result<(), ConsoleError> {
    if candidate.min_points > candidate.max_points {
        return Err(ConsoleError::Validation(format!(
            "inverted grade range: min {} > max {}",
            candidate.min_points, candidate.max_points
        )));
    }
    for grade in existing {
        if exclude == Some(grade.id) {
            continue;
        }
        if candidate.overlaps(grade) {
            return Err(ConsoleError::GradeOverlap {
                name: grade.name.clone(),
                min: grade.min_points,
                max: grade.max_points,
            });
        }
    }
    Ok(())
}

/// Classifies a point total against the grade table, returning the
/// grade whose range contains it.
#[must_use]
pub fn classify(points: i64, grades: &[Grade]) -> Option<&Grade> {
    grades.iter().find(|g| g.contains(points))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn grade(name: &str, min: i64, max: i64) -> Grade {
        Grade {
            id: GradeId::new(),
            name: name.to_string(),
            min_points: min,
            max_points: max,
        }
    }

    #[test]
    fn classify_picks_containing_range() {
        let grades = vec![
            grade("Green", 0, 999),
            grade("Silver", 1000, 4999),
            grade("Gold", 5000, 99_999),
        ];
        assert_eq!(classify(0, &grades).map(|g| g.name.as_str()), Some("Green"));
        assert_eq!(
            classify(999, &grades).map(|g| g.name.as_str()),
            Some("Green")
        );
        assert_eq!(
            classify(1000, &grades).map(|g| g.name.as_str()),
            Some("Silver")
        );
        assert_eq!(
            classify(5000, &grades).map(|g| g.name.as_str()),
            Some("Gold")
        );
    }

    #[test]
    fn classify_returns_none_outside_all_ranges() {
        let grades = vec![grade("Silver", 1000, 4999)];
        assert!(classify(500, &grades).is_none());
        assert!(classify(5000, &grades).is_none());
    }

    #[test]
    fn check_range_rejects_intersecting() {
        let existing = vec![grade("Green", 0, 999)];
        let candidate = grade("Silver", 999, 4999);
        assert!(check_range(&candidate, &existing, None).is_err());
    }

    #[test]
    fn check_range_accepts_adjacent() {
        let existing = vec![grade("Green", 0, 999)];
        let candidate = grade("Silver", 1000, 4999);
        assert!(check_range(&candidate, &existing, None).is_ok());
    }

    #[test]
    fn check_range_rejects_contained_range() {
        let existing = vec![grade("Silver", 1000, 4999)];
        let candidate = grade("Mid", 2000, 3000);
        assert!(check_range(&candidate, &existing, None).is_err());
    }

    #[test]
    fn check_range_rejects_inverted() {
        let candidate = grade("Broken", 100, 50);
        assert!(check_range(&candidate, &[], None).is_err());
    }

    #[test]
    fn check_range_skips_self_on_update() {
        let silver = grade("Silver", 1000, 4999);
        let mut updated = silver.clone();
        updated.max_points = 5999;
        let existing = vec![silver.clone()];
        assert!(check_range(&updated, &existing, Some(silver.id)).is_ok());
        assert!(check_range(&updated, &existing, None).is_err());
    }
}
