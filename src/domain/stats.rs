//! Date bucketing for the statistics endpoints.
//!
//! Input-record rows are grouped by a formatted date key (one of
//! `YYYY-MM-DD`, ISO `YYYY-Www`, `YYYY-MM`, `YYYY`), summing the
//! collected amount and awarded points per key. Exactly one bucket is
//! produced per distinct key present in the data; missing periods are
//! not zero-filled.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ConsoleError;

/// Aggregation granularity for `GET /stats/inputs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    /// One bucket per calendar day (`YYYY-MM-DD`).
    Daily,
    /// One bucket per ISO week (`YYYY-Www`).
    Weekly,
    /// One bucket per calendar month (`YYYY-MM`).
    Monthly,
    /// One bucket per calendar year (`YYYY`).
    Yearly,
}

impl BucketKind {
    /// Parses the query-string form.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] on an unknown bucket name.
    pub fn parse(s: &str) -> Result<Self, ConsoleError> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(ConsoleError::Validation(format!(
                "unknown bucket kind: {other} (expected daily, weekly, monthly or yearly)"
            ))),
        }
    }

    /// Formats the bucket key for `date` at this granularity.
    ///
    /// Weekly keys use the ISO week-numbering year, so the first days
    /// of January may land in the previous year's final week.
    #[must_use]
    pub fn key_for(&self, date: NaiveDate) -> String {
        match self {
            Self::Daily => date.format("%Y-%m-%d").to_string(),
            Self::Weekly => {
                let iso = date.iso_week();
                format!("{:04}-W{:02}", iso.year(), iso.week())
            }
            Self::Monthly => date.format("%Y-%m").to_string(),
            Self::Yearly => date.format("%Y").to_string(),
        }
    }
}

/// One row of an input-record aggregation source: the collection date
/// plus the two summed measures.
#[derive(Debug, Clone, Copy)]
pub struct InputEvent {
    /// Collection date (UTC calendar date).
    pub date: NaiveDate,
    /// Collected amount in grams.
    pub amount_g: i64,
    /// Points awarded for the event.
    pub points: i64,
}

/// One aggregated bucket in a statistics response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatBucket {
    /// Formatted bucket key, e.g. `2026-08` or `2026-W34`.
    pub key: String,
    /// Summed collected amount in grams.
    pub total_amount_g: i64,
    /// Summed awarded points.
    pub total_points: i64,
    /// Number of collection events in the bucket.
    pub count: i64,
}

/// Buckets `events` at the given granularity, summing both measures
/// per key. Output is sorted ascending by key; the formatted keys are
/// zero-padded so lexicographic order matches chronological order.
#[must_use]
pub fn aggregate(events: &[InputEvent], kind: BucketKind) -> Vec<StatBucket> {
    let mut buckets: BTreeMap<String, (i64, i64, i64)> = BTreeMap::new();
    for event in events {
        let entry = buckets.entry(kind.key_for(event.date)).or_insert((0, 0, 0));
        entry.0 = entry.0.saturating_add(event.amount_g);
        entry.1 = entry.1.saturating_add(event.points);
        entry.2 = entry.2.saturating_add(1);
    }
    buckets
        .into_iter()
        .map(|(key, (total_amount_g, total_points, count))| StatBucket {
            key,
            total_amount_g,
            total_points,
            count,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
            panic!("valid test date");
        };
        date
    }

    fn event(y: i32, m: u32, d: u32, amount: i64, points: i64) -> InputEvent {
        InputEvent {
            date: date(y, m, d),
            amount_g: amount,
            points,
        }
    }

    #[test]
    fn monthly_key_format() {
        assert_eq!(BucketKind::Monthly.key_for(date(2026, 3, 7)), "2026-03");
    }

    #[test]
    fn weekly_key_uses_iso_week_year() {
        // 2027-01-01 is a Friday in ISO week 53 of 2026.
        assert_eq!(BucketKind::Weekly.key_for(date(2027, 1, 1)), "2026-W53");
        assert_eq!(BucketKind::Weekly.key_for(date(2026, 8, 23)), "2026-W34");
    }

    #[test]
    fn one_bucket_per_distinct_key() {
        let events = vec![
            event(2026, 1, 5, 100, 10),
            event(2026, 1, 20, 50, 5),
            event(2026, 2, 1, 70, 7),
        ];
        let out = aggregate(&events, BucketKind::Monthly);
        assert_eq!(out.len(), 2);
        let Some(jan) = out.first() else {
            panic!("missing january bucket");
        };
        assert_eq!(jan.key, "2026-01");
        assert_eq!(jan.total_amount_g, 150);
        assert_eq!(jan.total_points, 15);
        assert_eq!(jan.count, 2);
    }

    #[test]
    fn output_sorted_ascending_by_key() {
        let events = vec![
            event(2026, 12, 1, 1, 0),
            event(2026, 2, 1, 1, 0),
            event(2026, 7, 1, 1, 0),
        ];
        let keys: Vec<String> = aggregate(&events, BucketKind::Monthly)
            .into_iter()
            .map(|b| b.key)
            .collect();
        assert_eq!(keys, vec!["2026-02", "2026-07", "2026-12"]);
    }

    #[test]
    fn daily_and_yearly_keys() {
        let events = vec![event(2025, 11, 30, 10, 1), event(2026, 1, 2, 20, 2)];
        let daily = aggregate(&events, BucketKind::Daily);
        assert_eq!(
            daily.iter().map(|b| b.key.as_str()).collect::<Vec<_>>(),
            vec!["2025-11-30", "2026-01-02"]
        );
        let yearly = aggregate(&events, BucketKind::Yearly);
        assert_eq!(
            yearly.iter().map(|b| b.key.as_str()).collect::<Vec<_>>(),
            vec!["2025", "2026"]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(aggregate(&[], BucketKind::Daily).is_empty());
    }

    #[test]
    fn parse_bucket_kind() {
        assert_eq!(BucketKind::parse("weekly").ok(), Some(BucketKind::Weekly));
        assert!(BucketKind::parse("hourly").is_err());
    }
}
