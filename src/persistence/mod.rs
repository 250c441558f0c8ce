//! PostgreSQL persistence layer: row models and per-entity repositories.

pub mod equipment_repo;
pub mod grade_repo;
pub mod models;
pub mod stats_repo;
pub mod user_repo;
pub mod visit_repo;

pub use equipment_repo::EquipmentRepo;
pub use grade_repo::GradeRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
pub use visit_repo::VisitRepo;

/// One page of rows plus the `has_more` flag for list endpoints.
///
/// `has_more` is `true` iff the page came back full and at least one
/// row exists beyond it. Repositories over-fetch `limit + 1` rows and
/// build the page with [`PageRows::from_overfetch`].
#[derive(Debug, Clone)]
pub struct PageRows<T> {
    /// At most `limit` rows.
    pub rows: Vec<T>,
    /// Whether rows exist beyond this page.
    pub has_more: bool,
}

impl<T> PageRows<T> {
    /// Builds a page from an over-fetched result of up to `limit + 1`
    /// rows, truncating the extra row.
    #[must_use]
    pub fn from_overfetch(mut rows: Vec<T>, limit: usize) -> Self {
        let has_more = rows.len() > limit;
        rows.truncate(limit);
        Self { rows, has_more }
    }
}

/// Escapes `%`, `_` and `\` so user keywords match literally in ILIKE.
pub(crate) fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn like_escaping() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn has_more_iff_overfetched() {
        let page = PageRows::from_overfetch(vec![1, 2, 3, 4], 3);
        assert!(page.has_more);
        assert_eq!(page.rows, vec![1, 2, 3]);

        let page = PageRows::from_overfetch(vec![1, 2, 3], 3);
        assert!(!page.has_more);
        assert_eq!(page.rows.len(), 3);

        let page = PageRows::from_overfetch(Vec::<i32>::new(), 3);
        assert!(!page.has_more);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn exactly_full_page_without_extra_row_is_last() {
        // A full page only reports more when the sentinel row exists.
        let page = PageRows::from_overfetch(vec![1, 2], 2);
        assert!(!page.has_more);
    }
}
