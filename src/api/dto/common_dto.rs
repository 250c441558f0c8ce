//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (max 100). Defaults to 20.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// Pagination metadata included in list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Whether rows exist beyond this page.
    pub has_more: bool,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl PageQuery {
    /// Clamps `page` to at least 1 and `per_page` into `1..=100`.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, 100),
        }
    }

    /// SQL limit for the clamped page.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    /// SQL offset for the clamped page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.per_page)
    }

    /// Builds the response metadata for this page.
    #[must_use]
    pub fn meta(&self, has_more: bool) -> PageMeta {
        PageMeta {
            page: self.page,
            per_page: self.per_page,
            has_more,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        let q = PageQuery { page: 0, per_page: 500 }.clamped();
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 100);
    }

    #[test]
    fn offset_is_zero_based() {
        let q = PageQuery { page: 3, per_page: 20 }.clamped();
        assert_eq!(q.offset(), 40);
        assert_eq!(q.limit(), 20);
    }

    #[test]
    fn defaults_apply_on_empty_query() {
        let q: PageQuery = serde_json::from_str("{}").ok().map_or(
            PageQuery { page: 0, per_page: 0 },
            |q| q,
        );
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 20);
    }
}
