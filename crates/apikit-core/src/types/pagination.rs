//! Paging request parameters and the paging block of a response.

use serde::{Deserialize, Serialize};

use super::sorting::SortDirection;

/// Paging options parsed once per request.
///
/// Non-positive or non-numeric `page` / `per_page` values are treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestPagingParams {
    /// Requested page number (1-based); `None` disables paging.
    pub page: Option<u64>,
    /// Requested page size.
    pub per_page: Option<u64>,
    /// Whether to reverse the result order before paging.
    pub sort_direction: SortDirection,
}

impl RequestPagingParams {
    /// Build from raw query-string values.
    pub fn from_raw(page: Option<&str>, per_page: Option<&str>, sort_direction: Option<&str>) -> Self {
        Self {
            page: positive(page),
            per_page: positive(per_page),
            sort_direction: SortDirection::from_raw(sort_direction),
        }
    }

    /// Whether the caller asked for a page at all.
    pub fn is_paged(&self) -> bool {
        self.page.is_some_and(|p| p > 0)
    }
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .map(|v| v as u64)
}

/// Paging block attached to a paged response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    /// Page returned (after clamping).
    pub page: u64,
    /// Effective page size.
    pub per_page: u64,
    /// Number of pages.
    pub total_pages: u64,
    /// Order applied before slicing.
    pub sort_direction: SortDirection,
    /// Number of items across all pages.
    pub total_results: u64,
    /// 1-based index of the first item on this page (0 when empty).
    pub results_from: u64,
    /// 1-based index of the last item on this page (0 when empty).
    pub results_to: u64,
    /// URL of the next page, or empty.
    pub page_next: String,
    /// URL of the previous page, or empty.
    pub page_previous: String,
    /// URL of the first page.
    pub page_first: String,
    /// URL of the last page.
    pub page_last: String,
}
