//! Slices list results into pages and builds navigation links.

use apikit_core::types::{PagingInfo, RequestPagingParams, SortDirection};
use apikit_core::urls::query_string;

/// Smallest page size served; smaller requests are raised to this.
pub const MIN_PER_PAGE: u64 = 5;

/// Page `data` according to `params`.
///
/// Without a requested page the input is returned untouched and no paging
/// block is produced. Pages use a 0-based offset of `(page - 1) * per_page`,
/// so consecutive pages partition the (optionally reversed) sequence.
/// Navigation links are built against `base_url`.
pub fn paginate<T>(
    mut data: Vec<T>,
    params: &RequestPagingParams,
    base_url: &str,
) -> (Vec<T>, Option<PagingInfo>) {
    let Some(requested) = params.page.filter(|p| *p > 0) else {
        return (data, None);
    };

    let sort = params.sort_direction;
    if sort.is_reverse() {
        data.reverse();
    }

    let count = data.len() as u64;
    if count == 0 {
        let first = page_link(base_url, 0, sort, 1);
        return (
            data,
            Some(PagingInfo {
                page: 1,
                per_page: 0,
                total_pages: 1,
                sort_direction: sort,
                total_results: 0,
                results_from: 0,
                results_to: 0,
                page_next: String::new(),
                page_previous: String::new(),
                page_first: first.clone(),
                page_last: first,
            }),
        );
    }

    let mut per_page = params
        .per_page
        .unwrap_or(MIN_PER_PAGE)
        .max(MIN_PER_PAGE)
        .min(count);
    let total_pages = count.div_ceil(per_page);
    let page = requested.min(total_pages);
    if total_pages <= 1 {
        per_page = count;
    }

    let offset = (page - 1) * per_page;
    let results_to = (offset + per_page).min(count);

    let page_next = if page + 1 >= total_pages {
        String::new()
    } else {
        page_link(base_url, per_page, sort, page + 1)
    };
    let page_previous = if page <= 1 {
        String::new()
    } else {
        page_link(base_url, per_page, sort, page - 1)
    };

    let info = PagingInfo {
        page,
        per_page,
        total_pages,
        sort_direction: sort,
        total_results: count,
        results_from: offset + 1,
        results_to,
        page_next,
        page_previous,
        page_first: page_link(base_url, per_page, sort, 1),
        page_last: page_link(base_url, per_page, sort, total_pages),
    };

    let items = data
        .into_iter()
        .skip(offset as usize)
        .take(per_page as usize)
        .collect();

    (items, Some(info))
}

fn page_link(base_url: &str, per_page: u64, sort: SortDirection, page: u64) -> String {
    let query = query_string([
        ("per_page", per_page.to_string()),
        ("sort_direction", sort.as_u8().to_string()),
        ("page", page.to_string()),
    ]);
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}{query}")
}
