//! Page/search description of a list view and the offset range derived from it.

use serde::Serialize;

use crate::list_view::params::QueryParams;

/// Query parameter holding the 1-based page number.
pub const PAGE_PARAM: &str = "page";
/// Query parameter holding the committed search term.
pub const SEARCH_PARAM: &str = "search";

/// Number of pages needed to show `total_count` rows, `page_size` at a time.
///
/// An empty result has zero pages, which disables forward navigation.
pub fn page_count(total_count: usize, page_size: usize) -> usize {
    if total_count == 0 {
        0
    } else {
        total_count.div_ceil(page_size.max(1))
    }
}

/// Largest page whose offset still fits a SQL `OFFSET` for `page_size`.
pub fn max_page(page_size: usize) -> usize {
    usize::try_from(i64::MAX).unwrap_or(usize::MAX) / page_size.max(1)
}

/// What page of data a list view wants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    /// 1-based page index.
    pub page: usize,
    /// Fixed number of rows per page.
    pub page_size: usize,
    /// Trimmed search term, empty when no filter is applied.
    pub search: String,
}

impl ListQuery {
    /// First page, unfiltered.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
        }
    }

    /// Sets the page, clamped to `1..=max_page(page_size)`.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page.clamp(1, max_page(self.page_size));
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_string();
        self
    }

    /// Search term when one is set.
    pub fn search_term(&self) -> Option<&str> {
        if self.search.is_empty() {
            None
        } else {
            Some(self.search.as_str())
        }
    }

    /// Offset range of the requested page.
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.page_size)
    }

    /// Decodes `page` and `search` from URL parameters.
    ///
    /// A missing, non-numeric or zero page falls back to the first page. Pages
    /// beyond [`max_page`] are clamped to it.
    pub fn from_params(params: &QueryParams, page_size: usize) -> Self {
        let page = params
            .get(PAGE_PARAM)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        let search = params.get(SEARCH_PARAM).unwrap_or_default();

        Self::new(page_size).page(page).search(search)
    }

    /// Writes `page` and `search` into `params`, keeping every other parameter.
    ///
    /// Defaults are removed rather than written so URLs stay canonical.
    pub fn write_params(&self, params: &mut QueryParams) {
        if self.page > 1 {
            params.set(PAGE_PARAM, self.page.to_string());
        } else {
            params.remove(PAGE_PARAM);
        }

        match self.search_term() {
            Some(term) => params.set(SEARCH_PARAM, term),
            None => params.remove(SEARCH_PARAM),
        }
    }

    /// Query string addressing `page` of the same search.
    pub fn page_href(&self, page: usize) -> String {
        let mut params = QueryParams::default();
        self.clone().page(page).write_params(&mut params);
        params.to_href()
    }
}

/// Offset/limit range derived from a [`ListQuery`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn new(page: usize, page_size: usize) -> Self {
        let start = (page.max(1) - 1).saturating_mul(page_size);
        Self {
            start,
            end: start.saturating_add(page_size),
        }
    }

    pub fn offset(&self) -> usize {
        self.start
    }

    pub fn limit(&self) -> usize {
        self.end - self.start
    }
}

/// One page of rows together with the number of rows matching the filter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

impl<T> ListResult<T> {
    pub fn new(items: Vec<T>, total_count: usize) -> Self {
        Self { items, total_count }
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        page_count(self.total_count, page_size)
    }
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_follows_page_and_size() {
        for page_size in [1, 7, 10, 25] {
            for page in 1..=20 {
                let window = PageWindow::new(page, page_size);
                assert_eq!(window.start, (page - 1) * page_size);
                assert_eq!(window.end, window.start + page_size);
                assert_eq!(window.limit(), page_size);
            }
        }
    }

    #[test]
    fn page_count_boundaries() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
    }

    #[test]
    fn query_survives_url_round_trip() {
        let queries = [
            ListQuery::new(10),
            ListQuery::new(10).page(4),
            ListQuery::new(10).search("ann"),
            ListQuery::new(10).page(2).search("night shift"),
        ];

        for query in queries {
            let mut params = QueryParams::default();
            query.write_params(&mut params);
            let encoded = params.to_query_string();
            let decoded = QueryParams::parse(&encoded);
            assert_eq!(ListQuery::from_params(&decoded, 10), query);
        }
    }

    #[test]
    fn first_page_is_omitted_from_url() {
        let mut params = QueryParams::default();
        ListQuery::new(10).write_params(&mut params);
        assert_eq!(params.to_query_string(), "");

        let decoded = ListQuery::from_params(&QueryParams::parse(""), 10);
        assert_eq!(decoded.page, 1);
    }

    #[test]
    fn bad_page_values_fall_back_to_first_page() {
        for raw in ["page=abc", "page=0", "page=-2", "page="] {
            let query = ListQuery::from_params(&QueryParams::parse(raw), 10);
            assert_eq!(query.page, 1, "{raw}");
        }
    }

    #[test]
    fn huge_pages_are_clamped() {
        let raw = format!("page={}", usize::MAX);
        let query = ListQuery::from_params(&QueryParams::parse(&raw), 10);
        assert_eq!(query.page, max_page(10));

        let window = query.window();
        assert!(i64::try_from(window.end).is_ok());
        assert_eq!(window.limit(), 10);

        let query = ListQuery::from_params(&QueryParams::parse("page=1844674407370955162"), 10);
        assert_eq!(query.window().limit(), 10);
    }

    #[test]
    fn window_saturates_instead_of_overflowing() {
        let window = PageWindow::new(usize::MAX, 10);
        assert_eq!(window.end, usize::MAX);
        assert!(window.start <= window.end);
    }

    #[test]
    fn page_href_keeps_search() {
        let query = ListQuery::new(10).search("ann");
        assert_eq!(query.page_href(2), "?page=2&search=ann");
        assert_eq!(query.page_href(1), "?search=ann");
        assert_eq!(ListQuery::new(10).page_href(1), "?");
    }
}
