//! Page links rendered under every table.

use serde::Serialize;

use crate::list_view::{ListQuery, ListResult, QueryParams};

/// Page numbers to show, with `None` marking a gap rendered as an ellipsis.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let past_last = last_page.saturating_add(1);
    let left_end = left_edge.saturating_add(1).min(past_last);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(past_last);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge).saturating_add(1));

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub page: usize,
    pub href: String,
}

/// One page of rows plus everything the pager template needs.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<PageLink>>,
    pub page: usize,
    pub page_count: usize,
    pub total_count: usize,
    pub search: String,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

impl<T> Paginated<T> {
    /// Builds page links that keep every unrelated parameter of `params`.
    pub fn new(result: ListResult<T>, query: &ListQuery, params: &QueryParams) -> Self {
        let page_count = result.page_count(query.page_size);
        let href = |page: usize| {
            let mut params = params.clone();
            query.clone().page(page).write_params(&mut params);
            params.to_href()
        };

        let pages = get_pages(page_count, query.page, 2, 2, 4, 2)
            .into_iter()
            .map(|page| page.map(|page| PageLink { page, href: href(page) }))
            .collect();

        Self {
            pages,
            page: query.page,
            page_count,
            total_count: result.total_count,
            search: query.search.clone(),
            previous: (query.page > 1).then(|| href(query.page - 1)),
            next: (query.page < page_count).then(|| href(query.page + 1)),
            last: (page_count > 0).then(|| href(page_count)),
            items: result.items,
        }
    }

    /// The requested page lies past the last one while rows still exist.
    pub fn is_stranded(&self) -> bool {
        self.page_count > 0 && self.page > self.page_count
    }

    /// Link to the last page when the requested one is stranded.
    pub fn stranded_redirect(&self) -> Option<&str> {
        if self.is_stranded() {
            self.last.as_deref()
        } else {
            None
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pages: self.pages,
            page: self.page,
            page_count: self.page_count,
            total_count: self.total_count,
            search: self.search,
            previous: self.previous,
            next: self.next,
            last: self.last,
        }
    }
}
