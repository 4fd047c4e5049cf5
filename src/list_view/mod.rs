//! Pagination and search state shared by every table in the marketplace.
//!
//! A list view keeps three things in agreement: the page/search state held in
//! memory, the `page`/`search` parameters of the address bar, and the single
//! page of rows fetched from storage. [`ListView`] is a pure reducer: it takes
//! messages and an explicit `Instant` and answers with [`Command`]s the host
//! executes. The server side reuses [`ListQuery`] and [`QueryParams`] to decode
//! requests and to build pagination links with the same canonical URLs.

pub mod debounce;
pub mod params;
pub mod query;
pub mod source;
pub mod view;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use params::QueryParams;
pub use query::{ListQuery, ListResult, PAGE_PARAM, PageWindow, SEARCH_PARAM, page_count};
pub use source::{PageSource, settle};
pub use view::{
    Command, FETCH_TIMEOUT, FetchError, FetchRequest, ListView, ListViewConfig, MutationOutcome,
    Msg, Notice, Ticket, ViewState,
};
