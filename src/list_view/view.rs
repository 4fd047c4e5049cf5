//! Reducer keeping a list view, its URL and its remote page in agreement.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::list_view::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::list_view::params::QueryParams;
use crate::list_view::query::{ListQuery, ListResult, PageWindow};

/// Deadline applied to every page request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Tunables of a single list view.
#[derive(Clone, Copy, Debug)]
pub struct ListViewConfig {
    pub page_size: usize,
    pub search_debounce: Duration,
    pub fetch_timeout: Duration,
}

impl ListViewConfig {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            search_debounce: SEARCH_DEBOUNCE,
            fetch_timeout: FETCH_TIMEOUT,
        }
    }
}

/// Identifies one page request. Later requests get larger tickets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Page request the host must execute and answer with the same ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub search: String,
    pub window: PageWindow,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("failed to load rows: {0}")]
    Remote(String),

    #[error("request timed out")]
    TimedOut,
}

/// Result reported by a delete/update action triggered from the view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl MutationOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: None,
            error: Some(message.into()),
        }
    }
}

/// Transient message shown next to the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Side effects requested by [`ListView::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Shallow navigation to the given query string (no leading `?`).
    Navigate(String),
    Fetch(FetchRequest),
    Notify(Notice),
}

/// Inputs of the reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum Msg<T> {
    /// The address bar now holds this query string.
    UrlChanged(String),
    GoToPage(usize),
    NextPage,
    PreviousPage,
    /// Raw contents of the search box after a keystroke.
    SearchInput(String),
    /// Clock advanced; fires due debounces and timeouts.
    Tick,
    Loaded {
        ticket: Ticket,
        result: ListResult<T>,
    },
    LoadFailed {
        ticket: Ticket,
        error: FetchError,
    },
    Retry,
    Mutated(MutationOutcome),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle(ListQuery),
    Fetching(ListQuery),
    Loaded(ListQuery, ListResult<T>),
    Failed(ListQuery, FetchError),
}

impl<T> ViewState<T> {
    pub fn query(&self) -> &ListQuery {
        match self {
            ViewState::Idle(query)
            | ViewState::Fetching(query)
            | ViewState::Loaded(query, _)
            | ViewState::Failed(query, _) => query,
        }
    }
}

#[derive(Debug)]
struct InFlight {
    ticket: Ticket,
    deadline: Instant,
}

/// Pagination and search state of one table.
///
/// All effects leave through the returned [`Command`]s: the host performs the
/// navigation, runs the fetch and feeds the outcome back as a [`Msg`]. Only
/// the response carrying the ticket of the latest request is applied.
#[derive(Debug)]
pub struct ListView<T> {
    config: ListViewConfig,
    state: ViewState<T>,
    previous: Option<ListResult<T>>,
    params: QueryParams,
    search_input: String,
    debouncer: Debouncer<String>,
    next_ticket: u64,
    in_flight: Option<InFlight>,
}

impl<T> ListView<T> {
    pub fn new(config: ListViewConfig) -> Self {
        Self {
            config,
            state: ViewState::Idle(ListQuery::new(config.page_size)),
            previous: None,
            params: QueryParams::default(),
            search_input: String::new(),
            debouncer: Debouncer::new(config.search_debounce),
            next_ticket: 0,
            in_flight: None,
        }
    }

    /// Builds the view for the initial URL and issues its first fetch.
    pub fn mount(config: ListViewConfig, url: &str, now: Instant) -> (Self, Vec<Command>) {
        let mut view = Self::new(config);
        let commands = view.update(Msg::UrlChanged(url.to_string()), now);
        (view, commands)
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn query(&self) -> &ListQuery {
        self.state.query()
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Rows to display: the current page, or the last loaded one while a
    /// request is pending or has failed.
    pub fn visible(&self) -> Option<&ListResult<T>> {
        match &self.state {
            ViewState::Loaded(_, result) => Some(result),
            _ => self.previous.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            ViewState::Failed(_, error) => Some(error),
            _ => None,
        }
    }

    pub fn page_count(&self) -> usize {
        self.visible()
            .map(|result| result.page_count(self.config.page_size))
            .unwrap_or(0)
    }

    pub fn has_next(&self) -> bool {
        let pages = self.page_count();
        pages > 0 && self.query().page < pages
    }

    pub fn has_previous(&self) -> bool {
        self.query().page > 1
    }

    /// Earliest instant at which a [`Msg::Tick`] has something to do.
    pub fn next_wakeup(&self) -> Option<Instant> {
        let timeout = self.in_flight.as_ref().map(|flight| flight.deadline);
        match (self.debouncer.deadline(), timeout) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn update(&mut self, msg: Msg<T>, now: Instant) -> Vec<Command> {
        match msg {
            Msg::UrlChanged(raw) => self.on_url_changed(&raw, now),
            Msg::GoToPage(page) => self.go_to_page(page, now),
            Msg::NextPage => {
                if self.has_next() {
                    self.go_to_page(self.query().page + 1, now)
                } else {
                    Vec::new()
                }
            }
            Msg::PreviousPage => {
                if self.has_previous() {
                    self.go_to_page(self.query().page - 1, now)
                } else {
                    Vec::new()
                }
            }
            Msg::SearchInput(text) => {
                if text != self.search_input {
                    self.search_input = text.clone();
                    self.debouncer.schedule(text, now);
                }
                Vec::new()
            }
            Msg::Tick => self.on_tick(now),
            Msg::Loaded { ticket, result } => self.on_loaded(ticket, result, now),
            Msg::LoadFailed { ticket, error } => {
                if self.take_in_flight(ticket) {
                    log::warn!("List fetch failed: {error}");
                    let query = self.query().clone();
                    self.leave_state(ViewState::Failed(query, error));
                }
                Vec::new()
            }
            Msg::Retry => {
                let query = self.query().clone();
                vec![self.fetch(query, now)]
            }
            Msg::Mutated(outcome) => self.on_mutated(outcome, now),
        }
    }

    fn on_url_changed(&mut self, raw: &str, now: Instant) -> Vec<Command> {
        let params = QueryParams::parse(raw);
        let query = ListQuery::from_params(&params, self.config.page_size);
        self.params = params;

        let settled = matches!(
            self.state,
            ViewState::Fetching(_) | ViewState::Loaded(_, _)
        );
        if settled && *self.query() == query {
            return Vec::new();
        }

        self.debouncer.cancel();
        self.search_input = query.search.clone();
        vec![self.fetch(query, now)]
    }

    fn go_to_page(&mut self, page: usize, now: Instant) -> Vec<Command> {
        let page = page.max(1);
        if page == self.query().page {
            return Vec::new();
        }
        if self.visible().is_some() && page > self.page_count().max(1) {
            return Vec::new();
        }

        let query = self.query().clone().page(page);
        self.navigate(query, now)
    }

    fn on_tick(&mut self, now: Instant) -> Vec<Command> {
        let mut commands = Vec::new();

        if let Some(term) = self.debouncer.poll(now) {
            commands.extend(self.commit_search(&term, now));
        }

        let expired = self
            .in_flight
            .as_ref()
            .is_some_and(|flight| now >= flight.deadline);
        if expired {
            self.in_flight = None;
            log::warn!("List fetch timed out for {:?}", self.query());
            let query = self.query().clone();
            self.leave_state(ViewState::Failed(query, FetchError::TimedOut));
        }

        commands
    }

    fn commit_search(&mut self, term: &str, now: Instant) -> Vec<Command> {
        let query = self.query().clone().search(term).page(1);
        let settled = matches!(
            self.state,
            ViewState::Fetching(_) | ViewState::Loaded(_, _)
        );
        if settled && query == *self.query() {
            return Vec::new();
        }
        self.navigate(query, now)
    }

    fn on_loaded(&mut self, ticket: Ticket, result: ListResult<T>, now: Instant) -> Vec<Command> {
        if !self.take_in_flight(ticket) {
            return Vec::new();
        }

        let query = self.query().clone();
        let pages = result.page_count(self.config.page_size);
        let stranded = query.page > 1 && result.items.is_empty() && query.page > pages;

        self.state = ViewState::Loaded(query.clone(), result);
        self.previous = None;

        if stranded {
            log::debug!("Page {} is past the end, moving to page {pages}", query.page);
            return self.navigate(query.page(pages.max(1)), now);
        }
        Vec::new()
    }

    fn on_mutated(&mut self, outcome: MutationOutcome, now: Instant) -> Vec<Command> {
        if let Some(error) = outcome.error {
            return vec![Command::Notify(Notice::Error(error))];
        }

        let mut commands = Vec::new();
        if let Some(message) = outcome.success {
            commands.push(Command::Notify(Notice::Success(message)));
        }
        let query = self.query().clone();
        commands.push(self.fetch(query, now));
        commands
    }

    /// Returns whether `ticket` is the request currently awaited, retiring it.
    fn take_in_flight(&mut self, ticket: Ticket) -> bool {
        match &self.in_flight {
            Some(flight) if flight.ticket == ticket => {
                self.in_flight = None;
                true
            }
            _ => {
                log::debug!("Ignoring stale list response {ticket:?}");
                false
            }
        }
    }

    fn navigate(&mut self, query: ListQuery, now: Instant) -> Vec<Command> {
        query.write_params(&mut self.params);
        self.search_input = query.search.clone();
        let navigate = Command::Navigate(self.params.to_query_string());
        vec![navigate, self.fetch(query, now)]
    }

    fn fetch(&mut self, query: ListQuery, now: Instant) -> Command {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.in_flight = Some(InFlight {
            ticket,
            deadline: now + self.config.fetch_timeout,
        });

        let request = FetchRequest {
            ticket,
            search: query.search.clone(),
            window: query.window(),
        };
        self.leave_state(ViewState::Fetching(query));
        Command::Fetch(request)
    }

    /// Moves to `next`, keeping a loaded page visible until it is replaced.
    fn leave_state(&mut self, next: ViewState<T>) {
        if let ViewState::Loaded(_, result) = std::mem::replace(&mut self.state, next) {
            self.previous = Some(result);
        }
    }
}
