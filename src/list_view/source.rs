//! Remote page providers and a synchronous driver for [`ListView`].

use std::collections::VecDeque;
use std::time::Instant;

use crate::list_view::query::{ListResult, PageWindow};
use crate::list_view::view::{Command, FetchError, ListView, Msg};

/// Fetches one page of rows plus the number of rows matching `search`.
///
/// Implementations must filter the count and the rows with the same
/// predicate, otherwise the page count drifts from the reachable pages.
pub trait PageSource<T> {
    fn fetch_page(&self, search: &str, window: PageWindow) -> Result<ListResult<T>, FetchError>;
}

impl<T, F> PageSource<T> for F
where
    F: Fn(&str, PageWindow) -> Result<ListResult<T>, FetchError>,
{
    fn fetch_page(&self, search: &str, window: PageWindow) -> Result<ListResult<T>, FetchError> {
        self(search, window)
    }
}

/// Runs every fetch in `commands` against `source` and feeds the results back.
///
/// Follow-up fetches are executed too. Navigation and notices are returned in
/// the order they were produced.
pub fn settle<T, S>(
    view: &mut ListView<T>,
    source: &S,
    commands: Vec<Command>,
    now: Instant,
) -> Vec<Command>
where
    S: PageSource<T> + ?Sized,
{
    let mut queue: VecDeque<Command> = commands.into();
    let mut remaining = Vec::new();

    while let Some(command) = queue.pop_front() {
        match command {
            Command::Fetch(request) => {
                let msg = match source.fetch_page(&request.search, request.window) {
                    Ok(result) => Msg::Loaded {
                        ticket: request.ticket,
                        result,
                    },
                    Err(error) => Msg::LoadFailed {
                        ticket: request.ticket,
                        error,
                    },
                };
                queue.extend(view.update(msg, now));
            }
            other => remaining.push(other),
        }
    }

    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list_view::view::{ListViewConfig, ViewState};

    fn names() -> Vec<String> {
        ["Anna", "Bob", "Joanne", "Hannah", "Carl", "Dana", "Ann-Marie"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn source(search: &str, window: PageWindow) -> Result<ListResult<String>, FetchError> {
        let needle = search.to_lowercase();
        let matching: Vec<String> = names()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect();
        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(window.offset())
            .take(window.limit())
            .collect();
        Ok(ListResult::new(items, total))
    }

    #[test]
    fn settle_loads_the_mounted_page() {
        let now = Instant::now();
        let config = ListViewConfig::new(2);
        let (mut view, commands) = ListView::mount(config, "?search=ann", now);

        let remaining = settle(&mut view, &source, commands, now);

        assert!(remaining.is_empty());
        match view.state() {
            ViewState::Loaded(query, result) => {
                assert_eq!(query.search, "ann");
                assert_eq!(result.total_count, 4);
                assert_eq!(result.items, vec!["Anna", "Joanne"]);
            }
            other => panic!("unexpected state {other:?}"),
        }
        assert_eq!(view.page_count(), 2);
    }

    #[test]
    fn settle_follows_up_on_stranded_page() {
        let now = Instant::now();
        let config = ListViewConfig::new(2);
        let (mut view, commands) = ListView::mount(config, "?page=9", now);

        let remaining = settle(&mut view, &source, commands, now);

        assert_eq!(remaining, vec![Command::Navigate("page=4".to_string())]);
        assert_eq!(view.query().page, 4);
        assert_eq!(view.visible().map(|r| r.items.clone()), Some(vec!["Ann-Marie".to_string()]));
    }

    #[test]
    fn settle_surfaces_failures() {
        let now = Instant::now();
        let failing = |_: &str, _: PageWindow| -> Result<ListResult<String>, FetchError> {
            Err(FetchError::Remote("database is locked".into()))
        };
        let (mut view, commands) = ListView::mount(ListViewConfig::new(2), "", now);

        settle(&mut view, &failing, commands, now);

        assert_eq!(
            view.error(),
            Some(&FetchError::Remote("database is locked".into()))
        );
    }
}
