//! Intent handling and state transition logic.
//!
//! This module implements the list transition function: given the current
//! [`ListState`] and an [`Intent`], it mutates the state and returns at most one
//! [`Command`] describing asynchronous work. It performs no I/O, so every rule
//! can be tested without timers or a network.
//!
//! # Architecture
//!
//! 1. Intents arrive from the UI or, as results, from the coordinator
//! 2. [`handle_intent`] pattern-matches the intent
//! 3. State mutations happen in place
//! 4. The returned command, if any, is executed by the coordinator
//!
//! # Intent Types
//!
//! - **Lifecycle**: `Appeared`, `RefreshRequested`, `RetryRequested`
//! - **Pagination**: `FetchRequested`, `LoadNextPageRequested`
//! - **Query**: `CategorySelected`, `SearchTextChanged`, `SearchDebounceElapsed`
//! - **Display**: `SortOptionChanged`
//! - **Results**: `FetchSucceeded`, `FetchFailed`
//!
//! # Example
//!
//! ```rust
//! use movieflix_core::app::{handle_intent, Command, Intent, ListState, LoadingPhase};
//!
//! let mut state = ListState::default();
//! let (changed, command) = handle_intent(&mut state, Intent::Appeared);
//! assert!(changed);
//! assert_eq!(state.phase, LoadingPhase::LoadingInitial);
//! assert!(matches!(command, Some(Command::Fetch(_))));
//! ```

use super::actions::Command;
use super::modes::{LoadingPhase, SortOption};
use super::state::ListState;
use crate::coordinator::{FetchOutcome, FetchTicket};
use crate::domain::{FetchError, Movie};

/// Events from the UI, the debounce timer, or completed fetches.
///
/// Intents are processed one at a time against the same state; the store
/// guarantees no two are handled concurrently.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// The list screen became visible; fetches only if nothing was loaded yet.
    Appeared,

    /// Fetch the current page of the effective query.
    FetchRequested,

    /// Advance pagination for the current query.
    LoadNextPageRequested,

    /// Pull-to-refresh: reload page 1 and replace the list on success.
    RefreshRequested,

    /// Switch the preset category.
    CategorySelected(String),

    /// Update the free-text query; the fetch is debounced.
    SearchTextChanged(String),

    /// Change the display ordering.
    SortOptionChanged(SortOption),

    /// A page fetch completed.
    FetchSucceeded {
        /// Ticket of the request this result answers.
        ticket: FetchTicket,
        /// Movies of the requested page; empty means no more pages.
        movies: Vec<Movie>,
    },

    /// A page fetch failed.
    FetchFailed {
        /// Ticket of the request this result answers.
        ticket: FetchTicket,
        /// Typed failure.
        error: FetchError,
    },

    /// Re-issue the fetch that failed.
    RetryRequested,

    /// The search debounce timer for `revision` expired.
    ///
    /// Sent by the coordinator, never by the UI.
    SearchDebounceElapsed {
        /// Revision the timer was armed for.
        revision: u64,
    },
}

impl Intent {
    /// Short name used in tracing spans; avoids logging whole result pages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Appeared => "appeared",
            Self::FetchRequested => "fetch_requested",
            Self::LoadNextPageRequested => "load_next_page_requested",
            Self::RefreshRequested => "refresh_requested",
            Self::CategorySelected(_) => "category_selected",
            Self::SearchTextChanged(_) => "search_text_changed",
            Self::SortOptionChanged(_) => "sort_option_changed",
            Self::FetchSucceeded { .. } => "fetch_succeeded",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::RetryRequested => "retry_requested",
            Self::SearchDebounceElapsed { .. } => "search_debounce_elapsed",
        }
    }
}

impl From<FetchOutcome> for Intent {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Loaded { ticket, movies } => Self::FetchSucceeded { ticket, movies },
            FetchOutcome::Failed { ticket, error } => Self::FetchFailed { ticket, error },
        }
    }
}

/// Processes an intent, mutates list state, and returns the command to execute.
///
/// # Returns
///
/// `(changed, command)`: `changed` is `true` when observers should be notified
/// of a new snapshot; `command` is the asynchronous work to start, if any.
///
/// # Tracing
///
/// Each call creates a debug-level span with the intent kind, generation and page.
#[allow(clippy::too_many_lines)]
pub fn handle_intent(state: &mut ListState, intent: Intent) -> (bool, Option<Command>) {
    let _span = tracing::debug_span!(
        "handle_intent",
        intent = intent.kind(),
        generation = state.generation,
        page = state.current_page
    )
    .entered();

    match intent {
        Intent::Appeared => {
            if !state.is_pristine() {
                tracing::debug!("list already populated, skipping fetch on appear");
                return (false, None);
            }
            start_fetch(state)
        }
        Intent::FetchRequested | Intent::RetryRequested => start_fetch(state),
        Intent::LoadNextPageRequested => {
            if !state.has_more_pages || state.phase.is_active() || !state.search_text.is_empty() {
                tracing::trace!(
                    has_more_pages = state.has_more_pages,
                    phase = ?state.phase,
                    searching = !state.search_text.is_empty(),
                    "next page not available"
                );
                return (false, None);
            }
            start_fetch(state)
        }
        Intent::RefreshRequested => {
            if state.phase == LoadingPhase::Refreshing {
                tracing::debug!("refresh already in progress");
                return (false, None);
            }

            state.begin_generation();
            state.search_revision += 1;
            state.current_page = 1;
            state.has_more_pages = true;
            state.error_message = None;
            state.phase = LoadingPhase::Refreshing;

            let ticket = state.issue_ticket();
            tracing::debug!(ticket = ticket.id, query = %state.effective_query(), "refreshing list");
            (true, Some(Command::fetch(ticket, state.effective_query())))
        }
        Intent::CategorySelected(category) => {
            if category == state.selected_category {
                return (false, None);
            }

            tracing::debug!(from = %state.selected_category, to = %category, "category selected");
            if !state.search_text.is_empty() {
                tracing::debug!(search_text = %state.search_text, "search text still takes precedence over category");
            }

            state.selected_category = category;
            state.reset_results();
            state.begin_generation();
            state.search_revision += 1;

            let (_, command) = start_fetch(state);
            (true, command)
        }
        Intent::SearchTextChanged(text) => {
            state.search_text = text;
            state.reset_results();
            state.begin_generation();
            state.search_revision += 1;

            tracing::trace!(query = %state.search_text, revision = state.search_revision, "search text updated");
            (
                true,
                Some(Command::ScheduleSearch {
                    revision: state.search_revision,
                }),
            )
        }
        Intent::SearchDebounceElapsed { revision } => {
            if revision != state.search_revision {
                tracing::debug!(revision, current = state.search_revision, "ignoring superseded debounce");
                return (false, None);
            }
            start_fetch(state)
        }
        Intent::SortOptionChanged(option) => {
            let changed = state.sort_option != option;
            state.sort_option = option;
            (changed, None)
        }
        Intent::FetchSucceeded { ticket, movies } => {
            if !state.is_current(&ticket) {
                tracing::debug!(ticket = ticket.id, ticket_generation = ticket.generation, "discarding stale result");
                return (false, None);
            }

            tracing::debug!(ticket = ticket.id, received = movies.len(), "page loaded");

            state.active_request = None;
            state.phase = LoadingPhase::Idle;
            state.error_message = None;
            state.has_more_pages = !movies.is_empty();

            if ticket.page <= 1 {
                state.current_page = if movies.is_empty() { 1 } else { 2 };
                state.movies = movies;
            } else {
                state.movies.extend(movies);
                state.current_page = ticket.page + 1;
            }

            (true, None)
        }
        Intent::FetchFailed { ticket, error } => {
            if !state.is_current(&ticket) {
                tracing::debug!(ticket = ticket.id, error = %error, "discarding stale failure");
                return (false, None);
            }

            tracing::debug!(ticket = ticket.id, page = ticket.page, error = %error, "page fetch failed");

            state.active_request = None;
            state.phase = LoadingPhase::Idle;
            state.error_message = Some(error.to_string());

            (true, None)
        }
    }
}

/// Starts a fetch of the current page if no other fetch is running.
fn start_fetch(state: &mut ListState) -> (bool, Option<Command>) {
    if state.phase.is_active() {
        tracing::debug!(phase = ?state.phase, "fetch already in progress");
        return (false, None);
    }
    if state.current_page > 1 && !state.has_more_pages {
        tracing::debug!("all pages loaded");
        return (false, None);
    }

    state.phase = state.phase_for_fetch();
    state.error_message = None;

    let ticket = state.issue_ticket();
    tracing::debug!(
        ticket = ticket.id,
        query = %state.effective_query(),
        phase = ?state.phase,
        "fetch started"
    );

    (true, Some(Command::fetch(ticket, state.effective_query())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        Movie::new(id, title, Some("2000"))
    }

    fn movies(count: usize) -> Vec<Movie> {
        (0..count)
            .map(|i| movie(i as i64 + 1, &format!("Movie {i}")))
            .collect()
    }

    fn expect_fetch(command: Option<Command>) -> (FetchTicket, String) {
        match command {
            Some(Command::Fetch(request)) => (request.ticket, request.query),
            other => panic!("expected fetch command, got {other:?}"),
        }
    }

    /// Returns a state with page 1 loaded and `current_page == 2`.
    fn loaded_state(titles: &[&str]) -> ListState {
        let mut state = ListState::default();
        let (ticket, _) = expect_fetch(handle_intent(&mut state, Intent::FetchRequested).1);
        let page = titles
            .iter()
            .enumerate()
            .map(|(i, t)| movie(i as i64 + 1, t))
            .collect();
        handle_intent(&mut state, Intent::FetchSucceeded { ticket, movies: page });
        state
    }

    #[test]
    fn appeared_fetches_only_when_pristine() {
        let mut state = ListState::default();
        let (ticket, query) = expect_fetch(handle_intent(&mut state, Intent::Appeared).1);
        assert_eq!(query, "action");
        assert_eq!(ticket.page, 1);
        assert_eq!(state.phase, LoadingPhase::LoadingInitial);

        handle_intent(&mut state, Intent::FetchSucceeded { ticket, movies: movies(3) });
        let before = state.clone();
        let (changed, command) = handle_intent(&mut state, Intent::Appeared);
        assert!(!changed);
        assert!(command.is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn requests_are_ignored_while_any_phase_is_active() {
        let mut active_states = Vec::new();

        let mut initial = ListState::default();
        handle_intent(&mut initial, Intent::FetchRequested);
        active_states.push(initial);

        let mut next_page = loaded_state(&["A", "B"]);
        handle_intent(&mut next_page, Intent::LoadNextPageRequested);
        active_states.push(next_page);

        let mut refreshing = loaded_state(&["A"]);
        handle_intent(&mut refreshing, Intent::RefreshRequested);
        active_states.push(refreshing);

        let mut searching = ListState::default();
        handle_intent(&mut searching, Intent::SearchTextChanged("bat".into()));
        let revision = searching.search_revision;
        handle_intent(&mut searching, Intent::SearchDebounceElapsed { revision });
        active_states.push(searching);

        let expected = [
            LoadingPhase::LoadingInitial,
            LoadingPhase::LoadingNextPage,
            LoadingPhase::Refreshing,
            LoadingPhase::Searching,
        ];

        for (mut state, phase) in active_states.into_iter().zip(expected) {
            assert_eq!(state.phase, phase);
            let before = state.clone();
            for intent in [Intent::FetchRequested, Intent::LoadNextPageRequested, Intent::RetryRequested] {
                let (changed, command) = handle_intent(&mut state, intent);
                assert!(!changed);
                assert!(command.is_none());
                assert_eq!(state, before);
            }
        }
    }

    #[test]
    fn later_pages_append_and_first_page_replaces() {
        let mut state = loaded_state(&["A", "B"]);
        assert_eq!(state.current_page, 2);

        let (ticket, _) = expect_fetch(handle_intent(&mut state, Intent::LoadNextPageRequested).1);
        assert_eq!(ticket.page, 2);
        handle_intent(
            &mut state,
            Intent::FetchSucceeded { ticket, movies: vec![movie(3, "C"), movie(4, "D")] },
        );
        let titles: Vec<_> = state.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
        assert_eq!(state.current_page, 3);

        let mut state = loaded_state(&["A", "B"]);
        let (ticket, _) = expect_fetch(handle_intent(&mut state, Intent::RefreshRequested).1);
        assert_eq!(ticket.page, 1);
        handle_intent(&mut state, Intent::FetchSucceeded { ticket, movies: vec![movie(9, "X")] });
        assert_eq!(state.movies, vec![movie(9, "X")]);
        assert_eq!(state.current_page, 2);
        assert_eq!(state.phase, LoadingPhase::Idle);
    }

    #[test]
    fn empty_page_exhausts_pagination() {
        let mut state = loaded_state(&["A", "B"]);
        let (ticket, _) = expect_fetch(handle_intent(&mut state, Intent::LoadNextPageRequested).1);
        handle_intent(&mut state, Intent::FetchSucceeded { ticket, movies: vec![] });

        assert!(!state.has_more_pages);
        assert_eq!(state.movies.len(), 2);

        let before = state.clone();
        let (changed, command) = handle_intent(&mut state, Intent::LoadNextPageRequested);
        assert!(!changed && command.is_none());
        assert_eq!(state, before);

        handle_intent(&mut state, Intent::CategorySelected("comedy".into()));
        assert!(state.has_more_pages);
    }

    #[test]
    fn empty_first_page_keeps_page_one() {
        let mut state = ListState::default();
        let (ticket, _) = expect_fetch(handle_intent(&mut state, Intent::FetchRequested).1);
        handle_intent(&mut state, Intent::FetchSucceeded { ticket, movies: vec![] });
        assert_eq!(state.current_page, 1);
        assert!(!state.has_more_pages);
        assert!(state.movies.is_empty());
    }

    #[test]
    fn fetch_and_retry_are_ignored_after_last_page() {
        let mut state = loaded_state(&["A", "B"]);
        let (ticket, _) = expect_fetch(handle_intent(&mut state, Intent::LoadNextPageRequested).1);
        handle_intent(&mut state, Intent::FetchSucceeded { ticket, movies: vec![] });

        assert_eq!(state.current_page, 3);
        assert!(!state.has_more_pages);
        assert_eq!(state.phase, LoadingPhase::Idle);

        let before = state.clone();
        for intent in [Intent::FetchRequested, Intent::RetryRequested] {
            let (changed, command) = handle_intent(&mut state, intent);
            assert!(!changed);
            assert!(command.is_none());
            assert_eq!(state, before);
        }
    }

    #[test]
    fn refresh_clears_standing_error() {
        let mut state = ListState::default();
        let (ticket, _) = expect_fetch(handle_intent(&mut state, Intent::FetchRequested).1);
        handle_intent(&mut state, Intent::FetchFailed { ticket, error: FetchError::Timeout });
        assert!(state.error_message.is_some());
        assert_eq!(state.phase, LoadingPhase::Idle);

        let (changed, command) = handle_intent(&mut state, Intent::RefreshRequested);
        assert!(changed);
        let (ticket, query) = expect_fetch(command);
        assert_eq!(ticket.page, 1);
        assert_eq!(query, "action");
        assert!(state.error_message.is_none());
        assert_eq!(state.phase, LoadingPhase::Refreshing);
        assert!(state.compute_viewmodel().error.is_none());
    }

    #[test]
    fn refresh_during_search_queries_search_text() {
        let mut state = ListState::default();
        handle_intent(&mut state, Intent::SearchTextChanged("alien".into()));
        let revision = state.search_revision;
        let (ticket, _) = expect_fetch(handle_intent(&mut state, Intent::SearchDebounceElapsed { revision }).1);
        handle_intent(&mut state, Intent::FetchSucceeded { ticket, movies: movies(2) });

        let (_, query) = expect_fetch(handle_intent(&mut state, Intent::RefreshRequested).1);
        assert_eq!(query, "alien");
        assert_eq!(state.search_revision, revision + 1);

        // A debounce armed before the refresh no longer fires.
        let (changed, command) = handle_intent(&mut state, Intent::SearchDebounceElapsed { revision });
        assert!(!changed);
        assert!(command.is_none());
    }

    #[test]
    fn failure_keeps_loaded_pages_and_retry_replays_same_page() {
        let mut state = loaded_state(&["A", "B"]);
        let (ticket, query) = expect_fetch(handle_intent(&mut state, Intent::LoadNextPageRequested).1);

        handle_intent(&mut state, Intent::FetchFailed { ticket, error: FetchError::Timeout });
        assert_eq!(state.phase, LoadingPhase::Idle);
        assert_eq!(state.error_message.as_deref(), Some("The request timed out"));
        assert_eq!(state.movies.len(), 2);
        assert_eq!(state.current_page, 2);
        assert!(state.has_more_pages);

        let (retry_ticket, retry_query) = expect_fetch(handle_intent(&mut state, Intent::RetryRequested).1);
        assert_eq!(retry_ticket.page, ticket.page);
        assert_eq!(retry_query, query);
        assert_ne!(retry_ticket.id, ticket.id);
        assert!(state.error_message.is_none());
        assert_eq!(state.phase, LoadingPhase::LoadingNextPage);
    }

    #[test]
    fn category_switch_resets_and_fetches_immediately() {
        let mut state = loaded_state(&["A", "B"]);
        let (changed, command) = handle_intent(&mut state, Intent::CategorySelected("action".into()));
        assert!(!changed && command.is_none());

        let (ticket, query) = expect_fetch(handle_intent(&mut state, Intent::CategorySelected("drama".into())).1);
        assert_eq!(query, "drama");
        assert_eq!(ticket.page, 1);
        assert!(state.movies.is_empty());
        assert_eq!(state.current_page, 1);
        assert_eq!(state.phase, LoadingPhase::LoadingInitial);
    }

    #[test]
    fn late_result_for_previous_category_is_discarded() {
        let mut state = ListState::default();
        let (old_ticket, _) = expect_fetch(handle_intent(&mut state, Intent::Appeared).1);

        let (new_ticket, query) = expect_fetch(handle_intent(&mut state, Intent::CategorySelected("comedy".into())).1);
        assert_eq!(query, "comedy");
        assert_ne!(old_ticket.generation, new_ticket.generation);

        let before = state.clone();
        let (changed, _) = handle_intent(
            &mut state,
            Intent::FetchSucceeded { ticket: old_ticket, movies: movies(20) },
        );
        assert!(!changed);
        assert_eq!(state, before);

        let (changed, _) = handle_intent(
            &mut state,
            Intent::FetchFailed { ticket: old_ticket, error: FetchError::NoData },
        );
        assert!(!changed);
        assert!(state.error_message.is_none());

        handle_intent(&mut state, Intent::FetchSucceeded { ticket: new_ticket, movies: movies(2) });
        assert_eq!(state.movies.len(), 2);
        assert_eq!(state.phase, LoadingPhase::Idle);
    }

    #[test]
    fn search_text_change_clears_list_and_schedules_debounce() {
        let mut state = loaded_state(&["A", "B"]);
        let (changed, command) = handle_intent(&mut state, Intent::SearchTextChanged("batman".into()));
        assert!(changed);
        assert_eq!(command, Some(Command::ScheduleSearch { revision: 1 }));
        assert!(state.movies.is_empty());
        assert_eq!(state.current_page, 1);
        assert!(state.has_more_pages);

        handle_intent(&mut state, Intent::SearchTextChanged("bat".into()));

        let (changed, command) = handle_intent(&mut state, Intent::SearchDebounceElapsed { revision: 1 });
        assert!(!changed && command.is_none());

        let (ticket, query) = expect_fetch(handle_intent(&mut state, Intent::SearchDebounceElapsed { revision: 2 }).1);
        assert_eq!(query, "bat");
        assert_eq!(ticket.page, 1);
        assert_eq!(state.phase, LoadingPhase::Searching);
    }

    #[test]
    fn search_text_change_abandons_in_flight_fetch() {
        let mut state = ListState::default();
        let (old_ticket, _) = expect_fetch(handle_intent(&mut state, Intent::Appeared).1);

        handle_intent(&mut state, Intent::SearchTextChanged("alien".into()));
        assert_eq!(state.phase, LoadingPhase::Idle);

        let (changed, _) = handle_intent(
            &mut state,
            Intent::FetchSucceeded { ticket: old_ticket, movies: movies(5) },
        );
        assert!(!changed);
        assert!(state.movies.is_empty());
    }

    #[test]
    fn pagination_is_disabled_while_searching() {
        let mut state = ListState::default();
        handle_intent(&mut state, Intent::SearchTextChanged("bat".into()));
        let revision = state.search_revision;
        let (ticket, _) = expect_fetch(handle_intent(&mut state, Intent::SearchDebounceElapsed { revision }).1);
        handle_intent(&mut state, Intent::FetchSucceeded { ticket, movies: movies(10) });
        assert_eq!(state.current_page, 2);

        let (changed, command) = handle_intent(&mut state, Intent::LoadNextPageRequested);
        assert!(!changed && command.is_none());
    }

    #[test]
    fn category_switch_keeps_search_precedence() {
        let mut state = ListState::default();
        handle_intent(&mut state, Intent::SearchTextChanged("matrix".into()));
        let (_, query) = expect_fetch(handle_intent(&mut state, Intent::CategorySelected("horror".into())).1);
        assert_eq!(query, "matrix");
        assert_eq!(state.selected_category, "horror");
    }

    #[test]
    fn category_switch_supersedes_pending_debounce() {
        let mut state = ListState::default();
        handle_intent(&mut state, Intent::SearchTextChanged("matrix".into()));
        let pending = state.search_revision;
        handle_intent(&mut state, Intent::CategorySelected("horror".into()));

        let (changed, command) = handle_intent(&mut state, Intent::SearchDebounceElapsed { revision: pending });
        assert!(!changed && command.is_none());
    }

    #[test]
    fn refresh_is_not_reentrant_and_overrides_pagination() {
        let mut state = loaded_state(&["A", "B"]);
        let (page_ticket, _) = expect_fetch(handle_intent(&mut state, Intent::LoadNextPageRequested).1);

        let (refresh_ticket, _) = expect_fetch(handle_intent(&mut state, Intent::RefreshRequested).1);
        assert_eq!(state.phase, LoadingPhase::Refreshing);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.movies.len(), 2, "refresh keeps the list until page 1 arrives");

        let (changed, command) = handle_intent(&mut state, Intent::RefreshRequested);
        assert!(!changed && command.is_none());

        let (changed, _) = handle_intent(
            &mut state,
            Intent::FetchSucceeded { ticket: page_ticket, movies: movies(4) },
        );
        assert!(!changed);

        handle_intent(&mut state, Intent::FetchSucceeded { ticket: refresh_ticket, movies: movies(1) });
        assert_eq!(state.movies.len(), 1);
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn sort_change_never_fetches() {
        let mut state = loaded_state(&["B", "A"]);
        let (changed, command) = handle_intent(&mut state, Intent::SortOptionChanged(SortOption::Rating));
        assert!(changed);
        assert!(command.is_none());
        assert_eq!(state.sort_option, SortOption::Rating);
        assert_eq!(state.phase, LoadingPhase::Idle);

        let (changed, _) = handle_intent(&mut state, Intent::SortOptionChanged(SortOption::Rating));
        assert!(!changed);
    }

    #[test]
    fn appear_fetch_then_exhaust_scenario() {
        let mut state = ListState::default();
        let (ticket, _) = expect_fetch(handle_intent(&mut state, Intent::Appeared).1);
        handle_intent(&mut state, Intent::FetchSucceeded { ticket, movies: movies(20) });
        assert_eq!(state.movies.len(), 20);
        assert_eq!(state.current_page, 2);
        assert_eq!(state.phase, LoadingPhase::Idle);

        let (ticket, _) = expect_fetch(handle_intent(&mut state, Intent::LoadNextPageRequested).1);
        handle_intent(&mut state, Intent::FetchSucceeded { ticket, movies: vec![] });
        assert!(!state.has_more_pages);
        assert_eq!(state.movies.len(), 20);
    }
}
