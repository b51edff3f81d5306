//! List state and view model computation.
//!
//! This module defines [`ListState`], the single mutable record behind a movie
//! list screen, along with the bookkeeping helpers the transition function uses
//! and the derivation of the display-ready [`ListViewModel`].
//!
//! # State Components
//!
//! - **Movies**: results in page-arrival order
//! - **Phase**: the one active [`LoadingPhase`]
//! - **Query**: `selected_category` and `search_text`; search wins when non-empty
//! - **Pagination**: `current_page` and `has_more_pages`
//! - **Lineage**: `generation`, `request_seq`, `active_request` and
//!   `search_revision`, used to discard stale async results
//!
//! # Example
//!
//! ```rust
//! use movieflix_core::app::ListState;
//!
//! let state = ListState::default();
//! assert_eq!(state.selected_category, "action");
//! assert_eq!(state.current_page, 1);
//! assert!(state.has_more_pages);
//! assert_eq!(state.effective_query(), "action");
//! ```
//!
//! [`ListViewModel`]: crate::ui::viewmodel::ListViewModel

use super::modes::{LoadingPhase, SortOption};
use super::sorting::{fast_year, sort_movies};
use crate::coordinator::FetchTicket;
use crate::domain::category::{display_name, DEFAULT_CATEGORY};
use crate::domain::Movie;
use crate::ui::viewmodel::{EmptyState, ErrorBanner, HeaderInfo, ListViewModel, MovieRow, SpinnerFlags};

/// State of one movie list screen.
///
/// Created once per screen with [`ListState::new`] or [`Default`], mutated only
/// by [`handle_intent`](crate::app::handle_intent), and dropped with the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Currently displayed movies, in page-arrival order.
    pub movies: Vec<Movie>,

    /// The single active loading phase.
    pub phase: LoadingPhase,

    /// Description of the last failure; cleared when a new fetch starts.
    pub error_message: Option<String>,

    /// `false` once a page came back empty.
    pub has_more_pages: bool,

    /// Preset query used when `search_text` is empty.
    pub selected_category: String,

    /// Free-text query; takes precedence over `selected_category` when non-empty.
    pub search_text: String,

    /// Display ordering; never triggers a fetch.
    pub sort_option: SortOption,

    /// 1-based page the next fetch of the active query will request.
    pub current_page: u32,

    /// Query lineage, bumped whenever the query context resets.
    pub generation: u64,

    /// Last issued request id; ids are never reused.
    pub request_seq: u64,

    /// Ticket of the one request whose result may still be applied.
    pub active_request: Option<FetchTicket>,

    /// Revision of the latest search-text change; only its debounce may fire.
    pub search_revision: u64,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY)
    }
}

impl ListState {
    /// Creates a pristine state for the given category.
    #[must_use]
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            movies: Vec::new(),
            phase: LoadingPhase::Idle,
            error_message: None,
            has_more_pages: true,
            selected_category: category.into(),
            search_text: String::new(),
            sort_option: SortOption::Title,
            current_page: 1,
            generation: 0,
            request_seq: 0,
            active_request: None,
            search_revision: 0,
        }
    }

    /// The string actually sent to the search service.
    ///
    /// Free-text search if present, else the selected category.
    #[must_use]
    pub fn effective_query(&self) -> &str {
        if self.search_text.is_empty() {
            &self.selected_category
        } else {
            &self.search_text
        }
    }

    /// Returns `true` if nothing has been loaded or requested yet.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.movies.is_empty()
            && self.phase == LoadingPhase::Idle
            && self.current_page == 1
            && self.active_request.is_none()
    }

    /// Phase a fetch of the current page would enter.
    #[must_use]
    pub fn phase_for_fetch(&self) -> LoadingPhase {
        if self.current_page > 1 {
            LoadingPhase::LoadingNextPage
        } else if self.search_text.is_empty() {
            LoadingPhase::LoadingInitial
        } else {
            LoadingPhase::Searching
        }
    }

    /// Allocates a ticket for a fetch of the current page and marks it active.
    pub fn issue_ticket(&mut self) -> FetchTicket {
        self.request_seq += 1;
        let ticket = FetchTicket {
            id: self.request_seq,
            generation: self.generation,
            page: self.current_page,
        };
        self.active_request = Some(ticket);
        ticket
    }

    /// Returns `true` if `ticket` belongs to the request currently awaited.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.active_request.as_ref() == Some(ticket)
    }

    /// Drops any outstanding request and starts a new query lineage.
    ///
    /// Results for requests issued before this call will be discarded.
    pub fn begin_generation(&mut self) {
        self.generation += 1;
        self.active_request = None;
        self.phase = LoadingPhase::Idle;
    }

    /// Clears results and rewinds pagination to page 1.
    pub fn reset_results(&mut self) {
        self.movies.clear();
        self.current_page = 1;
        self.has_more_pages = true;
    }

    /// Computes the display-ready view of this state.
    ///
    /// Movies are sorted by `sort_option`; spinner flags are derived from the
    /// single phase, so at most one of them is ever set.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ListViewModel {
        let rows = sort_movies(&self.movies, self.sort_option)
            .iter()
            .map(Self::compute_row)
            .collect::<Vec<_>>();

        let error = self.error_message.as_ref().map(|message| ErrorBanner {
            message: message.clone(),
            is_pagination: self.current_page > 1,
        });

        let empty_state = if rows.is_empty() && !self.phase.is_active() && error.is_none() {
            Some(EmptyState {
                message: "No movies found".to_string(),
                subtitle: format!("Nothing matched \"{}\"", self.effective_query()),
            })
        } else {
            None
        };

        ListViewModel {
            rows,
            spinners: SpinnerFlags::from_phase(self.phase),
            header: self.compute_header(),
            error,
            empty_state,
            can_load_more: self.has_more_pages
                && !self.phase.is_active()
                && self.search_text.is_empty()
                && !self.movies.is_empty(),
            sort_option: self.sort_option,
        }
    }

    fn compute_row(movie: &Movie) -> MovieRow {
        let year = fast_year(movie.release_date.as_deref());
        MovieRow {
            id: movie.id,
            title: movie.title.clone(),
            year_label: if year > 0 { year.to_string() } else { "—".to_string() },
            rating_label: if movie.vote_average > 0.0 {
                format!("{:.1}", movie.vote_average)
            } else {
                "N/A".to_string()
            },
            poster_url: movie.poster_url(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = if self.search_text.is_empty() {
            display_name(&self.selected_category)
        } else {
            format!("Search: \"{}\"", self.search_text)
        };
        HeaderInfo {
            title,
            count: self.movies.len(),
        }
    }
}
