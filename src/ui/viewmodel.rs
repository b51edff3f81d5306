//! View model types representing renderable list state.
//!
//! View models are immutable and computed from state on demand. They contain no
//! business logic, only display-ready data.
//!
//! # Architecture
//!
//! View models are created via `ListState::compute_viewmodel()` and consumed by
//! whatever UI layer renders the list.
//!
//! # Example
//!
//! ```rust
//! use movieflix_core::app::ListState;
//!
//! let vm = ListState::default().compute_viewmodel();
//! assert!(vm.rows.is_empty());
//! assert!(!vm.spinners.any());
//! ```

use crate::app::modes::{LoadingPhase, SortOption};

/// Complete view model for one list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewModel {
    /// Movies in display order.
    pub rows: Vec<MovieRow>,

    /// Which of the four loading indicators to show.
    pub spinners: SpinnerFlags,

    /// Header information (title, result count).
    pub header: HeaderInfo,

    /// Error banner, if the last fetch failed.
    pub error: Option<ErrorBanner>,

    /// Empty state message, shown only when idle with no results and no error.
    pub empty_state: Option<EmptyState>,

    /// Whether reaching the end of the list should request another page.
    pub can_load_more: bool,

    /// Ordering the rows were sorted by.
    pub sort_option: SortOption,
}

/// Display information for a single movie row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    pub id: i64,
    pub title: String,
    /// Parsed release year, or an em dash when unknown.
    pub year_label: String,
    /// Rating with one decimal, or `N/A`.
    pub rating_label: String,
    pub poster_url: Option<String>,
}

/// Loading indicators, one per non-idle phase.
///
/// Derived from a single [`LoadingPhase`], so at most one flag is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpinnerFlags {
    /// Full-screen spinner for the first page of a category.
    pub initial: bool,
    /// Inline spinner in the search bar.
    pub search: bool,
    /// Footer spinner below the last row.
    pub pagination: bool,
    /// Pull-to-refresh indicator.
    pub refresh: bool,
}

impl SpinnerFlags {
    /// Maps a phase to its indicator.
    #[must_use]
    pub const fn from_phase(phase: LoadingPhase) -> Self {
        Self {
            initial: matches!(phase, LoadingPhase::LoadingInitial),
            search: matches!(phase, LoadingPhase::Searching),
            pagination: matches!(phase, LoadingPhase::LoadingNextPage),
            refresh: matches!(phase, LoadingPhase::Refreshing),
        }
    }

    /// Returns `true` if any indicator is shown.
    #[must_use]
    pub const fn any(self) -> bool {
        self.initial || self.search || self.pagination || self.refresh
    }
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Category display name, or the quoted search text.
    pub title: String,
    /// Number of loaded movies.
    pub count: usize,
}

/// Error banner display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    /// Human-readable failure description.
    pub message: String,

    /// `true` when the failed request was for page 2 or later.
    ///
    /// Lets a UI show a non-blocking notice under already loaded results instead
    /// of a full-screen error.
    pub is_pagination: bool,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No movies found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
