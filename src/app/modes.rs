//! Loading phase and sort mode types for the list screen.
//!
//! # State Machine
//!
//! The list is in exactly one [`LoadingPhase`] at a time:
//! - **Idle**: no request outstanding
//! - **LoadingInitial**: first page of a category
//! - **Searching**: first page of a free-text search
//! - **LoadingNextPage**: page 2 or later of the current query
//! - **Refreshing**: pull-to-refresh, reloading page 1
//!
//! Because the phase is a single enum rather than four booleans, the four
//! spinners the UI shows can never overlap.
//!
//! [`SortOption`] is a display concern only and never triggers a fetch.
//!
//! # Example
//!
//! ```rust
//! use movieflix_core::app::modes::{LoadingPhase, SortOption};
//!
//! let phase = LoadingPhase::Searching;
//! assert!(phase.is_active());
//! assert_eq!(SortOption::Year.label(), "Year");
//! ```

use serde::{Deserialize, Serialize};

/// Mutually exclusive loading state of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadingPhase {
    /// Nothing in flight.
    #[default]
    Idle,

    /// Fetching page 1 of the selected category.
    LoadingInitial,

    /// Fetching page 1 of the free-text search.
    Searching,

    /// Fetching page 2 or later of the current query.
    LoadingNextPage,

    /// Reloading page 1 on user request; the current list stays visible.
    Refreshing,
}

impl LoadingPhase {
    /// Returns `true` for every phase other than [`LoadingPhase::Idle`].
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Ordering applied to the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOption {
    /// Ascending by title.
    #[default]
    Title,

    /// Descending by parsed release year, ties by title.
    Year,

    /// Descending by vote average.
    Rating,
}

impl SortOption {
    /// All options, in picker order.
    pub const ALL: [Self; 3] = [Self::Title, Self::Year, Self::Rating];

    /// Label shown in the sort picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Year => "Year",
            Self::Rating => "Rating",
        }
    }

    /// Parses a picker label or lowercase key (`"title"`, `"Year"`, ...).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|option| option.label().eq_ignore_ascii_case(label.trim()))
    }
}
