//! Commands describing asynchronous work to be executed by the coordinator.
//!
//! The transition function never performs I/O. Instead it returns at most one
//! [`Command`] per intent, and the [`FetchCoordinator`] turns commands into
//! spawned tasks whose outcomes come back as intents.
//!
//! # Example
//!
//! ```rust
//! use movieflix_core::app::{Command, ListState};
//!
//! let mut state = ListState::default();
//! let ticket = state.issue_ticket();
//! let command = Command::fetch(ticket, state.effective_query());
//! assert!(matches!(command, Command::Fetch(_)));
//! ```
//!
//! [`FetchCoordinator`]: crate::coordinator::FetchCoordinator

use crate::coordinator::{FetchRequest, FetchTicket};

/// Side effects produced by the list transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetches one page of results.
    ///
    /// Any previously in-flight fetch is cancelled before this one starts; its
    /// result would be stale anyway.
    Fetch(FetchRequest),

    /// Re-arms the search debounce timer.
    ///
    /// Cancels the pending timer, if any, and starts a new one. On expiry the
    /// coordinator sends `Intent::SearchDebounceElapsed { revision }`.
    ScheduleSearch {
        /// Search revision the timer belongs to.
        revision: u64,
    },
}

impl Command {
    /// Builds a fetch command for `ticket` with the given effective query.
    #[must_use]
    pub fn fetch(ticket: FetchTicket, query: &str) -> Self {
        Self::Fetch(FetchRequest {
            ticket,
            query: query.to_string(),
        })
    }
}
