//! Request and outcome types exchanged between the store and the coordinator.
//!
//! Every outbound fetch carries a [`FetchTicket`]. By the time a result arrives
//! the list may have switched category, restarted a search or been refreshed, so
//! the result must say which request it answers. The store applies it only if
//! the ticket is still the active one.

use crate::domain::{FetchError, Movie};
use serde::{Deserialize, Serialize};

/// Identity of one outbound page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchTicket {
    /// Monotonically increasing request id, unique per store.
    pub id: u64,

    /// Query lineage the request was issued under.
    pub generation: u64,

    /// 1-based page requested.
    pub page: u32,
}

/// A page fetch to be executed against the movie service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Identity used to match the outcome back to the request.
    pub ticket: FetchTicket,

    /// Effective query (search text or category key).
    pub query: String,
}

impl FetchRequest {
    /// Requested page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.ticket.page
    }
}

/// Result of executing a [`FetchRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The service returned a page; empty means no more results.
    Loaded {
        ticket: FetchTicket,
        movies: Vec<Movie>,
    },

    /// The service call failed.
    Failed {
        ticket: FetchTicket,
        error: FetchError,
    },
}

impl FetchOutcome {
    /// Wraps a service result under the ticket it answers.
    #[must_use]
    pub fn from_result(ticket: FetchTicket, result: Result<Vec<Movie>, FetchError>) -> Self {
        match result {
            Ok(movies) => Self::Loaded { ticket, movies },
            Err(error) => Self::Failed { ticket, error },
        }
    }
}
