//! Command runner for the list store.
//!
//! The coordinator turns [`Command`]s into spawned tokio tasks and reports their
//! outcomes back to the store as [`Intent`]s. It owns two cancellation slots:
//! one for the in-flight page fetch and one for the search debounce timer.
//! Starting new work in a slot cancels whatever occupied it before.

use super::messages::{FetchOutcome, FetchRequest};
use crate::app::{Command, Intent};
use crate::service::MovieSearchService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Executes list commands against a movie search service.
///
/// Must be used from within a tokio runtime, since every command spawns a task.
pub struct FetchCoordinator {
    /// Injected search backend.
    service: Arc<dyn MovieSearchService>,

    /// Channel back into the owning store.
    outbox: UnboundedSender<Intent>,

    /// Quiet period before a search fires.
    debounce: Duration,

    /// Token of the in-flight fetch, if any.
    fetch_slot: Option<CancellationToken>,

    /// Token of the armed debounce timer, if any.
    search_slot: Option<CancellationToken>,
}

impl FetchCoordinator {
    pub fn new(service: Arc<dyn MovieSearchService>, outbox: UnboundedSender<Intent>, debounce: Duration) -> Self {
        Self {
            service,
            outbox,
            debounce,
            fetch_slot: None,
            search_slot: None,
        }
    }

    /// Starts the work described by `command`.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Fetch(request) => self.spawn_fetch(request),
            Command::ScheduleSearch { revision } => self.schedule_search(revision),
        }
    }

    /// Cancels the in-flight fetch and the pending debounce timer.
    pub fn shutdown(&mut self) {
        if let Some(token) = self.fetch_slot.take() {
            token.cancel();
        }
        if let Some(token) = self.search_slot.take() {
            token.cancel();
        }
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        let cancel = rearm(&mut self.fetch_slot);
        let ticket = request.ticket;
        let span = tracing::debug_span!(
            "fetch",
            ticket = ticket.id,
            generation = ticket.generation,
            page = ticket.page,
            query = %request.query
        );

        let future = self.service.fetch_movies(&request.query, request.page());
        let outbox = self.outbox.clone();

        tokio::spawn(
            async move {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => {
                        tracing::debug!("fetch cancelled");
                    }
                    result = future => {
                        let outcome = FetchOutcome::from_result(ticket, result);
                        log_outcome(&outcome);
                        if outbox.send(Intent::from(outcome)).is_err() {
                            tracing::debug!("store dropped, discarding fetch outcome");
                        }
                    }
                }
            }
            .instrument(span),
        );
    }

    fn schedule_search(&mut self, revision: u64) {
        // The list was cleared for the new text; the old page fetch is stale.
        if let Some(token) = self.fetch_slot.take() {
            token.cancel();
        }

        let cancel = rearm(&mut self.search_slot);
        let delay = self.debounce;
        let outbox = self.outbox.clone();
        let span = tracing::trace_span!("search_debounce", revision);

        tokio::spawn(
            async move {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => {
                        tracing::trace!("debounce superseded");
                    }
                    () = tokio::time::sleep(delay) => {
                        tracing::trace!("debounce elapsed");
                        let _ = outbox.send(Intent::SearchDebounceElapsed { revision });
                    }
                }
            }
            .instrument(span),
        );
    }
}

impl Drop for FetchCoordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Cancels the token in `slot` and installs a fresh one.
fn rearm(slot: &mut Option<CancellationToken>) -> CancellationToken {
    if let Some(previous) = slot.take() {
        previous.cancel();
    }
    let token = CancellationToken::new();
    *slot = Some(token.clone());
    token
}

/// Logs a fetch outcome with consistent fields.
fn log_outcome(outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Loaded { ticket, movies } => {
            tracing::debug!(ticket = ticket.id, count = movies.len(), "fetch completed");
        }
        FetchOutcome::Failed { ticket, error } => {
            tracing::debug!(ticket = ticket.id, error = %error, "fetch failed");
        }
    }
}
