//! Stores owning list and detail state.
//!
//! [`ListStore`] is the single writer of a [`ListState`]: UI intents enter
//! through [`ListStore::dispatch`], coordinator results through
//! [`ListStore::process_next`], and every accepted change is published on a
//! `watch` channel. [`StoreHandle`] moves a store into its own tokio task for
//! callers that prefer message passing over `&mut` access.
//!
//! # Example
//!
//! ```no_run
//! use movieflix_core::app::Intent;
//! use movieflix_core::service::MockMovieService;
//! use movieflix_core::store::ListStore;
//! use movieflix_core::Config;
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let mut store = ListStore::new(Arc::new(MockMovieService::new()), &Config::default());
//! store.dispatch(Intent::Appeared);
//! store.process_next().await;
//! println!("{} movies", store.state().movies.len());
//! # }
//! ```

pub mod detail;

pub use detail::DetailStore;

use crate::app::{handle_intent, Intent, ListState};
use crate::coordinator::FetchCoordinator;
use crate::domain::{MovieFlixError, Result};
use crate::service::MovieSearchService;
use crate::ui::viewmodel::ListViewModel;
use crate::Config;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Owner of one movie list's state and its pending async work.
pub struct ListStore {
    state: ListState,
    coordinator: FetchCoordinator,
    inbox: UnboundedReceiver<Intent>,
    published: watch::Sender<ListState>,
}

impl ListStore {
    /// Creates a store for `config.default_category` using `service` for fetches.
    pub fn new(service: Arc<dyn MovieSearchService>, config: &Config) -> Self {
        Self::with_state(service, crate::initialize(config), config.search_debounce())
    }

    /// Creates a store starting from an existing state.
    pub fn with_state(service: Arc<dyn MovieSearchService>, state: ListState, debounce: Duration) -> Self {
        let (outbox, inbox) = unbounded_channel();
        let (published, _) = watch::channel(state.clone());
        Self {
            state,
            coordinator: FetchCoordinator::new(service, outbox, debounce),
            inbox,
            published,
        }
    }

    /// Applies an intent, starts its command, and publishes the new state.
    ///
    /// Returns `true` if the state changed.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        let (changed, command) = handle_intent(&mut self.state, intent);

        if let Some(command) = command {
            self.coordinator.execute(command);
        }
        if changed {
            self.published.send_replace(self.state.clone());
        }
        changed
    }

    /// Waits for the next coordinator result (fetch outcome or debounce expiry)
    /// and applies it.
    ///
    /// Returns `true` if the state changed. Only call this while work is pending;
    /// with nothing in flight it waits forever.
    pub async fn process_next(&mut self) -> bool {
        match self.inbox.recv().await {
            Some(intent) => self.dispatch(intent),
            None => false,
        }
    }

    /// Applies every coordinator result that has already arrived.
    ///
    /// Returns the number of results processed.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(intent) = self.inbox.try_recv() {
            self.dispatch(intent);
            processed += 1;
        }
        processed
    }

    #[must_use]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ListState {
        self.state.clone()
    }

    /// Receiver observing every published state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.published.subscribe()
    }

    /// Display-ready view of the current state.
    #[must_use]
    pub fn view(&self) -> ListViewModel {
        self.state.compute_viewmodel()
    }

    /// Cancels pending fetches and timers.
    pub fn shutdown(&mut self) {
        self.coordinator.shutdown();
    }

    /// Moves the store into a tokio task and returns a handle to it.
    pub fn spawn(self) -> StoreHandle {
        let (sender, receiver) = unbounded_channel();
        let updates = self.subscribe();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(self, receiver, cancel.clone()));

        StoreHandle {
            sender,
            updates,
            cancel,
            task,
        }
    }
}

/// Drains UI intents and coordinator results, one at a time, until cancelled.
async fn run(mut store: ListStore, mut intents: UnboundedReceiver<Intent>, cancel: CancellationToken) -> ListState {
    tracing::debug!(category = %store.state.selected_category, "list store started");

    loop {
        let intent = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            Some(intent) = store.inbox.recv() => intent,
            received = intents.recv() => match received {
                Some(intent) => intent,
                None => break,
            },
        };
        store.dispatch(intent);
    }

    store.shutdown();
    tracing::debug!("list store stopped");
    store.state
}

/// Handle to a [`ListStore`] running in its own task.
pub struct StoreHandle {
    sender: UnboundedSender<Intent>,
    updates: watch::Receiver<ListState>,
    cancel: CancellationToken,
    task: JoinHandle<ListState>,
}

impl StoreHandle {
    /// Queues an intent for the store task.
    ///
    /// # Errors
    ///
    /// Returns [`MovieFlixError::StoreClosed`] if the task has stopped.
    pub fn dispatch(&self, intent: Intent) -> Result<()> {
        self.sender.send(intent).map_err(|_| MovieFlixError::StoreClosed)
    }

    /// Receiver observing every published state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.updates.clone()
    }

    /// Stops the store task and returns its final state.
    pub async fn shutdown(self) -> ListState {
        self.cancel.cancel();
        match self.task.await {
            Ok(state) => state,
            Err(e) => {
                tracing::debug!(error = %e, "list store task failed");
                self.updates.borrow().clone()
            }
        }
    }
}
