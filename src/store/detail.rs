//! Store for the movie detail screen.

use crate::app::{handle_detail_intent, DetailCommand, DetailIntent, DetailState};
use crate::domain::Movie;
use crate::service::MovieDetailService;
use std::sync::Arc;

/// Owner of one detail screen's state.
///
/// Detail fetches are awaited inline: [`DetailStore::dispatch`] returns once the
/// intent and any fetch it triggered have been fully applied.
pub struct DetailStore {
    state: DetailState,
    service: Arc<dyn MovieDetailService>,
}

impl DetailStore {
    pub fn new(service: Arc<dyn MovieDetailService>, movie: Movie) -> Self {
        Self {
            state: DetailState::new(movie),
            service,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &DetailState {
        &self.state
    }

    /// Applies `intent`, running any resulting fetch to completion.
    ///
    /// Returns `true` if the state changed.
    pub async fn dispatch(&mut self, intent: DetailIntent) -> bool {
        let mut next = Some(intent);
        let mut changed = false;

        while let Some(intent) = next.take() {
            let (step_changed, command) = handle_detail_intent(&mut self.state, intent);
            changed |= step_changed;

            if let Some(DetailCommand::Fetch { request, imdb_id }) = command {
                tracing::debug!(request, imdb_id = %imdb_id, "fetching movie details");
                next = Some(match self.service.fetch_movie_details(&imdb_id).await {
                    Ok(movie) => DetailIntent::DetailsSucceeded { request, movie },
                    Err(error) => DetailIntent::DetailsFailed { request, error },
                });
            }
        }

        changed
    }
}
