//! Movie detail state and its transition function.
//!
//! A detail screen starts from the (partial) movie picked in the list and
//! upgrades it with a single detail fetch. Only one request is awaited at a
//! time; results for any other request id are ignored.

use crate::domain::{FetchError, Movie};

/// State of one movie detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    /// Movie as it appeared in the list.
    pub movie: Movie,

    /// Fully populated movie, once loaded.
    pub detailed: Option<Movie>,

    pub is_loading: bool,
    pub error_message: Option<String>,

    /// Id of the request whose result may still be applied.
    pub active_request: Option<u64>,

    /// Last issued request id.
    pub request_seq: u64,
}

impl DetailState {
    /// Creates detail state for `movie`.
    ///
    /// Movies that already carry detail fields start out loaded.
    #[must_use]
    pub fn new(movie: Movie) -> Self {
        let detailed = movie.has_complete_data().then(|| movie.clone());
        Self {
            movie,
            detailed,
            is_loading: false,
            error_message: None,
            active_request: None,
            request_seq: 0,
        }
    }

    /// The richest version of the movie available.
    #[must_use]
    pub fn display_movie(&self) -> &Movie {
        self.detailed.as_ref().unwrap_or(&self.movie)
    }
}

/// Events handled by the detail screen.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailIntent {
    /// The screen became visible; fetches unless details are already present.
    Appeared,
    FetchRequested,
    DetailsSucceeded { request: u64, movie: Movie },
    DetailsFailed { request: u64, error: FetchError },
    RetryRequested,
}

/// Work requested by the detail transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailCommand {
    /// Fetch full details for `imdb_id`, answering with `request`.
    Fetch { request: u64, imdb_id: String },
}

/// Processes a detail intent, returning `(changed, command)`.
pub fn handle_detail_intent(state: &mut DetailState, intent: DetailIntent) -> (bool, Option<DetailCommand>) {
    let _span = tracing::debug_span!("handle_detail_intent", movie_id = state.movie.id).entered();

    match intent {
        DetailIntent::Appeared => {
            if state.detailed.is_some() {
                tracing::debug!("details already present");
                return (false, None);
            }
            start_fetch(state)
        }
        DetailIntent::FetchRequested | DetailIntent::RetryRequested => start_fetch(state),
        DetailIntent::DetailsSucceeded { request, movie } => {
            if state.active_request != Some(request) {
                tracing::debug!(request, "discarding stale detail result");
                return (false, None);
            }
            tracing::debug!(request, title = %movie.title, "details loaded");
            state.active_request = None;
            state.is_loading = false;
            state.error_message = None;
            state.detailed = Some(movie);
            (true, None)
        }
        DetailIntent::DetailsFailed { request, error } => {
            if state.active_request != Some(request) {
                tracing::debug!(request, "discarding stale detail failure");
                return (false, None);
            }
            tracing::debug!(request, error = %error, "detail fetch failed");
            state.active_request = None;
            state.is_loading = false;
            state.error_message = Some(error.to_string());
            (true, None)
        }
    }
}

fn start_fetch(state: &mut DetailState) -> (bool, Option<DetailCommand>) {
    if state.is_loading {
        return (false, None);
    }

    state.request_seq += 1;
    state.active_request = Some(state.request_seq);
    state.is_loading = true;
    state.error_message = None;

    let command = DetailCommand::Fetch {
        request: state.request_seq,
        imdb_id: state.movie.imdb_id(),
    };
    (true, Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_result() -> Movie {
        Movie::new(133093, "The Matrix", Some("1999"))
    }

    fn full_movie() -> Movie {
        let mut movie = search_result().with_rating(8.7);
        movie.overview = Some("A hacker learns the truth.".into());
        movie.staff = Some(vec!["Director: Lana Wachowski, Lilly Wachowski".into()]);
        movie.runtime = Some(136);
        movie
    }

    #[test]
    fn appear_fetches_by_imdb_id() {
        let mut state = DetailState::new(search_result());
        let (changed, command) = handle_detail_intent(&mut state, DetailIntent::Appeared);
        assert!(changed);
        assert_eq!(
            command,
            Some(DetailCommand::Fetch { request: 1, imdb_id: "tt0133093".into() })
        );
        assert!(state.is_loading);

        let (changed, command) = handle_detail_intent(&mut state, DetailIntent::FetchRequested);
        assert!(!changed && command.is_none());
    }

    #[test]
    fn complete_movie_skips_fetch_on_appear() {
        let mut state = DetailState::new(full_movie());
        assert!(state.detailed.is_some());
        let (changed, command) = handle_detail_intent(&mut state, DetailIntent::Appeared);
        assert!(!changed && command.is_none());
    }

    #[test]
    fn success_replaces_display_movie() {
        let mut state = DetailState::new(search_result());
        assert_eq!(state.display_movie().runtime, None);

        handle_detail_intent(&mut state, DetailIntent::Appeared);
        handle_detail_intent(&mut state, DetailIntent::DetailsSucceeded { request: 1, movie: full_movie() });

        assert!(!state.is_loading);
        assert_eq!(state.display_movie().runtime, Some(136));
        assert_eq!(state.movie.runtime, None);
    }

    #[test]
    fn failure_then_retry() {
        let mut state = DetailState::new(search_result());
        handle_detail_intent(&mut state, DetailIntent::Appeared);
        handle_detail_intent(
            &mut state,
            DetailIntent::DetailsFailed { request: 1, error: FetchError::Transport("offline".into()) },
        );
        assert!(!state.is_loading);
        assert_eq!(state.error_message.as_deref(), Some("Network error: offline"));

        let (_, command) = handle_detail_intent(&mut state, DetailIntent::RetryRequested);
        assert_eq!(
            command,
            Some(DetailCommand::Fetch { request: 2, imdb_id: "tt0133093".into() })
        );
        assert!(state.error_message.is_none());

        let (changed, _) = handle_detail_intent(
            &mut state,
            DetailIntent::DetailsSucceeded { request: 1, movie: full_movie() },
        );
        assert!(!changed);
        assert!(state.detailed.is_none());
    }
}
