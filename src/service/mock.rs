//! Scripted in-memory movie service.
//!
//! Responses are keyed by `(query, page)`; unscripted pages answer with an
//! empty list, which the list treats as the end of results. Per-query delays
//! run on the tokio clock, so tests with a paused clock stay deterministic.

use super::{MovieDetailService, MovieSearchService};
use crate::domain::{FetchError, Movie};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

type PageResult = Result<Vec<Movie>, FetchError>;

/// Movie service returning pre-scripted results and recording every call.
#[derive(Debug, Default)]
pub struct MockMovieService {
    pages: HashMap<(String, u32), PageResult>,
    details: HashMap<String, Result<Movie, FetchError>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, u32)>>,
    detail_calls: Mutex<Vec<String>>,
}

impl MockMovieService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `movies` as page `page` of `query`.
    #[must_use]
    pub fn with_page(mut self, query: &str, page: u32, movies: Vec<Movie>) -> Self {
        self.pages.insert((query.to_string(), page), Ok(movies));
        self
    }

    /// Scripts a failure for page `page` of `query`.
    #[must_use]
    pub fn with_failure(mut self, query: &str, page: u32, error: FetchError) -> Self {
        self.pages.insert((query.to_string(), page), Err(error));
        self
    }

    /// Delays every response for `query` by `delay`.
    #[must_use]
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    /// Scripts the detail response for `imdb_id`.
    #[must_use]
    pub fn with_detail(mut self, imdb_id: &str, movie: Movie) -> Self {
        self.details.insert(imdb_id.to_string(), Ok(movie));
        self
    }

    /// Every `(query, page)` requested so far, in call order.
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Every IMDb id requested so far, in call order.
    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn delay_for(&self, query: &str) -> Option<Duration> {
        self.delays.get(query).copied()
    }
}

impl MovieSearchService for MockMovieService {
    fn fetch_movies(&self, query: &str, page: u32) -> BoxFuture<'static, PageResult> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((query.to_string(), page));

        let result = self
            .pages
            .get(&(query.to_string(), page))
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()));
        let delay = self.delay_for(query);

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }
        .boxed()
    }
}

impl MovieDetailService for MockMovieService {
    fn fetch_movie_details(&self, imdb_id: &str) -> BoxFuture<'static, Result<Movie, FetchError>> {
        self.detail_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(imdb_id.to_string());

        let result = self.details.get(imdb_id).cloned().unwrap_or_else(|| {
            Err(FetchError::Server {
                status: 404,
                message: format!("no detail scripted for {imdb_id}"),
            })
        });
        let delay = self.delay_for(imdb_id);

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }
        .boxed()
    }
}
