//! Movie search and detail service seams.
//!
//! The store and coordinator depend only on these traits; the concrete backend
//! is injected at construction time.
//!
//! # Implementations
//!
//! - [`omdb::OmdbClient`]: HTTP client for the OMDb API
//! - [`mock::MockMovieService`]: scripted in-memory service for tests and demos

pub mod mock;
pub mod omdb;

pub use mock::MockMovieService;
pub use omdb::OmdbClient;

use crate::domain::{FetchError, Movie};
use futures_util::future::BoxFuture;

/// Pages of movies for a query.
///
/// Returned futures are `'static` so the coordinator can spawn them and drop
/// them on cancellation.
pub trait MovieSearchService: Send + Sync {
    /// Fetches page `page` (1-based) of results for `query`.
    ///
    /// An empty vector is not an error: it means there are no more pages.
    fn fetch_movies(&self, query: &str, page: u32) -> BoxFuture<'static, Result<Vec<Movie>, FetchError>>;
}

/// Full details for a single movie.
pub trait MovieDetailService: Send + Sync {
    /// Fetches the movie identified by `imdb_id` (e.g. `tt0133093`).
    fn fetch_movie_details(&self, imdb_id: &str) -> BoxFuture<'static, Result<Movie, FetchError>>;
}
