//! OMDb HTTP backend.
//!
//! Implements both service traits against `https://www.omdbapi.com/`. OMDb
//! answers every request with HTTP 200 and signals failure in the body through
//! `"Response": "False"` plus an `"Error"` message; past-the-end pages come back
//! as `"Movie not found!"`, which this client maps to an empty page.
//!
//! # Example
//!
//! ```no_run
//! use movieflix_core::service::{MovieSearchService, OmdbClient};
//! use movieflix_core::Config;
//!
//! # async fn run() -> movieflix_core::Result<()> {
//! let client = OmdbClient::new(&Config::default())?;
//! let movies = client.fetch_movies("batman", 1).await?;
//! println!("{} results", movies.len());
//! # Ok(())
//! # }
//! ```

use super::{MovieDetailService, MovieSearchService};
use crate::domain::{FetchError, MovieFlixError, Movie, Result};
use crate::Config;
use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt;
use reqwest::Url;
use serde::Deserialize;

/// OMDb's message for a query with no (more) results.
const NOT_FOUND: &str = "Movie not found!";

const NO_DESCRIPTION: &str = "No description available";

/// HTTP client for the OMDb search and detail endpoints.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Builds a client using the configured base URL, API key and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`MovieFlixError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| MovieFlixError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// URL for page `page` of results for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidQuery`] for a blank query or a malformed base URL.
    pub fn search_url(&self, query: &str, page: u32) -> std::result::Result<Url, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetchError::InvalidQuery("search query is empty".to_string()));
        }
        let page = page.to_string();
        Url::parse_with_params(
            &self.base_url,
            &[("s", query), ("page", page.as_str()), ("apikey", self.api_key.as_str())],
        )
        .map_err(|e| FetchError::InvalidQuery(e.to_string()))
    }

    /// URL for the details of `imdb_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidQuery`] for a blank id or a malformed base URL.
    pub fn detail_url(&self, imdb_id: &str) -> std::result::Result<Url, FetchError> {
        let imdb_id = imdb_id.trim();
        if imdb_id.is_empty() {
            return Err(FetchError::InvalidQuery("IMDb id is empty".to_string()));
        }
        Url::parse_with_params(&self.base_url, &[("i", imdb_id), ("apikey", self.api_key.as_str())])
            .map_err(|e| FetchError::InvalidQuery(e.to_string()))
    }
}

impl MovieSearchService for OmdbClient {
    fn fetch_movies(&self, query: &str, page: u32) -> BoxFuture<'static, std::result::Result<Vec<Movie>, FetchError>> {
        let url = match self.search_url(query, page) {
            Ok(url) => url,
            Err(e) => return future::ready(Err(e)).boxed(),
        };
        let http = self.http.clone();
        let query = query.to_string();

        async move {
            tracing::debug!(query = %query, page, "requesting search page");
            let (status, body) = get(&http, url).await?;
            let movies = parse_search(status, &body)?;
            tracing::debug!(query = %query, page, count = movies.len(), "search page received");
            Ok(movies)
        }
        .boxed()
    }
}

impl MovieDetailService for OmdbClient {
    fn fetch_movie_details(&self, imdb_id: &str) -> BoxFuture<'static, std::result::Result<Movie, FetchError>> {
        let url = match self.detail_url(imdb_id) {
            Ok(url) => url,
            Err(e) => return future::ready(Err(e)).boxed(),
        };
        let http = self.http.clone();

        async move {
            let (status, body) = get(&http, url).await?;
            parse_detail(status, &body)
        }
        .boxed()
    }
}

/// Performs a GET and returns the status code with the body text.
async fn get(http: &reqwest::Client, url: Url) -> std::result::Result<(u16, String), FetchError> {
    let response = http.get(url).send().await.map_err(map_transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Server {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown status").to_string(),
        });
    }

    let body = response.text().await.map_err(map_transport)?;
    if body.trim().is_empty() {
        return Err(FetchError::NoData);
    }
    Ok((status.as_u16(), body))
}

fn map_transport(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if let Some(status) = err.status() {
        FetchError::Server {
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<SearchItem>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Type", default)]
    kind: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Writer")]
    writer: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "BoxOffice")]
    box_office: Option<String>,
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

fn is_false(response: &str) -> bool {
    response.eq_ignore_ascii_case("false")
}

/// Decodes a search page body.
fn parse_search(status: u16, body: &str) -> std::result::Result<Vec<Movie>, FetchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decoding(e.to_string()))?;

    if is_false(&response.response) {
        let message = response.error.unwrap_or_default();
        if message == NOT_FOUND {
            return Ok(Vec::new());
        }
        return Err(FetchError::Server { status, message });
    }

    tracing::trace!(total_results = ?response.total_results, "search response decoded");
    Ok(response.search.into_iter().map(SearchItem::into_movie).collect())
}

/// Decodes a detail body.
fn parse_detail(status: u16, body: &str) -> std::result::Result<Movie, FetchError> {
    let response: DetailResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decoding(e.to_string()))?;

    if response.response.as_deref().is_some_and(is_false) {
        return Err(FetchError::Server {
            status,
            message: response.error.unwrap_or_default(),
        });
    }

    Ok(response.into_movie())
}

impl SearchItem {
    fn into_movie(self) -> Movie {
        Movie {
            id: digits(&self.imdb_id).and_then(|d| d.parse().ok()).unwrap_or(0),
            title: self.title,
            overview: None,
            release_date: self.year,
            media_type: self.kind.unwrap_or_else(|| "movie".to_string()),
            vote_average: 0.0,
            poster_path: self.poster,
            backdrop_path: None,
            staff: Some(Vec::new()),
            runtime: None,
            budget: None,
        }
    }
}

impl DetailResponse {
    fn into_movie(self) -> Movie {
        let staff = [
            ("Director", self.director),
            ("Writer", self.writer),
            ("Cast", self.actors),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.filter(|v| !v.is_empty()).map(|v| format!("{label}: {v}")))
        .collect();

        let id = self
            .imdb_id
            .as_deref()
            .map(|id| id.replace("tt", ""))
            .and_then(|id| id.parse().ok())
            .unwrap_or(0);

        Movie {
            id,
            title: self.title.unwrap_or_default(),
            overview: Some(self.plot.unwrap_or_else(|| NO_DESCRIPTION.to_string())),
            release_date: self.year,
            media_type: "Movie".to_string(),
            vote_average: self
                .imdb_rating
                .as_deref()
                .and_then(|r| r.parse().ok())
                .unwrap_or(0.0),
            poster_path: self.poster.clone(),
            backdrop_path: self.poster,
            staff: Some(staff),
            runtime: self.runtime.as_deref().and_then(digits).and_then(|d| d.parse().ok()),
            budget: self.box_office.as_deref().and_then(parse_box_office),
        }
    }
}

/// All ASCII digits of `text` joined together, or `None` if there are none.
fn digits(text: &str) -> Option<String> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

/// `"$292,587,330"` → `292587330.0`.
fn parse_box_office(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| !matches!(c, '$' | ',' | ' ')).collect();
    cleaned.parse().ok()
}
