//! Movie domain model.
//!
//! A [`Movie`] is the immutable record displayed by the list and detail screens.
//! It is produced by the movie service (see [`crate::service`]) and never mutated
//! by the core; the list store only reorders, replaces or appends whole records.

use serde::{Deserialize, Serialize};

/// Base URL for poster images given as relative paths.
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Base URL for backdrop images given as relative paths.
const BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/w780";

/// A movie as shown in the list and detail screens.
///
/// # Fields
///
/// - `id`: numeric identifier, unique within one query's result pages
/// - `release_date`: free-form; may be `"1997"`, `"1997-09-26"`, `"1997–2003"`, ...
/// - `vote_average`: rating on a 0-10 scale, `0.0` when unknown
/// - `staff`, `runtime`, `budget`: only populated by the detail endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub media_type: String,
    pub vote_average: f64,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub staff: Option<Vec<String>>,
    pub runtime: Option<u32>,
    pub budget: Option<f64>,
}

impl Movie {
    /// Creates a movie with only the fields the list screen needs.
    ///
    /// # Examples
    ///
    /// ```
    /// use movieflix_core::Movie;
    ///
    /// let movie = Movie::new(372784, "Batman Begins", Some("2005"));
    /// assert_eq!(movie.imdb_id(), "tt0372784");
    /// assert_eq!(movie.year(), Some("2005"));
    /// ```
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>, release_date: Option<&str>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: None,
            release_date: release_date.map(String::from),
            media_type: "movie".to_string(),
            vote_average: 0.0,
            poster_path: None,
            backdrop_path: None,
            staff: None,
            runtime: None,
            budget: None,
        }
    }

    /// Returns a copy with the given rating.
    #[must_use]
    pub fn with_rating(mut self, vote_average: f64) -> Self {
        self.vote_average = vote_average;
        self
    }

    /// Absolute poster URL, if the movie has a usable poster path.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        resolve_image_url(self.poster_path.as_deref(), POSTER_BASE_URL)
    }

    /// Absolute backdrop URL, if the movie has a usable backdrop path.
    #[must_use]
    pub fn backdrop_url(&self) -> Option<String> {
        resolve_image_url(self.backdrop_path.as_deref(), BACKDROP_BASE_URL)
    }

    /// The first four characters of the release date, for display.
    ///
    /// Use [`crate::app::sorting::fast_year`] when a numeric year is needed.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        let date = self.release_date.as_deref()?;
        let end = date.char_indices().nth(4).map_or(date.len(), |(idx, _)| idx);
        Some(&date[..end])
    }

    /// IMDb identifier reconstructed from the numeric id (`tt` + 7 digits).
    #[must_use]
    pub fn imdb_id(&self) -> String {
        format!("tt{:07}", self.id)
    }

    /// Returns `true` if the movie already carries detail-only fields.
    ///
    /// Search results never do; a detail fetch can be skipped for movies that do.
    #[must_use]
    pub fn has_complete_data(&self) -> bool {
        self.overview.as_deref().is_some_and(|o| !o.is_empty())
            && self.staff.as_ref().is_some_and(|s| !s.is_empty())
            && self.runtime.is_some()
    }
}

/// Resolves a poster/backdrop path to an absolute URL.
///
/// Absolute URLs pass through; relative paths are joined onto `base`. Empty
/// paths and OMDb's `"N/A"` placeholder resolve to `None`.
fn resolve_image_url(path: Option<&str>, base: &str) -> Option<String> {
    let path = path?.trim();
    if path.is_empty() || path.eq_ignore_ascii_case("n/a") {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        Some(path.to_string())
    } else {
        Some(format!("{base}{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poster_url_joins_relative_paths_and_passes_absolute_ones() {
        let mut movie = Movie::new(1, "Heat", Some("1995"));
        movie.poster_path = Some("/abc.jpg".into());
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );

        movie.poster_path = Some("https://m.media-amazon.com/images/x.jpg".into());
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://m.media-amazon.com/images/x.jpg")
        );

        movie.poster_path = Some("N/A".into());
        assert_eq!(movie.poster_url(), None);

        movie.backdrop_path = Some("/b.jpg".into());
        assert_eq!(
            movie.backdrop_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w780/b.jpg")
        );
    }

    #[test]
    fn year_takes_first_four_characters() {
        assert_eq!(Movie::new(1, "A", Some("1997-09-26")).year(), Some("1997"));
        assert_eq!(Movie::new(1, "A", Some("97")).year(), Some("97"));
        assert_eq!(Movie::new(1, "A", None).year(), None);
    }

    #[test]
    fn imdb_id_is_zero_padded() {
        assert_eq!(Movie::new(133093, "The Matrix", None).imdb_id(), "tt0133093");
    }

    #[test]
    fn search_results_are_incomplete() {
        let mut movie = Movie::new(1, "Heat", Some("1995"));
        assert!(!movie.has_complete_data());

        movie.overview = Some("A heist.".into());
        movie.staff = Some(vec!["Director: Michael Mann".into()]);
        movie.runtime = Some(170);
        assert!(movie.has_complete_data());
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let movie = Movie::new(7, "Se7en", Some("1995")).with_rating(8.6);
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["release_date"], "1995");
        assert_eq!(json["vote_average"], 8.6);
        assert_eq!(json["media_type"], "movie");
    }
}
