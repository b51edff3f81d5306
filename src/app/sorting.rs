//! Sorting of the derived movie view.
//!
//! Upstream date formats differ between the search endpoint (`"1997"`,
//! `"1997–2003"`) and the detail endpoint (`"26 Sep 1997"`, `"1997-09-26"`), so
//! sorting by year goes through [`fast_year`], a fallback chain that extracts a
//! plausible year from whatever string arrives.

use super::modes::SortOption;
use crate::domain::Movie;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Lowest year accepted by the positional parses.
const MIN_YEAR: i32 = 1000;

/// Highest year accepted by the positional parses.
const MAX_YEAR: i32 = 2999;

/// Returns the compiled year pattern, or `None` if compilation failed.
fn year_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new("(19|20)[0-9]{2}").ok())
        .as_ref()
}

/// Parses `text` as a year within `[MIN_YEAR, MAX_YEAR]`.
fn parse_year(text: &str) -> Option<i32> {
    text.parse::<i32>()
        .ok()
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
}

/// Extracts a release year from a free-form date string.
///
/// Precedence, first hit wins:
///
/// 1. exactly 4 characters that parse as a year in `[1000, 2999]`
/// 2. at least 10 characters whose first 4 parse as such a year (`YYYY-MM-DD`)
/// 3. the first `(19|20)NN` substring anywhere in the string
/// 4. `0`
///
/// # Examples
///
/// ```
/// use movieflix_core::app::sorting::fast_year;
///
/// assert_eq!(fast_year(Some("1997")), 1997);
/// assert_eq!(fast_year(Some("1997-09-26")), 1997);
/// assert_eq!(fast_year(Some("Released: 1997")), 1997);
/// assert_eq!(fast_year(Some("unknown")), 0);
/// assert_eq!(fast_year(None), 0);
/// ```
#[must_use]
pub fn fast_year(release_date: Option<&str>) -> i32 {
    let Some(text) = release_date else {
        return 0;
    };

    let char_count = text.chars().count();

    if char_count == 4 {
        if let Some(year) = parse_year(text) {
            return year;
        }
    } else if char_count >= 10 {
        let prefix: String = text.chars().take(4).collect();
        if let Some(year) = parse_year(&prefix) {
            return year;
        }
    }

    year_pattern()
        .and_then(|pattern| pattern.find(text))
        .and_then(|found| found.as_str().parse::<i32>().ok())
        .unwrap_or(0)
}

/// Returns `movies` ordered for display.
///
/// - `Title`: ascending ordinal compare
/// - `Rating`: descending vote average
/// - `Year`: descending [`fast_year`], ties broken by ascending title
///
/// All orders are stable: movies that compare equal keep their arrival order.
#[must_use]
pub fn sort_movies(movies: &[Movie], option: SortOption) -> Vec<Movie> {
    let mut sorted = movies.to_vec();
    match option {
        SortOption::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        SortOption::Rating => sorted.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average)),
        SortOption::Year => {
            let mut keyed: Vec<(i32, Movie)> = sorted
                .into_iter()
                .map(|movie| (fast_year(movie.release_date.as_deref()), movie))
                .collect();
            keyed.sort_by(|(year_a, a), (year_b, b)| compare_by_year(*year_a, a, *year_b, b));
            sorted = keyed.into_iter().map(|(_, movie)| movie).collect();
        }
    }
    sorted
}

fn compare_by_year(year_a: i32, a: &Movie, year_b: i32, b: &Movie) -> Ordering {
    year_b.cmp(&year_a).then_with(|| a.title.cmp(&b.title))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn fast_year_follows_fallback_chain() {
        assert_eq!(fast_year(Some("1997")), 1997);
        assert_eq!(fast_year(Some("1997-09-26")), 1997);
        assert_eq!(fast_year(Some("Released: 1997")), 1997);
        assert_eq!(fast_year(Some("unknown")), 0);
        assert_eq!(fast_year(None), 0);
    }

    #[test]
    fn fast_year_handles_upstream_oddities() {
        // Series ranges from the search endpoint (9 chars, en dash).
        assert_eq!(fast_year(Some("2008–2013")), 2008);
        // Detail endpoint "Released" format.
        assert_eq!(fast_year(Some("26 Sep 1997")), 1997);
        // Four characters out of range fall through to the pattern search.
        assert_eq!(fast_year(Some("0999")), 0);
        assert_eq!(fast_year(Some("3000")), 0);
        // Long strings with a non-numeric prefix fall through as well.
        assert_eq!(fast_year(Some("circa 2001 or so")), 2001);
        // Only 19xx and 20xx are recognised by the pattern.
        assert_eq!(fast_year(Some("year 1850 edition")), 0);
        assert_eq!(fast_year(Some("")), 0);
    }

    #[test]
    fn zero_year_ties_break_by_title() {
        let movies = vec![Movie::new(1, "B", None), Movie::new(2, "A", None)];
        let sorted = sort_movies(&movies, SortOption::Year);
        assert_eq!(titles(&sorted), vec!["A", "B"]);
    }

    #[test]
    fn year_sort_is_descending() {
        let movies = vec![
            Movie::new(1, "Old", Some("1972-03-24")),
            Movie::new(2, "New", Some("2019")),
            Movie::new(3, "Unknown", Some("N/A")),
            Movie::new(4, "Mid", Some("Released: 1994")),
        ];
        let sorted = sort_movies(&movies, SortOption::Year);
        assert_eq!(titles(&sorted), vec!["New", "Mid", "Old", "Unknown"]);
    }

    #[test]
    fn title_sort_is_ordinal_ascending() {
        let movies = vec![
            Movie::new(1, "batman", None),
            Movie::new(2, "Zorro", None),
            Movie::new(3, "Alien", None),
        ];
        let sorted = sort_movies(&movies, SortOption::Title);
        assert_eq!(titles(&sorted), vec!["Alien", "Zorro", "batman"]);
    }

    #[test]
    fn rating_sort_is_descending_and_stable() {
        let movies = vec![
            Movie::new(1, "First", None).with_rating(7.0),
            Movie::new(2, "Best", None).with_rating(9.3),
            Movie::new(3, "Second", None).with_rating(7.0),
        ];
        let sorted = sort_movies(&movies, SortOption::Rating);
        assert_eq!(titles(&sorted), vec!["Best", "First", "Second"]);
    }

    #[test]
    fn sorting_does_not_touch_the_source() {
        let movies = vec![Movie::new(1, "B", None), Movie::new(2, "A", None)];
        let _ = sort_movies(&movies, SortOption::Title);
        assert_eq!(titles(&movies), vec!["B", "A"]);
    }
}
