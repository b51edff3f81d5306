//! Preset movie categories.
//!
//! Categories are plain query keys sent to the search endpoint when no free-text
//! search is active. The list screen offers the keys in [`ALL_CATEGORIES`].

/// Category selected when a list screen is first created.
pub const DEFAULT_CATEGORY: &str = "action";

/// All preset category keys, in picker order.
pub const ALL_CATEGORIES: [&str; 9] = [
    "action",
    "comedy",
    "drama",
    "adventure",
    "horror",
    "sci-fi",
    "thriller",
    "animation",
    "fantasy",
];

/// Returns the display name for a category key.
///
/// Known keys map to their curated names; anything else gets its first letter
/// upper-cased.
///
/// # Examples
///
/// ```
/// use movieflix_core::domain::category::display_name;
///
/// assert_eq!(display_name("sci-fi"), "Sci-Fi");
/// assert_eq!(display_name("western"), "Western");
/// ```
#[must_use]
pub fn display_name(category: &str) -> String {
    match category {
        "action" => "Action".to_string(),
        "comedy" => "Comedy".to_string(),
        "drama" => "Drama".to_string(),
        "adventure" => "Adventure".to_string(),
        "horror" => "Horror".to_string(),
        "sci-fi" => "Sci-Fi".to_string(),
        "thriller" => "Thriller".to_string(),
        "animation" => "Animation".to_string(),
        "fantasy" => "Fantasy".to_string(),
        other => {
            let mut chars = other.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_has_a_curated_name() {
        for key in ALL_CATEGORIES {
            let name = display_name(key);
            assert!(!name.is_empty());
            assert_ne!(name, key, "{key} should not fall through to the default");
        }
    }

    #[test]
    fn unknown_keys_are_capitalized() {
        assert_eq!(display_name("noir"), "Noir");
        assert_eq!(display_name(""), "");
    }
}
