//! MovieFlix core: the state machine behind a paginated, searchable movie list.
//!
//! The crate provides:
//! - A pure list transition function with pagination, category switching,
//!   refresh and retry
//! - Debounced free-text search with cancellation of superseded timers
//! - Stale-result protection through per-request tickets
//! - A display-ready view model with sorting and one spinner per loading phase
//! - A movie detail state machine
//! - An OMDb HTTP backend and a scripted mock backend

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs) / embedding UI                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Store Layer (store/)                               │  ← Single writer
//! │  - Intent dispatch                                  │
//! │  - State publication (watch)                        │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ App Layer     │   │ Coordinator   │   │ Service Layer │
//! │ (app/)        │   │ (coordinator/)│   │ (service/)    │
//! │ - Transitions │   │ - Fetch tasks │   │ - OMDb client │
//! │ - Sorting     │   │ - Debounce    │   │ - Mock        │
//! │ - View model  │   │ - Cancellation│   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Movie model and categories (domain/)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber setup                         │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: List and detail state machines with the intent/command model
//! - [`coordinator`]: Spawned fetch and debounce tasks
//! - [`domain`]: Core domain types (Movie, categories, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`service`]: Movie search and detail backends
//! - [`store`]: State owners wiring handlers to the coordinator
//! - [`ui`]: View model types
//! - [`observability`]: tracing subscriber setup and rotating log file
//!
//! # Configuration
//!
//! Configuration is read from a TOML file:
//!
//! ```toml
//! default_category = "comedy"
//! search_debounce_ms = 400
//! api_key = "your-omdb-key"
//! request_timeout_secs = 15
//! trace_level = "debug"
//! log_file = "~/.local/share/movieflix/movieflix.log"
//! ```
//!
//! # Data Flow
//!
//! 1. **Intent**: the UI dispatches an intent to the store
//! 2. **Transition**: `handle_intent` mutates state and may return a command
//! 3. **Command**: the coordinator spawns a fetch or arms the debounce timer
//! 4. **Outcome**: results come back as intents tagged with their ticket
//! 5. **Publication**: every change is sent to `watch` subscribers
//!
//! # Examples
//!
//! ## Pure Transitions
//!
//! ```rust
//! use movieflix_core::{handle_intent, initialize, Command, Config, Intent};
//!
//! let config = Config::default();
//! let mut state = initialize(&config);
//!
//! let (changed, command) = handle_intent(&mut state, Intent::Appeared);
//! assert!(changed);
//! assert!(matches!(command, Some(Command::Fetch(_))));
//! ```
//!
//! ## Store With a Backend
//!
//! ```no_run
//! use movieflix_core::service::OmdbClient;
//! use movieflix_core::store::ListStore;
//! use movieflix_core::{Config, Intent};
//! use std::sync::Arc;
//!
//! # async fn run() -> movieflix_core::Result<()> {
//! let config = Config::load("~/.config/movieflix/config.toml")?;
//! let mut store = ListStore::new(Arc::new(OmdbClient::new(&config)?), &config);
//! store.dispatch(Intent::Appeared);
//! store.process_next().await;
//! for row in store.view().rows {
//!     println!("{} ({})", row.title, row.year_label);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Key Design Decisions
//!
//! ## Effects as Values
//!
//! The transition function never performs I/O:
//! - It returns at most one `Command` per intent
//! - Every rule is testable without a runtime
//! - The coordinator is the only place that spawns tasks
//!
//! ## Explicit Request Lineage
//!
//! Each fetch carries a ticket `{ id, generation, page }`. A result is applied
//! only if its ticket is still the active request, so late results from a
//! previous category, search or refresh never reach the list.

pub mod app;
pub mod coordinator;
pub mod domain;
pub mod infrastructure;
pub mod service;
pub mod store;

pub mod ui;

pub mod observability;

pub use app::{handle_intent, Command, Intent, ListState, LoadingPhase, SortOption};
pub use domain::{FetchError, Movie, MovieFlixError, Result};
pub use ui::ListViewModel;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Runtime configuration.
///
/// Loaded from TOML with every field optional; missing fields take their
/// defaults.
///
/// # Example
///
/// ```rust
/// use movieflix_core::Config;
///
/// let config = Config::from_toml_str("default_category = \"drama\"").unwrap();
/// assert_eq!(config.default_category, "drama");
/// assert_eq!(config.search_debounce_ms, 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Category shown when the list first appears. Default: `"action"`
    pub default_category: String,

    /// Quiet period after the last keystroke before a search fires. Default: 400
    pub search_debounce_ms: u64,

    /// OMDb endpoint. Default: `https://www.omdbapi.com/`
    pub api_base_url: String,

    /// OMDb API key.
    pub api_key: String,

    /// Per-request timeout for the HTTP client. Default: 15
    pub request_timeout_secs: u64,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. `RUST_LOG` takes
    /// precedence when set. Default: `"info"`
    pub trace_level: Option<String>,

    /// Log file path; logs go to stderr when unset. A leading `~` is expanded.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_category: domain::category::DEFAULT_CATEGORY.to_string(),
            search_debounce_ms: 400,
            api_base_url: "https://www.omdbapi.com/".to_string(),
            api_key: String::new(),
            request_timeout_secs: 15,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`MovieFlixError::ConfigParse`] if the text is not valid TOML or a
    /// field has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file. A leading `~` is expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = infrastructure::paths::expand_tilde(path.as_ref());
        tracing::debug!(path = %path.display(), "loading configuration");
        let text = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&text)
    }

    /// Builds configuration from a flat string map.
    ///
    /// Values that are missing or fail to parse fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use movieflix_core::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("default_category".to_string(), "horror".to_string());
    /// map.insert("search_debounce_ms".to_string(), "not a number".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.default_category, "horror");
    /// assert_eq!(config.search_debounce_ms, 400);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let text = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
        let number = |key: &str, fallback: u64| text(key).and_then(|v| v.parse().ok()).unwrap_or(fallback);

        Self {
            default_category: text("default_category").map_or(defaults.default_category, str::to_string),
            search_debounce_ms: number("search_debounce_ms", defaults.search_debounce_ms),
            api_base_url: text("api_base_url").map_or(defaults.api_base_url, str::to_string),
            api_key: text("api_key").map_or(defaults.api_key, str::to_string),
            request_timeout_secs: number("request_timeout_secs", defaults.request_timeout_secs).max(1),
            trace_level: text("trace_level").map(str::to_string),
            log_file: text("log_file").map(str::to_string),
        }
    }

    /// Debounce delay as a [`Duration`].
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// HTTP request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.default_category.trim().is_empty() {
            return Err(MovieFlixError::Config("default_category must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(MovieFlixError::Config("request_timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Creates the initial list state for `config`.
///
/// # Example
///
/// ```rust
/// use movieflix_core::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.selected_category, "action");
/// assert!(state.is_pristine());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> ListState {
    tracing::debug!(category = %config.default_category, "initializing movie list");
    ListState::new(config.default_category.clone())
}
