//! Command-line front end for the movie list.
//!
//! Loads configuration, runs one list session against OMDb, and prints the
//! resulting view model.
//!
//! # Usage
//!
//! ```text
//! movieflix [--category <key>] [--search <text>] [--sort title|year|rating]
//!           [--pages <n>] [--detail <imdb-id>] [--log-to-file]
//! ```
//!
//! # Environment
//!
//! - `MOVIEFLIX_CONFIG`: path to the TOML config file
//!   (default `config.toml` in the platform config directory, such as
//!   `~/.config/movieflix/` on Linux, if present)
//! - `MOVIEFLIX_API_KEY`: OMDb API key, overrides the config file
//! - `RUST_LOG`: tracing filter, overrides `trace_level`

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use movieflix_core::app::{DetailIntent, SortOption};
use movieflix_core::infrastructure::{default_config_path, get_data_dir};
use movieflix_core::observability::init_tracing;
use movieflix_core::service::OmdbClient;
use movieflix_core::store::{DetailStore, ListStore};
use movieflix_core::{Config, Intent, ListViewModel, Movie, MovieFlixError, Result};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

/// Runs one movie list session against OMDb and prints the result.
#[derive(Debug, Parser)]
#[command(name = "movieflix", version, about)]
struct CliArgs {
    /// Category key to browse (`action`, `comedy`, ...)
    #[arg(long, short)]
    category: Option<String>,

    /// Free-text search, takes precedence over the category
    #[arg(long, short)]
    search: Option<String>,

    /// Sort order: title, year or rating
    #[arg(long, default_value = "title", value_parser = parse_sort)]
    sort: SortOption,

    /// Number of pages to load
    #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,

    /// Show details for one IMDb id instead of a list
    #[arg(long, short)]
    detail: Option<String>,

    /// Write logs to the data directory instead of stderr
    #[arg(long)]
    log_to_file: bool,
}

fn parse_sort(label: &str) -> std::result::Result<SortOption, String> {
    SortOption::from_label(label).ok_or_else(|| format!("unknown sort option: {label}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let args = CliArgs::parse();

    let mut config = load_config()?;
    if let Ok(key) = env::var("MOVIEFLIX_API_KEY") {
        config.api_key = key;
    }
    apply_args(&mut config, &args)?;

    init_tracing(&config);
    tracing::debug!(?args, "movieflix starting");

    let client = Arc::new(OmdbClient::new(&config)?);

    if let Some(imdb_id) = args.detail {
        return show_detail(client, &imdb_id).await;
    }

    let mut store = ListStore::new(client, &config);
    store.dispatch(Intent::SortOptionChanged(args.sort));

    if let Some(text) = args.search {
        store.dispatch(Intent::SearchTextChanged(text));
        // Only the debounce timer is pending here.
        store.process_next().await;
    } else {
        store.dispatch(Intent::Appeared);
    }
    settle(&mut store).await;

    for _ in 1..args.pages {
        if !store.dispatch(Intent::LoadNextPageRequested) {
            break;
        }
        settle(&mut store).await;
    }

    print_list(&store.view());
    store.shutdown();
    Ok(())
}

fn load_config() -> Result<Config> {
    if let Some(path) = env::var_os("MOVIEFLIX_CONFIG") {
        return Config::load(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => Config::load(path),
        _ => Ok(Config::default()),
    }
}

/// Folds command-line choices into `config`.
///
/// The category becomes the starting category, so the store never fetches a
/// list it is about to replace with a search.
fn apply_args(config: &mut Config, args: &CliArgs) -> Result<()> {
    if let Some(category) = &args.category {
        config.default_category.clone_from(category);
    }
    if args.log_to_file && config.log_file.is_none() {
        let dir = get_data_dir()
            .ok_or_else(|| MovieFlixError::Config("no home directory for --log-to-file".to_string()))?;
        config.log_file = Some(dir.join("movieflix.log").display().to_string());
    }
    Ok(())
}

/// Applies coordinator results until no fetch is in flight.
async fn settle(store: &mut ListStore) {
    while store.state().phase.is_active() {
        store.process_next().await;
    }
}

async fn show_detail(client: Arc<OmdbClient>, imdb_id: &str) -> Result<()> {
    let id = imdb_id
        .trim_start_matches("tt")
        .parse()
        .map_err(|_| MovieFlixError::Config(format!("invalid IMDb id: {imdb_id}")))?;

    let mut store = DetailStore::new(client, Movie::new(id, imdb_id, None));
    store.dispatch(DetailIntent::Appeared).await;

    let state = store.state();
    if let Some(message) = &state.error_message {
        println!("! {message}");
        return Ok(());
    }

    let movie = state.display_movie();
    println!("{} ({})", movie.title, movie.year().unwrap_or("N/A"));
    if let Some(runtime) = movie.runtime {
        println!("Runtime: {runtime} min");
    }
    if movie.vote_average > 0.0 {
        println!("Rating:  {:.1}", movie.vote_average);
    }
    for line in movie.staff.iter().flatten() {
        println!("{line}");
    }
    if let Some(overview) = &movie.overview {
        println!("\n{overview}");
    }
    Ok(())
}

fn print_list(view: &ListViewModel) {
    println!("{} ({} movies, sorted by {})", view.header.title, view.header.count, view.sort_option.label());

    if let Some(error) = &view.error {
        let kind = if error.is_pagination { "loading more failed" } else { "loading failed" };
        println!("! {kind}: {}", error.message);
    }
    if let Some(empty) = &view.empty_state {
        println!("{}\n{}", empty.message, empty.subtitle);
    }

    for row in &view.rows {
        println!("  {:>4}  {:>4}  {}", row.year_label, row.rating_label, row.title);
    }

    if view.can_load_more {
        println!("(more available, try --pages)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use movieflix_core::domain::category::display_name;

    fn parse(args: &[&str]) -> std::result::Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("movieflix").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let args = parse(&["--category", "horror", "--sort", "Rating", "-p", "3"]).unwrap();
        assert_eq!(args.category.as_deref(), Some("horror"));
        assert_eq!(args.sort, SortOption::Rating);
        assert_eq!(args.pages, 3);
        assert_eq!(display_name(args.category.as_deref().unwrap()), "Horror");
    }

    #[test]
    fn defaults_to_one_page_sorted_by_title() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.sort, SortOption::Title);
        assert_eq!(args.pages, 1);
        assert!(!args.log_to_file);
    }

    #[test]
    fn category_flag_sets_starting_category_without_fetching() {
        let args = parse(&["-c", "comedy", "-s", "alien"]).unwrap();
        let mut config = Config::default();
        apply_args(&mut config, &args).unwrap();

        assert_eq!(config.default_category, "comedy");
        assert!(config.log_file.is_none());
        let state = movieflix_core::initialize(&config);
        assert_eq!(state.selected_category, "comedy");
        assert!(state.is_pristine());
    }

    #[test]
    fn rejects_unknown_and_incomplete_flags() {
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--search"]).is_err());
        assert!(parse(&["--sort", "length"]).is_err());
        assert!(parse(&["--pages", "0"]).is_err());
    }
}
