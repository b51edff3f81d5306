//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber: an `EnvFilter` followed by a
//! `fmt` layer writing either to the rotating log file or to stderr.

use super::file_writer::FileWriter;
use crate::infrastructure::paths;
use crate::Config;
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # Output
///
/// When `config.log_file` is set, events are written without ANSI colors to
/// that file (leading `~` expanded) through a [`FileWriter`] with 10 MB
/// rotation. Otherwise they go to stderr.
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times, only the first call takes effect.
///
/// # Example
///
/// ```rust
/// use movieflix_core::observability::init_tracing;
/// use movieflix_core::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    let _ = match config.log_file.as_deref() {
        Some(log_file) => {
            let path = paths::expand_tilde(Path::new(log_file));
            registry
                .with(fmt::layer().with_ansi(false).with_writer(FileWriter::new(path)))
                .try_init()
        }
        None => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
}
