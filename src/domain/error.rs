//! Error types for the movie list core.
//!
//! This module defines two error types:
//!
//! - [`FetchError`]: the typed failure of a single movie-service call. It travels
//!   inside intents back to the list store, so it is `Clone` and `PartialEq`.
//! - [`MovieFlixError`]: the crate-level error for configuration, I/O and client
//!   construction, with the [`Result`] alias.
//!
//! Both are implemented with `thiserror`.

use thiserror::Error;

/// Failure of a movie-service request.
///
/// Every variant renders a human-readable message through `Display`; that text is
/// what ends up in `ListState::error_message`.
///
/// # Examples
///
/// ```
/// use movieflix_core::FetchError;
///
/// let error = FetchError::Server { status: 503, message: "Service Unavailable".into() };
/// assert_eq!(error.to_string(), "Server error (503): Service Unavailable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request URL could not be built (blank query, malformed base URL).
    #[error("Invalid request: {0}")]
    InvalidQuery(String),

    /// The server answered with an empty body.
    #[error("No data received from the server")]
    NoData,

    /// The payload could not be decoded into the expected shape.
    #[error("Failed to decode response: {0}")]
    Decoding(String),

    /// The server rejected the request.
    ///
    /// Covers non-2xx statuses as well as API-level rejections delivered with a
    /// 2xx status (`"Response": "False"`).
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Reason phrase or API error message.
        message: String,
    },

    /// Connection-level failure (DNS, TLS, reset).
    #[error("Network error: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("The request timed out")]
    Timeout,

    /// Anything not covered above.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// The main error type for crate operations outside of the fetch path.
#[derive(Debug, Error)]
pub enum MovieFlixError {
    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML configuration file could not be parsed.
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A movie-service request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// The store task has stopped and no longer accepts intents.
    #[error("Store is shut down")]
    StoreClosed,
}

/// A specialized `Result` type for crate operations.
pub type Result<T> = std::result::Result<T, MovieFlixError>;
