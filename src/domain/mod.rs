//! Domain layer for the movie list core.
//!
//! Core domain types, independent of the HTTP adapter and of any UI toolkit.
//!
//! # Organization
//!
//! - [`category`]: Preset category keys and display names
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie domain model
//!
//! # Examples
//!
//! ```
//! use movieflix_core::domain::{Movie, Result};
//!
//! fn first_movie() -> Result<Movie> {
//!     Ok(Movie::new(372784, "Batman Begins", Some("2005")))
//! }
//! ```

pub mod category;
pub mod error;
pub mod movie;

pub use error::{FetchError, MovieFlixError, Result};
pub use movie::Movie;
