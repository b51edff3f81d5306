//! Presentation layer: display-ready view models.
//!
//! This crate does not render; it hands a UI everything it needs to draw a
//! movie list without re-deriving state.
//!
//! # Architecture
//!
//! ```text
//! ListState → compute_viewmodel → ListViewModel → (any UI)
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable list state

pub mod viewmodel;

pub use viewmodel::{EmptyState, ErrorBanner, HeaderInfo, ListViewModel, MovieRow, SpinnerFlags};
