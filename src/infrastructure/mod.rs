//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves platform locations for configuration and data files
//! and expands `~` in user-supplied paths.

pub mod paths;

pub use paths::{default_config_path, expand_tilde, get_data_dir, home_dir};
