//! Path utilities for configuration and data locations.
//!
//! Locations come from the platform conventions resolved by
//! [`directories::ProjectDirs`]: on Linux the data directory is
//! `$XDG_DATA_HOME/movieflix` (default `~/.local/share/movieflix`) and the config
//! file is `$XDG_CONFIG_HOME/movieflix/config.toml`. Without a home directory
//! no location can be resolved and the functions return `None`.

use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "movieflix";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// The user's home directory.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Returns the data directory for MovieFlix files (logs).
///
/// # Examples
///
/// ```
/// use movieflix_core::infrastructure::get_data_dir;
///
/// if let Some(dir) = get_data_dir() {
///     assert!(dir.to_string_lossy().to_lowercase().contains("movieflix"));
/// }
/// ```
#[must_use]
pub fn get_data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Returns the default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned as-is.
///
/// # Examples
///
/// ```
/// use movieflix_core::infrastructure::expand_tilde;
/// use std::path::Path;
///
/// assert_eq!(expand_tilde(Path::new("/absolute/path")), Path::new("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    expand_with_home(path, home_dir().as_deref())
}

fn expand_with_home(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_leading_tilde_only() {
        let home = Path::new("/home/viewer");
        assert_eq!(
            expand_with_home(Path::new("~/movies/log.txt"), Some(home)),
            PathBuf::from("/home/viewer/movies/log.txt")
        );
        assert_eq!(expand_with_home(Path::new("~"), Some(home)), PathBuf::from("/home/viewer"));
        assert_eq!(
            expand_with_home(Path::new("/var/~/log"), Some(home)),
            PathBuf::from("/var/~/log")
        );
        assert_eq!(
            expand_with_home(Path::new("~/x"), None),
            PathBuf::from("~/x")
        );
    }

    #[test]
    fn config_path_is_toml_file_in_config_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("config.toml"));
            let dirs = project_dirs().unwrap();
            assert_eq!(path.parent(), Some(dirs.config_dir()));
        }
    }

    #[test]
    fn locations_resolve_only_with_home_dir() {
        assert_eq!(get_data_dir().is_some(), home_dir().is_some());
        assert_eq!(default_config_path().is_some(), home_dir().is_some());
    }
}
