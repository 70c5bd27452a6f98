//! CLI command handlers for `ttprefs`.
//!
//! Each command is implemented in its own submodule. Helpers here load the
//! inputs every command shares and exit with a message when they cannot.

pub mod config;
pub mod options;
pub mod payload;
pub mod summary;
pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};
use timetable_prefs::config::Config;
use timetable_prefs::core::catalog::load_catalog;
use timetable_prefs::core::models::{Catalog, Selection};
use timetable_prefs::core::resolver::PreferenceOptionResolver;
use timetable_prefs::error;

/// Look up a bare catalog file name in `paths.catalog_dir` when it is not in
/// the working directory
pub fn resolve_catalog_path(path: PathBuf, config: &Config) -> PathBuf {
    let is_bare = path.components().count() == 1;
    if path.exists() || !is_bare || config.paths.catalog_dir.is_empty() {
        return path;
    }
    let candidate = Path::new(&config.paths.catalog_dir).join(&path);
    if candidate.exists() {
        timetable_prefs::debug!("Using catalog {}", candidate.display());
        candidate
    } else {
        path
    }
}

/// Load a catalog or exit with status 1
pub fn load_catalog_or_exit(path: &Path) -> Catalog {
    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load catalog {}: {e}", path.display());
            eprintln!("✗ {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

/// Read a TOML preference file
///
/// # Errors
/// Returns a message if the file cannot be read or parsed.
pub fn read_preferences(path: &Path) -> Result<Selection, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    toml::from_str(&content).map_err(|e| format!("Invalid preferences in {}: {e}", path.display()))
}

/// Read a preference file and replay it against the catalog, or exit with status 1
///
/// Choices the catalog no longer offers are dropped with a warning.
pub fn load_preferences_or_exit(resolver: &PreferenceOptionResolver<'_>, path: &Path) -> Selection {
    let previous = match read_preferences(path) {
        Ok(selection) => selection,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };
    let rebuilt = resolver.rebuild(&previous);
    for problem in &rebuilt.rejected {
        eprintln!("⚠ {}: {problem}", path.display());
    }
    rebuilt.selection
}
