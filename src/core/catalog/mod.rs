//! Catalog snapshot loaders
//!
//! Two sources are understood: the JSON snapshot the timetable service
//! publishes, and the class-list CSV the scheduling office exports.

pub mod csv;
pub mod json;

pub use csv::{load_class_list_csv, parse_class_list_csv};
pub use json::{load_catalog_json, parse_catalog_json};

use crate::core::error::CatalogError;
use crate::core::models::Catalog;
use std::fs;
use std::path::Path;

/// Load a catalog, choosing the loader from the file extension
///
/// Files ending in `.csv` are read as class lists, everything else as JSON.
///
/// # Errors
/// Returns [`CatalogError`] when the file cannot be read or parsed, or when the
/// assembled catalog has dangling references.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_class_list_csv(path)
    } else {
        load_catalog_json(path)
    }
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn finish(catalog: Catalog, source: &str) -> Result<Catalog, CatalogError> {
    catalog
        .validate_references()
        .map_err(CatalogError::References)?;
    crate::info!(
        "Loaded {source}: {} subjects, {} sections, {} lecturers, {} classes",
        catalog.subjects().count(),
        catalog.sections().count(),
        catalog.lecturers().count(),
        catalog.meetings().count()
    );
    Ok(catalog)
}
