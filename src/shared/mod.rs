//! Shared module for common functionality across all targets

/// Returns the current version of the `timetable-prefs` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
