//! Shared library for `ttprefs`
//! Contains the preference option resolver and the catalog, config and logging
//! layers used by the CLI.

pub mod core;
pub mod logger;
pub mod shared;

pub use crate::core::config;
pub use shared::*;
