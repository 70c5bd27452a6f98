//! Core module for common functionality across all targets

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod summary;
