//! Command-line support for composing flight routes.

pub mod config;
pub mod format;
