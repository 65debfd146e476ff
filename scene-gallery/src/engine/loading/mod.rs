//! Asset loading systems.
//!
//! Loads the JSON gallery configuration at startup and hands it to the
//! rest of the app as a resource.

/// Gallery configuration loading and first-page selection.
pub mod config_loader;
