//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, page states,
//! navigation and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with every page plugin, the UI panels, the RPC
/// bridge and platform-specific configuration.
pub mod app_setup;

/// Page state with its routes and titles.
pub mod app_state;

/// Queues shared with browser event callbacks on WASM.
pub mod browser_events;

/// Navigation requests from the sidebar, keyboard, RPC and browser location.
pub mod navigation;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
