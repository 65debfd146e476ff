//! Shared tunables for the scene gallery.
//!
//! Values live here rather than in the application so that tests, tooling and
//! the gallery binary agree on the same numbers.

/// Camera follow controller defaults and interpolation factors.
pub mod camera;

/// Conversion factors from unit-less light intensities to physical units.
pub mod lighting;

/// Planet table for the solar system page.
pub mod planets;

/// Panel sizes, colours and other presentation settings.
pub mod render_settings;
