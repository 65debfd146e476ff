//! Scene-building utilities shared across the gallery pages.
//!
//! Procedural meshes and textures, plus helper outlines for axes and lights.

/// Procedural geometry: wireframes, random triangles, point shells and ring UVs.
pub mod geometry;

/// Axes and light outline helpers.
pub mod helpers;

/// Camera-facing text labels anchored in the world.
pub mod text_sprite;

/// Extruded text geometry from font outlines.
pub mod text_mesh;

/// Baking greyscale alpha masks into colour textures.
pub mod alpha_mask;
