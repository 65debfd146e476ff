//! Custom materials.

/// Matcap shading: colour looked up from a lit sphere image by view-space normal.
pub mod matcap_material;
