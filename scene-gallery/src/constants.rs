//! Application-local constants that only the gallery binary needs.

/// Asset paths relative to the `assets/` directory.
pub mod path;
