//! Asset types loaded through the Bevy asset server.

/// Runtime gallery configuration deserialised from JSON.
pub mod gallery_config;
