//! Camera rigs shared by the gallery pages.
//!
//! Every page camera orbits a focus point under mouse control; the solar
//! system camera can additionally be handed to the follow controller.

/// Orbit controls component, input capture and per-frame damping step.
pub mod orbit_controls;

/// Follow/reset controller that steers a camera toward a selected body.
pub mod follow;
