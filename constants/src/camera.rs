use bevy::math::Vec3;

/// Resting camera position for the solar system overview.
pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(1.0, 8.0, 8.0);

/// Resting orbit target for the solar system overview.
pub const DEFAULT_CAMERA_TARGET: Vec3 = Vec3::ZERO;

/// The sun sits at the origin; follow offsets are measured from here.
pub const SUN_POSITION: Vec3 = Vec3::ZERO;

/// Fraction of the remaining distance covered per frame while following.
pub const FOLLOW_LERP_FACTOR: f32 = 0.05;

/// Fraction of the remaining distance covered per frame while resetting.
pub const RESET_LERP_FACTOR: f32 = 0.03;

/// Distance below which the reset animation snaps to the defaults.
pub const RESET_EPSILON: f32 = 0.1;

/// How far the camera stays on the sun side of a followed target.
pub const FOLLOW_DISTANCE: f32 = 4.0;

/// Fraction of the remaining orbit velocity applied per damped frame.
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;

/// Radians of orbit per pixel of mouse motion.
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;

/// Relative dolly per scroll line.
pub const ORBIT_ZOOM_SPEED: f32 = 0.1;

/// Pitch is kept just short of the poles to avoid a degenerate look-at.
pub const ORBIT_MAX_PITCH: f32 = 1.55;
