/// Ambient brightness per unit of unit-less intensity.
pub const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 400.0;

/// Point and spot light lumens per unit of unit-less intensity.
pub const POINT_LUMENS_PER_UNIT: f32 = 4_000.0;

/// Directional light lux per unit of unit-less intensity.
pub const DIRECTIONAL_LUX_PER_UNIT: f32 = 3_000.0;

/// Convert an ambient intensity into `AmbientLight::brightness`.
pub fn ambient_brightness(intensity: f32) -> f32 {
    intensity * AMBIENT_BRIGHTNESS_PER_UNIT
}

/// Convert a point or spot intensity into lumens.
pub fn point_intensity(intensity: f32) -> f32 {
    intensity * POINT_LUMENS_PER_UNIT
}

/// Convert a directional intensity into lux.
pub fn directional_illuminance(intensity: f32) -> f32 {
    intensity * DIRECTIONAL_LUX_PER_UNIT
}
