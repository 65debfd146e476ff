use bevy::color::Color;

pub const SIDEBAR_OPEN_WIDTH: f32 = 220.0;
pub const SIDEBAR_CLOSED_WIDTH: f32 = 40.0;

pub const PARAMETER_PANEL_OPEN_WIDTH: f32 = 280.0;
pub const PARAMETER_PANEL_CLOSED_WIDTH: f32 = 32.0;

/// Slider track width in logical pixels.
pub const SLIDER_TRACK_WIDTH: f32 = 240.0;

pub const PANEL_BACKGROUND: Color = Color::srgb(0.10, 0.11, 0.13);
pub const PANEL_HEADER: Color = Color::srgb(0.14, 0.16, 0.20);
pub const BUTTON_IDLE: Color = Color::srgb(0.22, 0.24, 0.28);
pub const BUTTON_HOVERED: Color = Color::srgb(0.26, 0.28, 0.32);
pub const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);
pub const BUTTON_ACTIVE: Color = Color::srgb(0.30, 0.34, 0.40);
pub const SLIDER_FILL: Color = Color::srgb(0.0, 0.55, 0.85);

/// Swatches offered by colour parameters.
pub const COLOUR_SWATCHES: &[Color] = &[
    Color::srgb(1.0, 0.0, 0.0),
    Color::srgb(1.0, 0.55, 0.0),
    Color::srgb(1.0, 1.0, 0.0),
    Color::srgb(0.0, 0.8, 0.2),
    Color::srgb(0.0, 0.6, 1.0),
    Color::srgb(0.55, 0.2, 0.9),
    Color::srgb(1.0, 1.0, 1.0),
];

/// Seconds between two clicks that still count as a double click.
pub const DOUBLE_CLICK_SECONDS: f32 = 0.35;
