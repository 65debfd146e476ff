use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Runtime gallery settings loaded from `config/gallery.json`.
/// Every field is optional in the file; missing ones fall back to defaults.
#[derive(Asset, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath, Resource)]
#[serde(default)]
pub struct GalleryConfig {
    pub initial_route: String,
    pub sidebar_open: bool,
    pub show_fps: bool,
    /// Seed for every scattered layout (triangles, graves, donuts, asteroids, stars).
    pub random_seed: u64,
    pub solar_system: SolarSystemConfig,
    pub text: TextConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarSystemConfig {
    /// Initial value of the orbit speed slider.
    pub rotation_speed: f32,
    pub asteroid_count: usize,
    pub star_count: usize,
    pub star_radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub message: String,
    pub donut_count: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            initial_route: "/".to_string(),
            sidebar_open: true,
            show_fps: true,
            random_seed: 1337,
            solar_system: SolarSystemConfig::default(),
            text: TextConfig::default(),
        }
    }
}

impl Default for SolarSystemConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 30.0,
            asteroid_count: 1000,
            star_count: 10_000,
            star_radius: 500.0,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            message: "Scene Gallery".to_string(),
            donut_count: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_config_parses() {
        let raw = include_str!("../../../assets/config/gallery.json");
        let config: GalleryConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.initial_route, "/");
        assert_eq!(config.solar_system.asteroid_count, 1000);
        assert_eq!(config.text.donut_count, 100);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: GalleryConfig =
            serde_json::from_str(r#"{ "show_fps": false, "solar_system": { "star_count": 12 } }"#)
                .unwrap();

        assert!(!config.show_fps);
        assert!(config.sidebar_open);
        assert_eq!(config.solar_system.star_count, 12);
        assert_eq!(config.solar_system.rotation_speed, 30.0);
        assert_eq!(config.text, TextConfig::default());
    }
}
