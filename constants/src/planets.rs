/// Orbit and size data for one planet.
pub struct PlanetInfo {
    pub name: &'static str,
    /// Distance from the sun in scene units.
    pub orbit_radius: f32,
    /// Sphere radius in scene units.
    pub size: f32,
    /// Angular speed before the rotation speed multiplier is applied.
    pub speed: f32,
}

pub const PLANETS: &[PlanetInfo] = &[
    PlanetInfo {
        name: "mercury",
        orbit_radius: 4.0,
        size: 0.32,
        speed: 0.04,
    },
    PlanetInfo {
        name: "venus",
        orbit_radius: 5.0,
        size: 0.55,
        speed: 0.015,
    },
    PlanetInfo {
        name: "earth",
        orbit_radius: 6.5,
        size: 0.6,
        speed: 0.01,
    },
    PlanetInfo {
        name: "mars",
        orbit_radius: 9.0,
        size: 0.23,
        speed: 0.008,
    },
    PlanetInfo {
        name: "jupiter",
        orbit_radius: 17.0,
        size: 1.2,
        speed: 0.002,
    },
    PlanetInfo {
        name: "saturn",
        orbit_radius: 20.0,
        size: 1.0,
        speed: 0.0015,
    },
    PlanetInfo {
        name: "uranus",
        orbit_radius: 24.0,
        size: 0.7,
        speed: 0.001,
    },
    PlanetInfo {
        name: "neptune",
        orbit_radius: 28.0,
        size: 0.65,
        speed: 0.0005,
    },
];

/// Radius of the sun sphere.
pub const SUN_RADIUS: f32 = 3.0;

/// Inner and outer radius of the Saturn ring, relative to the planet centre.
pub const SATURN_RING_RADII: (f32, f32) = (1.5, 2.5);

/// Asteroid belt spans this radial band.
pub const ASTEROID_BELT_RADII: (f32, f32) = (9.5, 13.0);

/// Index of a planet by name, case-insensitive.
pub fn planet_index(name: &str) -> Option<usize> {
    PLANETS
        .iter()
        .position(|p| p.name.eq_ignore_ascii_case(name))
}
