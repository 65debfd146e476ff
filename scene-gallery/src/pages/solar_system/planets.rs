use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;
use constants::planets::{PlanetInfo, SATURN_RING_RADII, SUN_RADIUS};

use super::PAGE;
use super::selection::PlanetId;
use crate::constants::path::{SATURN_RING_TEXTURE, SUN_TEXTURE, planet_texture};
use crate::engine::scene::geometry::{apply_polar_ring_uvs, uv_transform};
use crate::engine::scene::text_sprite::LabelOccluder;
use crate::ui::parameter_panel::ParameterPanel;

/// Half the width of the orbit path drawn for each planet.
const ORBIT_RING_HALF_WIDTH: f32 = 0.02;
const ORBIT_RING_OPACITY: f32 = 0.2;
const RING_RESOLUTION: u32 = 64;
const SATURN_RING_TILT: f32 = PI / 1.8;

/// A planet from the planet table.
#[derive(Component, Debug, Clone, Copy)]
pub struct Planet(pub PlanetId);

#[derive(Component)]
pub struct Sun;

/// Orbit time scaled by the rotation speed slider. Advanced incrementally so
/// changing the speed does not make planets jump.
#[derive(Resource, Debug, Default)]
pub struct OrbitClock {
    pub scaled_time: f32,
}

impl OrbitClock {
    pub fn advance(&mut self, delta_seconds: f32, rotation_speed: f32) {
        self.scaled_time += delta_seconds * rotation_speed;
    }
}

/// Position on the flat orbit of `planet` after `scaled_time`.
pub fn orbit_position(planet: &PlanetInfo, scaled_time: f32) -> Vec3 {
    let angle = scaled_time * planet.speed;
    Vec3::new(angle.cos() * planet.orbit_radius, 0.0, angle.sin() * planet.orbit_radius)
}

fn flat_ring(inner: f32, outer: f32) -> Mesh {
    Mesh::from(Annulus::new(inner, outer).mesh().resolution(RING_RESOLUTION))
}

pub fn spawn_sun(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS).mesh().uv(32, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(SUN_TEXTURE)),
            unlit: true,
            ..default()
        })),
        Sun,
        LabelOccluder { radius: SUN_RADIUS },
        StateScoped(PAGE),
    ));
}

/// Planets at their starting positions, each with its orbit path; Saturn
/// also gets its ring.
pub fn spawn_planets(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
) {
    let orbit_material = materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(ORBIT_RING_OPACITY),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    for id in PlanetId::all() {
        let info = id.info();

        commands.spawn((
            Mesh3d(meshes.add(flat_ring(
                info.orbit_radius - ORBIT_RING_HALF_WIDTH,
                info.orbit_radius + ORBIT_RING_HALF_WIDTH,
            ))),
            MeshMaterial3d(orbit_material.clone()),
            Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            StateScoped(PAGE),
        ));

        let mut planet = commands.spawn((
            Mesh3d(meshes.add(Sphere::new(info.size).mesh().uv(32, 32))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(asset_server.load(planet_texture(info.name))),
                perceptual_roughness: 1.0,
                ..default()
            })),
            Transform::from_translation(orbit_position(info, 0.0)),
            Planet(id),
            LabelOccluder { radius: info.size },
            StateScoped(PAGE),
        ));

        if info.name == "saturn" {
            planet.with_child(saturn_ring(meshes, materials, asset_server));
        }
    }
}

fn saturn_ring(
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
) -> impl Bundle {
    let (inner, outer) = SATURN_RING_RADII;
    let mut mesh = flat_ring(inner, outer);
    apply_polar_ring_uvs(&mut mesh, outer);

    (
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(SATURN_RING_TEXTURE)),
            uv_transform: uv_transform(Vec2::new(10.0, 1.0), PI, Vec2::splat(0.5)),
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_rotation(Quat::from_rotation_x(SATURN_RING_TILT)),
    )
}

pub fn advance_orbit_clock(time: Res<Time>, panel: Res<ParameterPanel>, mut clock: ResMut<OrbitClock>) {
    clock.advance(time.delta_secs(), panel.float("rotation_speed"));
}

pub fn move_planets(clock: Res<OrbitClock>, mut planets: Query<(&Planet, &mut Transform)>) {
    for (planet, mut transform) in &mut planets {
        transform.translation = orbit_position(planet.0.info(), clock.scaled_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planets_start_on_the_positive_x_axis() {
        for id in PlanetId::all() {
            let info = id.info();
            assert!(orbit_position(info, 0.0).distance(Vec3::X * info.orbit_radius) < 1e-5);
        }
    }

    #[test]
    fn orbit_angle_scales_with_speed_and_rotation() {
        let earth = PlanetId::from_name("earth").unwrap().info();
        let mut clock = OrbitClock::default();
        // One second at rotation speed 30 turns the earth by 0.3 rad.
        clock.advance(1.0, 30.0);
        let p = orbit_position(earth, clock.scaled_time);
        assert!((p.z.atan2(p.x) - 0.3).abs() < 1e-5);
        assert!((p.length() - earth.orbit_radius).abs() < 1e-4);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn paused_rotation_keeps_planets_still() {
        let mut clock = OrbitClock::default();
        clock.advance(1.0, 30.0);
        let before = clock.scaled_time;
        clock.advance(5.0, 0.0);
        assert_eq!(clock.scaled_time, before);
    }
}
