use std::f32::consts::{FRAC_PI_4, TAU};

use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::pbr::{CascadeShadowConfigBuilder, DistanceFog, FogFalloff};
use bevy::prelude::*;
use constants::lighting::{ambient_brightness, directional_illuminance, point_intensity};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::orbit_page_camera;
use crate::constants::path::{
    HOUSE_BRICKS_AO, HOUSE_BRICKS_COLOR, HOUSE_BRICKS_NORMAL, HOUSE_BRICKS_ROUGHNESS, HOUSE_DOOR_ALPHA,
    HOUSE_DOOR_AO, HOUSE_DOOR_COLOR, HOUSE_DOOR_HEIGHT, HOUSE_DOOR_NORMAL, HOUSE_DOOR_ROUGHNESS,
    HOUSE_GRASS_AO, HOUSE_GRASS_COLOR, HOUSE_GRASS_NORMAL, HOUSE_GRASS_ROUGHNESS,
};
use crate::engine::assets::gallery_config::GalleryConfig;
use crate::engine::core::app_state::GalleryPage;
use crate::engine::scene::alpha_mask::PendingAlphaMask;
use crate::engine::scene::geometry::{uv_transform, with_tangents};

const PAGE: GalleryPage = GalleryPage::HauntedHouse;

const FOG_START: f32 = 1.0;
const FOG_END: f32 = 15.0;
const GRAVE_COUNT: usize = 50;
const GRAVE_INNER_RADIUS: f32 = 4.0;
const GRAVE_RING_WIDTH: f32 = 5.0;
const GRASS_REPEAT: f32 = 8.0;
const WALL_HEIGHT: f32 = 2.5;
const ROOF_HEIGHT: f32 = 1.0;

fn fog_colour() -> Color {
    Color::srgb_u8(0x26, 0x28, 0x37)
}

fn moon_colour() -> Color {
    Color::srgb_u8(0xb9, 0xd5, 0xff)
}

pub struct HauntedHousePagePlugin;

impl Plugin for HauntedHousePagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_haunted_house)
            .add_systems(Update, float_ghosts.run_if(in_state(PAGE)));
    }
}

/// Index into `ghost_positions`.
#[derive(Component)]
struct Ghost(usize);

/// Positions of the three wandering ghost lights at `elapsed` seconds.
pub fn ghost_positions(elapsed: f32) -> [Vec3; 3] {
    let t = elapsed;

    let a1 = t * 0.5;
    let g1 = Vec3::new(a1.cos() * 4.0, (t * 3.0).sin(), a1.sin() * 4.0);

    let a2 = -t * 0.32;
    let bob = (t * 4.0).sin() + (t * 2.5).sin();
    let g2 = Vec3::new(a2.cos() * 5.0, bob, a2.sin() * 5.0);

    let a3 = -t * 0.18;
    let g3 = Vec3::new(
        a3.cos() * (7.0 + (t * 0.32).sin()),
        bob,
        a3.sin() * (7.0 + (t * 0.5).sin()),
    );

    [g1, g2, g3]
}

/// Randomly scattered, slightly tilted graves in a ring around the house.
pub fn grave_transforms(rng: &mut impl Rng, count: usize) -> Vec<Transform> {
    (0..count)
        .map(|_| {
            let angle = rng.random::<f32>() * TAU;
            let radius = GRAVE_INNER_RADIUS + rng.random::<f32>() * GRAVE_RING_WIDTH;
            let tilt_y = (rng.random::<f32>() - 0.5) * 0.4;
            let tilt_z = (rng.random::<f32>() - 0.5) * 0.4;
            Transform::from_xyz(angle.sin() * radius, 0.3, angle.cos() * radius)
                .with_rotation(Quat::from_euler(EulerRot::XYZ, 0.0, tilt_y, tilt_z))
        })
        .collect()
}

fn load_repeating(asset_server: &AssetServer, path: &'static str) -> Handle<Image> {
    asset_server.load_with_settings(path, |settings: &mut ImageLoaderSettings| {
        settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
            address_mode_u: ImageAddressMode::Repeat,
            address_mode_v: ImageAddressMode::Repeat,
            ..ImageSamplerDescriptor::linear()
        });
    })
}

fn spawn_haunted_house(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<GalleryConfig>,
) {
    commands.spawn((
        orbit_page_camera(Vec3::new(4.0, 2.0, 5.0), Vec3::ZERO, 75.0, fog_colour()),
        DistanceFog {
            color: fog_colour(),
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
        StateScoped(PAGE),
    ));

    commands.insert_resource(AmbientLight {
        color: moon_colour(),
        brightness: ambient_brightness(0.12),
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            color: moon_colour(),
            illuminance: directional_illuminance(0.12),
            shadows_enabled: true,
            ..default()
        },
        CascadeShadowConfigBuilder {
            num_cascades: 1,
            maximum_distance: 20.0,
            ..default()
        }
        .build(),
        Transform::from_xyz(4.0, 5.0, -2.0).looking_at(Vec3::ZERO, Vec3::Y),
        StateScoped(PAGE),
    ));

    // House
    commands.spawn((
        Mesh3d(meshes.add(with_tangents(Cuboid::new(4.0, WALL_HEIGHT, 4.0).into()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(HOUSE_BRICKS_COLOR)),
            occlusion_texture: Some(asset_server.load(HOUSE_BRICKS_AO)),
            normal_map_texture: Some(asset_server.load(HOUSE_BRICKS_NORMAL)),
            metallic_roughness_texture: Some(asset_server.load(HOUSE_BRICKS_ROUGHNESS)),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, WALL_HEIGHT / 2.0, 0.0),
        StateScoped(PAGE),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cone::new(3.5, ROOF_HEIGHT).mesh().resolution(4))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0xb3, 0x5f, 0x45),
            ..default()
        })),
        Transform::from_xyz(0.0, WALL_HEIGHT + ROOF_HEIGHT / 2.0, 0.0)
            .with_rotation(Quat::from_rotation_y(FRAC_PI_4)),
        StateScoped(PAGE),
    ));

    let door_colour: Handle<Image> = asset_server.load(HOUSE_DOOR_COLOR);
    let door = materials.add(StandardMaterial {
        base_color_texture: Some(door_colour.clone()),
        occlusion_texture: Some(asset_server.load(HOUSE_DOOR_AO)),
        normal_map_texture: Some(asset_server.load(HOUSE_DOOR_NORMAL)),
        metallic_roughness_texture: Some(asset_server.load(HOUSE_DOOR_ROUGHNESS)),
        depth_map: Some(asset_server.load(HOUSE_DOOR_HEIGHT)),
        parallax_depth_scale: 0.1,
        perceptual_roughness: 1.0,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(with_tangents(Rectangle::new(2.2, 2.2).into()))),
        MeshMaterial3d(door.clone()),
        Transform::from_xyz(0.0, 1.0, 2.01),
        StateScoped(PAGE),
    ));
    commands.spawn((
        PendingAlphaMask {
            colour: door_colour,
            mask: asset_server.load(HOUSE_DOOR_ALPHA),
            material: door,
        },
        StateScoped(PAGE),
    ));
    commands.spawn((
        PointLight {
            color: Color::srgb_u8(0xff, 0x7d, 0x46),
            intensity: point_intensity(1.0),
            range: 7.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 2.2, 2.7),
        StateScoped(PAGE),
    ));

    let bush_mesh = meshes.add(Sphere::new(1.0).mesh().uv(16, 16));
    let bush_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x89, 0xc8, 0x54),
        ..default()
    });
    for (scale, position) in [
        (0.5, Vec3::new(0.8, 0.2, 2.2)),
        (0.25, Vec3::new(1.4, 0.1, 2.1)),
        (0.4, Vec3::new(-0.8, 0.1, 2.2)),
        (0.15, Vec3::new(-1.0, 0.05, 2.6)),
    ] {
        commands.spawn((
            Mesh3d(bush_mesh.clone()),
            MeshMaterial3d(bush_material.clone()),
            Transform::from_translation(position).with_scale(Vec3::splat(scale)),
            StateScoped(PAGE),
        ));
    }

    // Graves
    let grave_mesh = meshes.add(Cuboid::new(0.6, 0.8, 0.2));
    let grave_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xb2, 0xb6, 0xb1),
        ..default()
    });
    let mut rng = StdRng::seed_from_u64(config.random_seed);
    for transform in grave_transforms(&mut rng, GRAVE_COUNT) {
        commands.spawn((
            Mesh3d(grave_mesh.clone()),
            MeshMaterial3d(grave_material.clone()),
            transform,
            StateScoped(PAGE),
        ));
    }

    // Ghosts
    for (index, color) in [
        Color::srgb(1.0, 0.0, 1.0),
        Color::srgb(0.0, 1.0, 1.0),
        Color::srgb(1.0, 1.0, 0.0),
    ]
    .into_iter()
    .enumerate()
    {
        commands.spawn((
            PointLight {
                color,
                intensity: point_intensity(2.0),
                range: 3.0,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_translation(ghost_positions(0.0)[index]),
            Ghost(index),
            StateScoped(PAGE),
        ));
    }

    commands.spawn((
        Mesh3d(meshes.add(with_tangents(Plane3d::default().mesh().size(20.0, 20.0).into()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(load_repeating(&asset_server, HOUSE_GRASS_COLOR)),
            occlusion_texture: Some(load_repeating(&asset_server, HOUSE_GRASS_AO)),
            normal_map_texture: Some(load_repeating(&asset_server, HOUSE_GRASS_NORMAL)),
            metallic_roughness_texture: Some(load_repeating(&asset_server, HOUSE_GRASS_ROUGHNESS)),
            perceptual_roughness: 1.0,
            uv_transform: uv_transform(Vec2::splat(GRASS_REPEAT), 0.0, Vec2::ZERO),
            ..default()
        })),
        StateScoped(PAGE),
    ));
}

fn float_ghosts(time: Res<Time>, mut ghosts: Query<(&mut Transform, &Ghost)>) {
    let positions = ghost_positions(time.elapsed_secs());
    for (mut transform, ghost) in &mut ghosts {
        if let Some(position) = positions.get(ghost.0) {
            transform.translation = *position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghosts_start_on_their_circles() {
        let [g1, g2, g3] = ghost_positions(0.0);
        assert!(g1.distance(Vec3::new(4.0, 0.0, 0.0)) < 1e-5);
        assert!(g2.distance(Vec3::new(5.0, 0.0, 0.0)) < 1e-5);
        assert!(g3.distance(Vec3::new(7.0, 0.0, 0.0)) < 1e-5);
    }

    #[test]
    fn ghosts_keep_their_orbits() {
        for t in [0.5, 3.0, 17.25] {
            let [g1, g2, g3] = ghost_positions(t);
            assert!((Vec2::new(g1.x, g1.z).length() - 4.0).abs() < 1e-4);
            assert!((Vec2::new(g2.x, g2.z).length() - 5.0).abs() < 1e-4);
            let r3 = Vec2::new(g3.x, g3.z).length();
            assert!((6.0..=8.0).contains(&r3));
            assert!(g2.y.abs() <= 2.0);
        }
    }

    #[test]
    fn graves_ring_the_house() {
        let mut rng = StdRng::seed_from_u64(42);
        let graves = grave_transforms(&mut rng, GRAVE_COUNT);
        assert_eq!(graves.len(), GRAVE_COUNT);
        for grave in &graves {
            let radius = Vec2::new(grave.translation.x, grave.translation.z).length();
            assert!((GRAVE_INNER_RADIUS - 1e-4..=GRAVE_INNER_RADIUS + GRAVE_RING_WIDTH + 1e-4)
                .contains(&radius));
            assert_eq!(grave.translation.y, 0.3);
            let (x, y, z) = grave.rotation.to_euler(EulerRot::XYZ);
            assert!(x.abs() < 1e-4);
            assert!(y.abs() <= 0.2 + 1e-4 && z.abs() <= 0.2 + 1e-4);
        }
    }

    #[test]
    fn graves_are_reproducible_from_the_seed() {
        let a = grave_transforms(&mut StdRng::seed_from_u64(7), 5);
        let b = grave_transforms(&mut StdRng::seed_from_u64(7), 5);
        assert_eq!(a, b);
    }
}
