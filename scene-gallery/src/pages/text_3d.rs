use std::f32::consts::PI;

use bevy::prelude::*;
use bevy::text::DEFAULT_FONT_DATA;
use constants::lighting::{ambient_brightness, directional_illuminance};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::orbit_page_camera;
use crate::constants::path::MATCAP_TEXTURE;
use crate::engine::assets::gallery_config::GalleryConfig;
use crate::engine::core::app_state::GalleryPage;
use crate::engine::render::matcap_material::MatcapMaterial;
use crate::engine::scene::helpers::axes_helper;
use crate::engine::scene::text_mesh::{TextExtrusion, extruded_text_mesh};

const PAGE: GalleryPage = GalleryPage::ThreeDText;

/// Donuts are scattered inside a cube of this edge length.
const SCATTER_EXTENT: f32 = 10.0;

pub struct TextPagePlugin;

impl Plugin for TextPagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_text_scene);
    }
}

/// Random placement, tilt and size for `count` donuts.
pub fn donut_transforms(rng: &mut impl Rng, count: usize) -> Vec<Transform> {
    (0..count)
        .map(|_| {
            let translation = Vec3::new(
                (rng.random::<f32>() - 0.5) * SCATTER_EXTENT,
                (rng.random::<f32>() - 0.5) * SCATTER_EXTENT,
                (rng.random::<f32>() - 0.5) * SCATTER_EXTENT,
            );
            let rotation = Quat::from_euler(
                EulerRot::XYZ,
                rng.random::<f32>() * PI,
                rng.random::<f32>() * PI,
                0.0,
            );
            Transform {
                translation,
                rotation,
                scale: Vec3::splat(rng.random::<f32>()),
            }
        })
        .collect()
}

fn spawn_text_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut matcaps: ResMut<Assets<MatcapMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<GalleryConfig>,
) {
    commands.spawn((
        orbit_page_camera(Vec3::new(-2.0, 2.0, 5.0), Vec3::ZERO, 75.0, Color::BLACK),
        StateScoped(PAGE),
    ));
    commands.insert_resource(AmbientLight {
        brightness: ambient_brightness(0.5),
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: directional_illuminance(1.0),
            ..default()
        },
        Transform::from_xyz(2.0, 2.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
        StateScoped(PAGE),
    ));

    let material = matcaps.add(MatcapMaterial::new(asset_server.load(MATCAP_TEXTURE)));

    match extruded_text_mesh(DEFAULT_FONT_DATA, &config.text.message, &TextExtrusion::default()) {
        Ok(headline) => {
            commands.spawn((
                Mesh3d(meshes.add(headline)),
                MeshMaterial3d(material.clone()),
                StateScoped(PAGE),
            ));
        }
        Err(e) => warn!("Skipping headline: {e}"),
    }

    let donut = meshes.add(Torus::new(0.1, 0.5).mesh().minor_resolution(20).major_resolution(45));
    let mut rng = StdRng::seed_from_u64(config.random_seed);
    for transform in donut_transforms(&mut rng, config.text.donut_count) {
        commands.spawn((
            Mesh3d(donut.clone()),
            MeshMaterial3d(material.clone()),
            transform,
            StateScoped(PAGE),
        ));
    }

    commands.spawn((axes_helper(&mut meshes, &mut materials, 2.0), StateScoped(PAGE)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donuts_stay_inside_the_scatter_cube() {
        let mut rng = StdRng::seed_from_u64(1337);
        let donuts = donut_transforms(&mut rng, 100);

        assert_eq!(donuts.len(), 100);
        for donut in &donuts {
            assert!(donut.translation.abs().max_element() <= SCATTER_EXTENT / 2.0);
            assert!((0.0..1.0).contains(&donut.scale.x));
            assert_eq!(donut.scale.x, donut.scale.z);
        }
    }
}
