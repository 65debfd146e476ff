use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{orbit_page_camera, unlit};
use crate::engine::assets::gallery_config::GalleryConfig;
use crate::engine::core::app_state::GalleryPage;
use crate::engine::scene::geometry::{random_triangle_positions, triangle_soup_mesh, wireframe_mesh};

const PAGE: GalleryPage = GalleryPage::Geometries;

const TRIANGLE_COUNT: usize = 500;

pub struct GeometriesPagePlugin;

impl Plugin for GeometriesPagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_geometries_scene);
    }
}

/// A seeded soup of random triangles drawn as red edges.
fn spawn_geometries_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<GalleryConfig>,
) {
    commands.spawn((
        orbit_page_camera(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 75.0, Color::BLACK),
        StateScoped(PAGE),
    ));

    let mut rng = StdRng::seed_from_u64(config.random_seed);
    let soup = triangle_soup_mesh(random_triangle_positions(&mut rng, TRIANGLE_COUNT));
    let Some(edges) = wireframe_mesh(&soup) else {
        warn!("Random triangle soup produced no edges");
        return;
    };

    commands.spawn((
        Mesh3d(meshes.add(edges)),
        MeshMaterial3d(unlit(&mut materials, Color::srgb(1.0, 0.0, 0.0))),
        StateScoped(PAGE),
    ));
}
