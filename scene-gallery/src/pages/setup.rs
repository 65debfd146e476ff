use bevy::prelude::*;

use super::{orbit_page_camera, unlit};
use crate::engine::core::app_state::GalleryPage;
use crate::engine::scene::geometry::wireframe_mesh;
use crate::engine::scene::helpers::axes_helper;

const PAGE: GalleryPage = GalleryPage::Setup;

pub struct SetupPagePlugin;

impl Plugin for SetupPagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_setup_scene);
    }
}

/// Red box with its edges traced, axes and a light grey backdrop.
fn spawn_setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        orbit_page_camera(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::ZERO,
            75.0,
            Color::srgb_u8(0xf0, 0xf0, 0xf0),
        ),
        StateScoped(PAGE),
    ));

    let cube = Mesh::from(Cuboid::new(1.0, 1.0, 1.0));
    if let Some(edges) = wireframe_mesh(&cube) {
        commands.spawn((
            Mesh3d(meshes.add(edges)),
            MeshMaterial3d(unlit(&mut materials, Color::WHITE)),
            StateScoped(PAGE),
        ));
    }
    commands.spawn((
        Mesh3d(meshes.add(cube)),
        MeshMaterial3d(unlit(&mut materials, Color::srgb(1.0, 0.0, 0.0))),
        StateScoped(PAGE),
    ));

    commands.spawn((axes_helper(&mut meshes, &mut materials, 2.0), StateScoped(PAGE)));
}
