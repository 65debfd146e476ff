use bevy::prelude::*;
use rand::Rng;

use super::PAGE;
use crate::engine::scene::geometry::{point_list_mesh, sphere_shell_points};

/// Backdrop of white points scattered over a large sphere around the scene.
pub fn spawn_space_stars(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut impl Rng,
    count: usize,
    radius: f32,
) {
    let points = sphere_shell_points(rng, count, radius);
    commands.spawn((
        Mesh3d(meshes.add(point_list_mesh(points))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        StateScoped(PAGE),
    ));
}
