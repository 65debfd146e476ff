use bevy::prelude::*;

use super::{page_camera, unlit};
use crate::engine::camera::orbit_controls::OrbitControls;
use crate::engine::core::app_state::GalleryPage;
use crate::engine::scene::helpers::axes_helper;

const PAGE: GalleryPage = GalleryPage::Transform;

/// Radians added to x and y rotation every frame.
const SPIN_PER_FRAME: f32 = 0.01;

pub struct TransformPagePlugin;

impl Plugin for TransformPagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_transform_scene)
            .add_systems(Update, spin_cubes.run_if(in_state(PAGE)));
    }
}

#[derive(Component)]
struct SpinningCube;

/// x position, colour and whether the cube spins. Only the last cube added
/// to the scene, the green one, is animated.
const CUBES: [(f32, Color, bool); 3] = [
    (0.0, Color::srgb(1.0, 0.0, 0.0), false),
    (2.0, Color::srgb(0.0, 0.0, 1.0), false),
    (-2.0, Color::srgb(0.0, 1.0, 0.0), true),
];

fn spawn_transform_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        page_camera(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 75.0, Color::BLACK),
        OrbitControls::new(Vec3::ZERO),
        StateScoped(PAGE),
    ));

    let cube = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    for (x, color, spins) in CUBES {
        let mut entity = commands.spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(unlit(&mut materials, color)),
            Transform::from_xyz(x, 0.0, 0.0),
            StateScoped(PAGE),
        ));
        if spins {
            entity.insert(SpinningCube);
        }
    }

    commands.spawn((axes_helper(&mut meshes, &mut materials, 3.0), StateScoped(PAGE)));
}

/// Fixed per-frame increment, so the speed follows the frame rate.
fn spin_cubes(mut cubes: Query<&mut Transform, With<SpinningCube>>) {
    for mut transform in &mut cubes {
        transform.rotation = spun(transform.rotation);
    }
}

fn spun(rotation: Quat) -> Quat {
    let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
    Quat::from_euler(EulerRot::XYZ, x + SPIN_PER_FRAME, y + SPIN_PER_FRAME, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_green_cube_spins() {
        let spinning: Vec<_> = CUBES.iter().filter(|(.., spins)| *spins).collect();
        assert_eq!(spinning.len(), 1);
        assert_eq!(spinning[0].0, -2.0);
        assert_eq!(spinning[0].1, Color::srgb(0.0, 1.0, 0.0));
    }

    #[test]
    fn spinning_cube_turns_each_frame() {
        let mut app = App::new();
        app.add_systems(Update, spin_cubes);
        let spinning = app
            .world_mut()
            .spawn((Transform::from_xyz(-2.0, 0.0, 0.0), SpinningCube))
            .id();
        let still = app.world_mut().spawn(Transform::from_xyz(0.0, 0.0, 0.0)).id();

        for _ in 0..10 {
            app.update();
        }

        let (x, y, _) = app
            .world()
            .get::<Transform>(spinning)
            .unwrap()
            .rotation
            .to_euler(EulerRot::XYZ);
        assert!((x - 0.1).abs() < 1e-4);
        assert!((y - 0.1).abs() < 1e-4);
        assert_eq!(app.world().get::<Transform>(still).unwrap().rotation, Quat::IDENTITY);
    }
}
