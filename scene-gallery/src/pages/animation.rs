use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy::render::camera::{ClearColorConfig, Viewport};
use bevy::render::view::RenderLayers;
use bevy::window::PrimaryWindow;

use super::{orbit_page_camera, page_camera, unlit};
use crate::engine::core::app_state::GalleryPage;
use crate::engine::scene::helpers::axes_helper;

const PAGE: GalleryPage = GalleryPage::Animation;

/// Seconds for one full turn of the looping rotation.
const LOOP_SECONDS: f32 = 1.0;
const TORUS_CAMERA_RADIUS: f32 = 3.0;
const TORUS_CAMERA_DEPTH: f32 = 5.0;

pub struct AnimationPagePlugin;

impl Plugin for AnimationPagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_animation_scene).add_systems(
            Update,
            (
                fit_split_viewports,
                move_box,
                loop_rotations,
                orbit_torus_camera,
            )
                .run_if(in_state(PAGE)),
        );
    }
}

/// Which half of the window a camera draws into.
#[derive(Component, Clone, Copy, PartialEq, Debug)]
enum SplitSide {
    Left,
    Right,
}

#[derive(Component)]
struct CirclingBox;

#[derive(Component)]
struct LoopingRotation;

#[derive(Component)]
struct TorusCamera;

/// Rotation angle of a linear loop from a full turn back to zero.
pub fn looping_angle(elapsed: f32) -> f32 {
    let progress = (elapsed / LOOP_SECONDS).fract();
    TAU * (1.0 - progress)
}

pub fn circling_position(elapsed: f32) -> Vec3 {
    Vec3::new(elapsed.cos(), elapsed.sin(), 0.0)
}

pub fn torus_camera_position(elapsed: f32) -> Vec3 {
    Vec3::new(
        elapsed.cos() * TORUS_CAMERA_RADIUS,
        elapsed.sin() * TORUS_CAMERA_RADIUS,
        TORUS_CAMERA_DEPTH,
    )
}

/// Physical position and size of one half of a window.
fn half_viewport(side: SplitSide, window_size: UVec2) -> (UVec2, UVec2) {
    let half_width = (window_size.x / 2).max(1);
    let size = UVec2::new(half_width, window_size.y.max(1));
    match side {
        SplitSide::Left => (UVec2::ZERO, size),
        SplitSide::Right => (UVec2::new(half_width, 0), size),
    }
}

fn spawn_animation_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let left = RenderLayers::layer(1);
    let right = RenderLayers::layer(2);
    let red = unlit(&mut materials, Color::srgb(1.0, 0.0, 0.0));

    commands.spawn((
        orbit_page_camera(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 75.0, Color::BLACK),
        SplitSide::Left,
        left.clone(),
        StateScoped(PAGE),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
        MeshMaterial3d(red.clone()),
        CirclingBox,
        LoopingRotation,
        left.clone(),
        StateScoped(PAGE),
    ));
    commands.spawn((
        axes_helper(&mut meshes, &mut materials, 2.0),
        left,
        StateScoped(PAGE),
    ));

    // Drawn after the left half, so it must not clear the shared target.
    commands
        .spawn((
            page_camera(torus_camera_position(0.0), Vec3::ZERO, 75.0, Color::BLACK),
            SplitSide::Right,
            TorusCamera,
            right.clone(),
            StateScoped(PAGE),
        ))
        .insert(Camera {
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        });
    commands.spawn((
        Mesh3d(meshes.add(Torus::new(0.1, 0.5))),
        MeshMaterial3d(red),
        LoopingRotation,
        right.clone(),
        StateScoped(PAGE),
    ));
    commands.spawn((
        axes_helper(&mut meshes, &mut materials, 2.0),
        right,
        StateScoped(PAGE),
    ));
}

fn fit_split_viewports(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut Camera, &SplitSide)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    for (mut camera, side) in &mut cameras {
        let (physical_position, physical_size) = half_viewport(*side, window.physical_size());
        let unchanged = camera.viewport.as_ref().is_some_and(|v| {
            v.physical_position == physical_position && v.physical_size == physical_size
        });
        if !unchanged {
            camera.viewport = Some(Viewport {
                physical_position,
                physical_size,
                ..default()
            });
        }
    }
}

fn move_box(time: Res<Time>, mut boxes: Query<&mut Transform, With<CirclingBox>>) {
    for mut transform in &mut boxes {
        transform.translation = circling_position(time.elapsed_secs());
    }
}

fn loop_rotations(time: Res<Time>, mut meshes: Query<&mut Transform, With<LoopingRotation>>) {
    let angle = looping_angle(time.elapsed_secs());
    for mut transform in &mut meshes {
        transform.rotation = Quat::from_euler(EulerRot::XYZ, angle, angle, 0.0);
    }
}

fn orbit_torus_camera(time: Res<Time>, mut cameras: Query<&mut Transform, With<TorusCamera>>) {
    for mut transform in &mut cameras {
        *transform = Transform::from_translation(torus_camera_position(time.elapsed_secs()))
            .looking_at(Vec3::ZERO, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_restarts_every_second() {
        assert!((looping_angle(0.0) - TAU).abs() < 1e-5);
        assert!((looping_angle(0.5) - TAU / 2.0).abs() < 1e-4);
        assert!((looping_angle(2.25) - TAU * 0.75).abs() < 1e-4);
    }

    #[test]
    fn box_circles_the_origin() {
        for t in [0.0, 0.7, 3.0] {
            assert!((circling_position(t).length() - 1.0).abs() < 1e-5);
        }
        assert!(circling_position(0.0).distance(Vec3::X) < 1e-6);
    }

    #[test]
    fn torus_camera_stays_on_its_circle() {
        let p = torus_camera_position(1.3);
        assert!((p.truncate().length() - TORUS_CAMERA_RADIUS).abs() < 1e-5);
        assert_eq!(p.z, TORUS_CAMERA_DEPTH);
    }

    #[test]
    fn halves_tile_the_window() {
        let size = UVec2::new(1281, 720);
        let (left_pos, left_size) = half_viewport(SplitSide::Left, size);
        let (right_pos, right_size) = half_viewport(SplitSide::Right, size);

        assert_eq!(left_pos, UVec2::ZERO);
        assert_eq!(right_pos.x, left_size.x);
        assert_eq!(left_size, right_size);
        assert!(right_pos.x + right_size.x <= size.x);
    }
}
