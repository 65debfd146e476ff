use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};
use constants::render_settings::DOUBLE_CLICK_SECONDS;

use super::{page_camera, unlit};
use crate::engine::core::app_state::GalleryPage;
use crate::engine::scene::helpers::axes_helper;

const PAGE: GalleryPage = GalleryPage::Camera;

/// How far the cursor can swing the camera from the centre line.
const CURSOR_REACH: f32 = 5.0;
const CAMERA_DEPTH: f32 = 3.0;

pub struct CameraPagePlugin;

impl Plugin for CameraPagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_camera_scene).add_systems(
            Update,
            (swing_box, follow_cursor, toggle_fullscreen_on_double_click).run_if(in_state(PAGE)),
        );
    }
}

#[derive(Component)]
struct SwingingBox;

#[derive(Component)]
struct CursorCamera;

/// Cursor position mapped to [-1, 1] on both axes with y pointing up.
pub fn normalized_cursor(cursor: Vec2, window_size: Vec2) -> Vec2 {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (cursor.x / window_size.x - 0.5) * 2.0,
        -(cursor.y / window_size.y - 0.5) * 2.0,
    )
}

pub fn cursor_camera_position(cursor: Vec2) -> Vec3 {
    Vec3::new(cursor.x * CURSOR_REACH, cursor.y * CURSOR_REACH, CAMERA_DEPTH)
}

/// Pairs up clicks that land within the double click window.
#[derive(Default, Debug)]
pub struct DoubleClickDetector {
    last_click: Option<f32>,
}

impl DoubleClickDetector {
    /// Record a click at `now` seconds; true when it completes a double click.
    pub fn register(&mut self, now: f32) -> bool {
        match self.last_click {
            Some(previous) if now - previous <= DOUBLE_CLICK_SECONDS => {
                self.last_click = None;
                true
            }
            _ => {
                self.last_click = Some(now);
                false
            }
        }
    }
}

fn spawn_camera_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        page_camera(Vec3::new(0.0, 0.0, CAMERA_DEPTH), Vec3::ZERO, 100.0, Color::BLACK),
        CursorCamera,
        StateScoped(PAGE),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
        MeshMaterial3d(unlit(&mut materials, Color::srgb(1.0, 0.0, 0.0))),
        SwingingBox,
        StateScoped(PAGE),
    ));
    commands.spawn((axes_helper(&mut meshes, &mut materials, 2.0), StateScoped(PAGE)));
}

fn swing_box(time: Res<Time>, mut boxes: Query<&mut Transform, With<SwingingBox>>) {
    let t = time.elapsed_secs();
    for mut transform in &mut boxes {
        transform.rotation = Quat::from_rotation_y(t);
        transform.translation = Vec3::new(t.sin(), 0.0, t.cos());
    }
}

fn follow_cursor(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut Transform, With<CursorCamera>>,
    mut cursor: Local<Vec2>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    // Keep the last known position once the cursor leaves the window.
    if let Some(position) = window.cursor_position() {
        *cursor = normalized_cursor(position, window.size());
    }

    for mut transform in &mut cameras {
        *transform = Transform::from_translation(cursor_camera_position(*cursor))
            .looking_at(Vec3::ZERO, Vec3::Y);
    }
}

fn toggle_fullscreen_on_double_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    interactions: Query<&Interaction>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut detector: Local<DoubleClickDetector>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    if interactions.iter().any(|i| *i != Interaction::None) {
        return;
    }
    if !detector.register(time.elapsed_secs()) {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    window.mode = match window.mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        _ => WindowMode::Windowed,
    };
    info!("Window mode set to {:?}", window.mode);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_corners_map_to_unit_square() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(normalized_cursor(Vec2::new(0.0, 0.0), size), Vec2::new(-1.0, 1.0));
        assert_eq!(normalized_cursor(Vec2::new(800.0, 600.0), size), Vec2::new(1.0, -1.0));
        assert_eq!(normalized_cursor(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
        assert_eq!(normalized_cursor(Vec2::new(10.0, 10.0), Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn camera_swings_with_cursor() {
        assert_eq!(
            cursor_camera_position(Vec2::new(1.0, -0.5)),
            Vec3::new(5.0, -2.5, 3.0)
        );
    }

    #[test]
    fn double_click_needs_two_quick_clicks() {
        let mut detector = DoubleClickDetector::default();
        assert!(!detector.register(1.0));
        assert!(detector.register(1.2));

        // A third click starts a new pair.
        assert!(!detector.register(1.3));
        assert!(!detector.register(2.0));
        assert!(detector.register(2.1));
    }
}
