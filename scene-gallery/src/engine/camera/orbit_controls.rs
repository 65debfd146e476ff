use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_PITCH, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};

use super::follow::{CameraHandle, FollowCamera, OrbitControlsHandle};

/// Deltas smaller than this are treated as settled.
const SETTLE_EPSILON: f32 = 1e-5;

/// Orbit interaction helper attached to a camera entity.
///
/// Input accumulates into pending yaw/pitch/zoom deltas; `update` folds them
/// into the camera transform, bleeding them off gradually when damping is on.
/// With nothing pending, `update` leaves the camera position untouched and
/// only re-aims it at `target`.
#[derive(Component, Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enabled: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    yaw_delta: f32,
    pitch_delta: f32,
    zoom_scale: f32,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enabled: true,
            enable_damping: false,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            min_distance: 0.1,
            max_distance: 1_000.0,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            zoom_scale: 1.0,
        }
    }

    pub fn with_damping(mut self) -> Self {
        self.enable_damping = true;
        self
    }

    /// Queue a rotation from a pointer drag, in pixels.
    pub fn rotate(&mut self, drag: Vec2) {
        self.yaw_delta -= drag.x * self.rotate_speed;
        self.pitch_delta += drag.y * self.rotate_speed;
    }

    /// Queue a dolly from scroll input; positive values move closer.
    pub fn dolly(&mut self, scroll: f32) {
        let factor = (1.0 - scroll * self.zoom_speed).clamp(0.5, 1.5);
        self.zoom_scale *= factor;
    }

    /// True when no rotation or zoom is pending.
    pub fn is_settled(&self) -> bool {
        self.yaw_delta.abs() < SETTLE_EPSILON
            && self.pitch_delta.abs() < SETTLE_EPSILON
            && (self.zoom_scale - 1.0).abs() < SETTLE_EPSILON
    }

    /// Apply pending motion to `camera` and aim it at `target`.
    pub fn update(&mut self, camera: &mut impl CameraHandle) {
        if !self.is_settled() {
            let offset = camera.position() - self.target;
            let mut radius = offset.length();

            if radius > f32::EPSILON {
                let mut yaw = offset.x.atan2(offset.z);
                let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

                let step = if self.enable_damping {
                    self.damping_factor
                } else {
                    1.0
                };
                yaw += self.yaw_delta * step;
                pitch = (pitch + self.pitch_delta * step).clamp(-ORBIT_MAX_PITCH, ORBIT_MAX_PITCH);
                radius = (radius * self.zoom_scale).clamp(self.min_distance, self.max_distance);

                let new_offset = Vec3::new(
                    radius * pitch.cos() * yaw.sin(),
                    radius * pitch.sin(),
                    radius * pitch.cos() * yaw.cos(),
                );
                camera.set_position(self.target + new_offset);
            }

            if self.enable_damping {
                self.yaw_delta *= 1.0 - self.damping_factor;
                self.pitch_delta *= 1.0 - self.damping_factor;
            } else {
                self.yaw_delta = 0.0;
                self.pitch_delta = 0.0;
            }
            if self.yaw_delta.abs() < SETTLE_EPSILON {
                self.yaw_delta = 0.0;
            }
            if self.pitch_delta.abs() < SETTLE_EPSILON {
                self.pitch_delta = 0.0;
            }
            self.zoom_scale = 1.0;
        }

        camera.look_at(self.target);
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl<C: CameraHandle> OrbitControlsHandle<C> for OrbitControls {
    fn update(&mut self, camera: &mut C) {
        OrbitControls::update(self, camera);
    }

    fn target(&self) -> Vec3 {
        self.target
    }

    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Feed mouse drag and wheel input into every enabled `OrbitControls`.
/// Input is ignored while the pointer is over a UI node.
pub fn orbit_controls_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    interactions: Query<&Interaction>,
    mut controls: Query<&mut OrbitControls>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    let over_ui = interactions.iter().any(|i| *i != Interaction::None);
    if over_ui {
        return;
    }

    for mut orbit in &mut controls {
        if !orbit.enabled {
            continue;
        }
        if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
            orbit.rotate(mouse_delta);
        }
        if scroll_accum.abs() > f32::EPSILON {
            orbit.dolly(scroll_accum);
        }
    }
}

/// Step every orbit rig that is not driven by the follow controller.
pub fn orbit_controls_update(
    mut cameras: Query<(&mut OrbitControls, &mut Transform), Without<FollowCamera>>,
) {
    for (mut orbit, mut transform) in &mut cameras {
        orbit.update(transform.as_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_update_keeps_position() {
        let mut controls = OrbitControls::new(Vec3::ZERO).with_damping();
        let mut camera = Transform::from_xyz(1.0, 8.0, 8.0);

        for _ in 0..10 {
            controls.update(&mut camera);
        }

        assert_eq!(camera.translation, Vec3::new(1.0, 8.0, 8.0));
        let forward = camera.forward().as_vec3();
        let expected = (Vec3::ZERO - camera.translation).normalize();
        assert!(forward.distance(expected) < 1e-5);
    }

    #[test]
    fn rotation_preserves_distance_to_target() {
        let mut controls = OrbitControls::new(Vec3::new(0.0, 1.0, 0.0));
        let mut camera = Transform::from_xyz(0.0, 1.0, 5.0);

        controls.rotate(Vec2::new(120.0, -40.0));
        controls.update(&mut camera);

        let distance = camera.translation.distance(controls.target);
        assert!((distance - 5.0).abs() < 1e-4);
        assert!(camera.translation.x.abs() > 0.1);
        assert!(controls.is_settled());
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let mut controls = OrbitControls::new(Vec3::ZERO).with_damping();
        let mut camera = Transform::from_xyz(0.0, 0.0, 5.0);

        controls.rotate(Vec2::new(200.0, 0.0));
        controls.update(&mut camera);
        let first = camera.translation;
        assert!(!controls.is_settled());

        controls.update(&mut camera);
        assert_ne!(camera.translation, first);

        for _ in 0..2_000 {
            controls.update(&mut camera);
        }
        assert!(controls.is_settled());
    }

    #[test]
    fn dolly_moves_camera_closer_and_respects_limits() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.min_distance = 2.0;
        let mut camera = Transform::from_xyz(0.0, 0.0, 3.0);

        controls.dolly(1.0);
        controls.update(&mut camera);
        assert!(camera.translation.z < 3.0);

        for _ in 0..50 {
            controls.dolly(5.0);
            controls.update(&mut camera);
        }
        assert!((camera.translation.length() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_pole() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        let mut camera = Transform::from_xyz(0.0, 0.0, 4.0);

        controls.rotate(Vec2::new(0.0, 10_000.0));
        controls.update(&mut camera);

        let pitch = (camera.translation.y / camera.translation.length()).asin();
        assert!(pitch <= ORBIT_MAX_PITCH + 1e-4);
    }
}
