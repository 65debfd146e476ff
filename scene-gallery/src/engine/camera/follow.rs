//! Camera follow controller.
//!
//! Glides the camera behind a selected body, keeping the sun in view beyond
//! it, and animates back to the overview once the selection is cleared.

use bevy::prelude::*;
use constants::camera::{
    DEFAULT_CAMERA_POSITION, DEFAULT_CAMERA_TARGET, FOLLOW_DISTANCE, FOLLOW_LERP_FACTOR,
    RESET_EPSILON, RESET_LERP_FACTOR, SUN_POSITION,
};

use super::orbit_controls::OrbitControls;

/// Minimal camera surface the controller drives.
pub trait CameraHandle {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn look_at(&mut self, point: Vec3);
}

impl CameraHandle for Transform {
    fn position(&self) -> Vec3 {
        self.translation
    }

    fn set_position(&mut self, position: Vec3) {
        self.translation = position;
    }

    fn look_at(&mut self, point: Vec3) {
        if point != self.translation {
            Transform::look_at(self, point, Vec3::Y);
        }
    }
}

/// Orbit-style interaction the controller takes over while following.
pub trait OrbitControlsHandle<C: CameraHandle> {
    /// Advance damping by one frame and re-aim `camera`.
    fn update(&mut self, camera: &mut C);
    fn target(&self) -> Vec3;
    fn set_target(&mut self, target: Vec3);
    fn set_enabled(&mut self, enabled: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowMode {
    Idle,
    Following,
    Resetting,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowTuning {
    pub default_position: Vec3,
    pub default_target: Vec3,
    pub sun_position: Vec3,
    pub follow_lerp: f32,
    pub reset_lerp: f32,
    pub reset_epsilon: f32,
    pub follow_distance: f32,
}

impl Default for FollowTuning {
    fn default() -> Self {
        Self {
            default_position: DEFAULT_CAMERA_POSITION,
            default_target: DEFAULT_CAMERA_TARGET,
            sun_position: SUN_POSITION,
            follow_lerp: FOLLOW_LERP_FACTOR,
            reset_lerp: RESET_LERP_FACTOR,
            reset_epsilon: RESET_EPSILON,
            follow_distance: FOLLOW_DISTANCE,
        }
    }
}

/// Per-page follow state. Lives as a resource while the solar system is shown.
#[derive(Resource, Debug, Clone, Default)]
pub struct CameraFollowController {
    last_target: Option<Vec3>,
    resetting: bool,
    pub tuning: FollowTuning,
}

/// World position of the current follow target, refreshed every frame by
/// whoever owns the selection.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FollowTarget(pub Option<Vec3>);

/// Marks the camera steered by `CameraFollowController`.
#[derive(Component, Debug, Default)]
pub struct FollowCamera;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FollowSystems {
    /// Selection changes and target refresh.
    Observe,
    Tick,
}

impl CameraFollowController {
    pub fn mode(&self) -> FollowMode {
        if self.resetting {
            FollowMode::Resetting
        } else if self.last_target.is_some() {
            FollowMode::Following
        } else {
            FollowMode::Idle
        }
    }

    pub fn is_resetting(&self) -> bool {
        self.resetting
    }

    pub fn last_target(&self) -> Option<Vec3> {
        self.last_target
    }

    /// Record a selection change. Clearing a previous selection starts the
    /// return to the default view.
    pub fn on_selection_changed(&mut self, new_target: Option<Vec3>) {
        if new_target.is_none() && self.last_target.is_some() {
            self.resetting = true;
        }
        self.last_target = new_target;
    }

    /// Camera position that puts `target` between the camera and the sun.
    pub fn desired_position(&self, target: Vec3) -> Vec3 {
        let direction = (target - self.tuning.sun_position).normalize_or_zero();
        target + direction * -self.tuning.follow_distance
    }

    /// Advance one frame.
    pub fn tick<C, O>(&mut self, target: Option<Vec3>, camera: &mut C, mut controls: Option<&mut O>)
    where
        C: CameraHandle,
        O: OrbitControlsHandle<C>,
    {
        if let Some(controls) = controls.as_deref_mut() {
            controls.update(camera);
        }

        match target {
            Some(target) => {
                let desired = self.desired_position(target);
                let lerp = self.tuning.follow_lerp;
                camera.set_position(camera.position().lerp(desired, lerp));

                match controls {
                    Some(controls) => {
                        controls.set_target(controls.target().lerp(target, lerp));
                        controls.set_enabled(false);
                    }
                    None => camera.look_at(target),
                }
                self.resetting = false;
            }
            None if self.resetting => {
                let t = self.tuning;
                camera.set_position(camera.position().lerp(t.default_position, t.reset_lerp));
                let camera_done = camera.position().distance(t.default_position) < t.reset_epsilon;

                match controls {
                    Some(controls) => {
                        controls.set_target(controls.target().lerp(t.default_target, t.reset_lerp));
                        let target_done =
                            controls.target().distance(t.default_target) < t.reset_epsilon;
                        if camera_done && target_done {
                            camera.set_position(t.default_position);
                            controls.set_target(t.default_target);
                            self.resetting = false;
                        }
                    }
                    None => {
                        if camera_done {
                            camera.set_position(t.default_position);
                            self.resetting = false;
                        }
                        camera.look_at(t.default_target);
                    }
                }
            }
            None => {
                if let Some(controls) = controls {
                    controls.set_enabled(true);
                }
            }
        }
    }
}

pub fn camera_follow_system(
    target: Res<FollowTarget>,
    mut controller: ResMut<CameraFollowController>,
    mut cameras: Query<(&mut Transform, Option<&mut OrbitControls>), With<FollowCamera>>,
) {
    let Ok((mut transform, controls)) = cameras.single_mut() else {
        return;
    };

    match controls {
        Some(mut controls) => {
            controller.tick(target.0, transform.as_mut(), Some(controls.as_mut()));
        }
        None => {
            controller.tick::<Transform, OrbitControls>(target.0, transform.as_mut(), None);
        }
    }
}
