use bevy::pbr::wireframe::{Wireframe, WireframeColor};
use bevy::prelude::*;

use super::orbit_page_camera;
use crate::engine::core::app_state::GalleryPage;
use crate::ui::parameter_panel::ParameterPanel;

const PAGE: GalleryPage = GalleryPage::DebugUi;

const SPIN_TARGET: f32 = 10.0;
const SPIN_SECONDS: f32 = 2.0;
const IDLE_SPIN: Vec3 = Vec3::new(0.005, 0.01, 0.0);

pub struct DebugUiPagePlugin;

impl Plugin for DebugUiPagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_debug_scene).add_systems(
            Update,
            (start_spin, rotate_debug_box, apply_debug_parameters)
                .chain()
                .run_if(in_state(PAGE).and(resource_exists::<ParameterPanel>)),
        );
    }
}

/// Euler angles kept unwrapped so a spin can run past a full turn.
#[derive(Component, Default)]
struct DebugBox {
    euler: Vec3,
    spin_started: Option<f32>,
    material: Handle<StandardMaterial>,
}

/// Ease-out used by the spin tween.
pub fn ease_out_quad(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p) * (1.0 - p)
}

/// Angle on every axis `elapsed` seconds into the spin, `None` once finished.
pub fn spin_angle(elapsed: f32) -> Option<f32> {
    if elapsed >= SPIN_SECONDS {
        return None;
    }
    Some(SPIN_TARGET * ease_out_quad(elapsed / SPIN_SECONDS))
}

fn debug_panel() -> ParameterPanel {
    ParameterPanel::new("Debug")
        .heading("Position")
        .slider("x", "x", -3.0, 3.0, 0.01, 0.0)
        .slider("elevation", "elevation", -3.0, 3.0, 0.01, 0.0)
        .heading("Appearance")
        .toggle("visible", "visible", true)
        .toggle("wireframe", "wireframe", false)
        .colour("color", "color", Color::srgb(1.0, 0.0, 0.0))
        .action("spin", "spin")
}

fn spawn_debug_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(debug_panel());
    commands.spawn((
        orbit_page_camera(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 75.0, Color::BLACK),
        StateScoped(PAGE),
    ));

    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.0, 0.0),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
        MeshMaterial3d(material.clone()),
        Transform::default(),
        DebugBox {
            material,
            ..default()
        },
        StateScoped(PAGE),
    ));
}

fn start_spin(
    time: Res<Time>,
    mut panel: ResMut<ParameterPanel>,
    mut boxes: Query<&mut DebugBox>,
) {
    if !panel.take_action("spin") {
        return;
    }
    for mut debug_box in &mut boxes {
        debug_box.spin_started = Some(time.elapsed_secs());
    }
}

/// The spin tween owns the rotation while it runs, otherwise the box drifts.
fn rotate_debug_box(time: Res<Time>, mut boxes: Query<(&mut DebugBox, &mut Transform)>) {
    for (mut debug_box, mut transform) in &mut boxes {
        let spin = debug_box
            .spin_started
            .and_then(|start| spin_angle(time.elapsed_secs() - start));

        debug_box.euler = match (spin, debug_box.spin_started) {
            (Some(angle), _) => Vec3::splat(angle),
            (None, Some(_)) => {
                debug_box.spin_started = None;
                Vec3::splat(SPIN_TARGET) + IDLE_SPIN
            }
            (None, None) => debug_box.euler + IDLE_SPIN,
        };

        let e = debug_box.euler;
        transform.rotation = Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z);
    }
}

fn apply_debug_parameters(
    mut commands: Commands,
    panel: Res<ParameterPanel>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut boxes: Query<(Entity, &DebugBox, &mut Transform, &mut Visibility)>,
) {
    if !panel.is_changed() {
        return;
    }
    let wireframe = panel.toggle_value("wireframe");
    let color = panel.colour_value("color");

    for (entity, debug_box, mut transform, mut visibility) in &mut boxes {
        transform.translation.x = panel.float("x");
        transform.translation.y = panel.float("elevation");
        visibility.set_if_neq(if panel.toggle_value("visible") {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });

        // In wireframe mode the fill turns fully transparent and only edges remain.
        if let Some(material) = materials.get_mut(&debug_box.material) {
            material.base_color = if wireframe { color.with_alpha(0.0) } else { color };
        }
        if wireframe {
            commands
                .entity(entity)
                .insert((Wireframe, WireframeColor { color }));
        } else {
            commands
                .entity(entity)
                .remove::<(Wireframe, WireframeColor)>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    #[test]
    fn spin_eases_out_to_ten_radians() {
        assert_eq!(spin_angle(0.0), Some(0.0));
        let halfway = spin_angle(1.0).unwrap();
        assert!((halfway - 7.5).abs() < 1e-5);
        assert_eq!(spin_angle(2.0), None);
        assert_eq!(ease_out_quad(1.5), 1.0);
    }

    #[test]
    fn panel_values_reach_the_box() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<StandardMaterial>>()
            .insert_resource(debug_panel())
            .add_systems(Update, apply_debug_parameters);
        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        let entity = app
            .world_mut()
            .spawn((
                DebugBox {
                    material: material.clone(),
                    ..default()
                },
                Transform::default(),
                Visibility::default(),
            ))
            .id();

        {
            let mut panel = app.world_mut().resource_mut::<ParameterPanel>();
            panel.set_float("x", 1.25);
            panel.set_float("elevation", -2.0);
            panel.set_toggle("visible", false);
            panel.set_toggle("wireframe", true);
        }
        app.update();

        let world = app.world();
        let transform = world.get::<Transform>(entity).unwrap();
        assert!((transform.translation.x - 1.25).abs() < 1e-5);
        assert!((transform.translation.y + 2.0).abs() < 1e-5);
        assert_eq!(world.get::<Visibility>(entity), Some(&Visibility::Hidden));
        assert!(world.get::<Wireframe>(entity).is_some());
        let material = world
            .resource::<Assets<StandardMaterial>>()
            .get(&material)
            .unwrap();
        assert_eq!(material.base_color.alpha(), 0.0);
    }

    #[test]
    fn spin_action_runs_then_hands_back_to_drift() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(debug_panel())
            .add_systems(Update, (start_spin, rotate_debug_box).chain());
        let entity = app
            .world_mut()
            .spawn((DebugBox::default(), Transform::default()))
            .id();

        app.world_mut()
            .resource_mut::<ParameterPanel>()
            .trigger_action("spin");
        app.update();
        assert!(app.world().get::<DebugBox>(entity).unwrap().spin_started.is_some());

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(3));
        app.world_mut()
            .run_system_once(rotate_debug_box)
            .unwrap();

        let debug_box = app.world().get::<DebugBox>(entity).unwrap();
        assert!(debug_box.spin_started.is_none());
        assert!((debug_box.euler.y - (SPIN_TARGET + IDLE_SPIN.y)).abs() < 1e-5);
    }
}
