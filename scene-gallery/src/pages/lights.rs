use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;
use constants::lighting::{ambient_brightness, directional_illuminance, point_intensity};

use super::material::tumble_rotation;
use super::orbit_page_camera;
use crate::engine::core::app_state::GalleryPage;
use crate::engine::scene::helpers::{
    LightHelper, LightHelperShape, axes_helper, light_helper, set_light_helpers_visible,
};
use crate::ui::parameter_panel::ParameterPanel;

const PAGE: GalleryPage = GalleryPage::Lights;

/// Half-angle of the spot light standing in for a rectangular area light.
const AREA_SPREAD: f32 = FRAC_PI_2 * 0.9;

pub struct LightsPagePlugin;

impl Plugin for LightsPagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_lights_scene).add_systems(
            Update,
            (tumble_shapes, toggle_helpers)
                .run_if(in_state(PAGE).and(resource_exists::<ParameterPanel>)),
        );
    }
}

#[derive(Component)]
struct TumblingShape;

/// Inner cone angle of a spot light whose edge softens over `penumbra` of its angle.
pub fn spot_inner_angle(outer_angle: f32, penumbra: f32) -> f32 {
    outer_angle * (1.0 - penumbra.clamp(0.0, 1.0))
}

fn spawn_lights_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ParameterPanel::new("Lights").toggle("helpers", "showHelpers", true));
    commands.spawn((
        orbit_page_camera(
            Vec3::new(1.0, 1.0, 2.0),
            Vec3::ZERO,
            75.0,
            Color::srgb_u8(0x11, 0x11, 0x11),
        ),
        StateScoped(PAGE),
    ));
    commands.insert_resource(AmbientLight {
        brightness: ambient_brightness(0.5),
        ..default()
    });

    let helper_scale = 0.2;

    commands
        .spawn((
            DirectionalLight {
                color: Color::srgb_u8(0x00, 0xff, 0xfc),
                illuminance: directional_illuminance(0.3),
                ..default()
            },
            Transform::from_xyz(1.0, 0.25, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
            StateScoped(PAGE),
        ))
        .with_child(light_helper(
            &mut meshes,
            &mut materials,
            LightHelperShape::Directional { size: helper_scale },
            Color::srgb(1.0, 0.0, 0.0),
        ));

    // Sky and ground halves of a hemisphere light.
    for (color, from) in [
        (Color::srgb(1.0, 0.0, 0.0), Vec3::Y),
        (Color::srgb(0.0, 0.0, 1.0), Vec3::NEG_Y),
    ] {
        commands
            .spawn((
                DirectionalLight {
                    color,
                    illuminance: directional_illuminance(0.3),
                    ..default()
                },
                Transform::from_translation(from).looking_at(Vec3::ZERO, Vec3::Z),
                StateScoped(PAGE),
            ))
            .with_child(light_helper(
                &mut meshes,
                &mut materials,
                LightHelperShape::Point { size: helper_scale },
                color,
            ));
    }

    commands
        .spawn((
            PointLight {
                color: Color::srgb_u8(0xff, 0x90, 0x00),
                intensity: point_intensity(0.5),
                range: 10.0,
                ..default()
            },
            Transform::from_xyz(1.0, -0.5, 1.0),
            StateScoped(PAGE),
        ))
        .with_child(light_helper(
            &mut meshes,
            &mut materials,
            LightHelperShape::Point { size: 0.3 },
            Color::srgb(1.0, 0.65, 0.0),
        ));

    let area_color = Color::srgb_u8(0x4e, 0x00, 0xff);
    commands
        .spawn((
            SpotLight {
                color: area_color,
                intensity: point_intensity(2.0),
                outer_angle: AREA_SPREAD,
                inner_angle: 0.0,
                ..default()
            },
            Transform::from_xyz(-1.5, 0.0, 1.5).looking_at(Vec3::ZERO, Vec3::Y),
            StateScoped(PAGE),
        ))
        .with_child(light_helper(
            &mut meshes,
            &mut materials,
            LightHelperShape::Directional { size: 2.5 },
            area_color,
        ));

    let spot_angle = PI * 0.1;
    commands
        .spawn((
            SpotLight {
                color: Color::srgb_u8(0x78, 0xff, 0x00),
                intensity: point_intensity(0.5),
                range: 7.0,
                outer_angle: spot_angle,
                inner_angle: spot_inner_angle(spot_angle, 0.25),
                ..default()
            },
            Transform::from_xyz(0.0, 2.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
            StateScoped(PAGE),
        ))
        .with_child(light_helper(
            &mut meshes,
            &mut materials,
            LightHelperShape::Spot {
                range: 7.0,
                angle: spot_angle,
            },
            Color::srgb(0.0, 1.0, 0.0),
        ));

    let material = materials.add(StandardMaterial {
        perceptual_roughness: 0.4,
        ..default()
    });
    let shapes = [
        (Sphere::new(0.5).mesh().uv(32, 32), Vec3::new(-1.5, 0.0, 0.0)),
        (Mesh::from(Cuboid::from_length(0.75)), Vec3::ZERO),
        (Mesh::from(Torus::new(0.1, 0.5)), Vec3::new(1.5, 0.0, 0.0)),
    ];
    for (mesh, position) in shapes {
        commands.spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(position),
            TumblingShape,
            StateScoped(PAGE),
        ));
    }
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(5.0, 5.0))),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, -0.65, 0.0),
        StateScoped(PAGE),
    ));

    commands.spawn((axes_helper(&mut meshes, &mut materials, 2.0), StateScoped(PAGE)));
}

fn tumble_shapes(time: Res<Time>, mut shapes: Query<&mut Transform, With<TumblingShape>>) {
    let rotation = tumble_rotation(time.elapsed_secs());
    for mut transform in &mut shapes {
        transform.rotation = rotation;
    }
}

fn toggle_helpers(
    panel: Res<ParameterPanel>,
    mut helpers: Query<&mut Visibility, With<LightHelper>>,
) {
    if panel.is_changed() {
        set_light_helpers_visible(panel.toggle_value("helpers"), &mut helpers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penumbra_narrows_the_inner_cone() {
        assert_eq!(spot_inner_angle(0.4, 0.0), 0.4);
        assert!((spot_inner_angle(0.4, 0.25) - 0.3).abs() < 1e-6);
        assert_eq!(spot_inner_angle(0.4, 2.0), 0.0);
    }

    #[test]
    fn helpers_follow_the_toggle() {
        let mut app = App::new();
        app.insert_resource(ParameterPanel::new("Lights").toggle("helpers", "showHelpers", true))
            .add_systems(Update, toggle_helpers);
        let helper = app
            .world_mut()
            .spawn((LightHelper, Visibility::Inherited))
            .id();

        app.world_mut()
            .resource_mut::<ParameterPanel>()
            .set_toggle("helpers", false);
        app.update();
        assert_eq!(app.world().get::<Visibility>(helper), Some(&Visibility::Hidden));

        app.world_mut()
            .resource_mut::<ParameterPanel>()
            .set_toggle("helpers", true);
        app.update();
        assert_eq!(app.world().get::<Visibility>(helper), Some(&Visibility::Inherited));
    }
}
