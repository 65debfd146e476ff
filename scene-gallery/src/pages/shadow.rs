use std::f32::consts::PI;

use bevy::pbr::CascadeShadowConfigBuilder;
use bevy::prelude::*;
use constants::lighting::{ambient_brightness, directional_illuminance, point_intensity};

use super::orbit_page_camera;
use crate::engine::core::app_state::GalleryPage;
use crate::engine::scene::geometry::radial_shadow_image;
use crate::engine::scene::helpers::{LightHelperShape, axes_helper, light_helper};
use crate::ui::parameter_panel::ParameterPanel;

const PAGE: GalleryPage = GalleryPage::Shadow;

const BOUNCE_RADIUS: f32 = 1.5;
const FLOOR_HEIGHT: f32 = -0.5;
/// Lifts the blob just above the floor to avoid z-fighting.
const BLOB_LIFT: f32 = 0.01;
const BLOB_MAX_OPACITY: f32 = 0.3;
const BLOB_TEXTURE_SIZE: u32 = 128;

pub struct ShadowPagePlugin;

impl Plugin for ShadowPagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_shadow_scene)
            .add_systems(OnExit(PAGE), |mut commands: Commands| {
                commands.remove_resource::<ShadowMaterials>();
            })
            .add_systems(
                Update,
                (bounce_sphere, apply_shadow_parameters).run_if(
                    in_state(PAGE)
                        .and(resource_exists::<ParameterPanel>)
                        .and(resource_exists::<ShadowMaterials>),
                ),
            );
    }
}

#[derive(Resource)]
struct ShadowMaterials {
    surface: Handle<StandardMaterial>,
    blob: Handle<StandardMaterial>,
}

#[derive(Component)]
struct BouncingSphere;

#[derive(Component)]
struct BlobShadow;

/// Which panel slider drives a light's intensity.
#[derive(Component, Clone, Copy)]
enum ShadowLight {
    Directional,
    Spot,
    Point,
}

pub fn bounce_position(elapsed: f32) -> Vec3 {
    Vec3::new(
        (elapsed).cos() * BOUNCE_RADIUS,
        (elapsed * 3.0).sin().abs(),
        (elapsed).sin() * BOUNCE_RADIUS,
    )
}

/// The blob fades as the sphere rises.
pub fn blob_opacity(height: f32) -> f32 {
    ((1.0 - height) * BLOB_MAX_OPACITY).clamp(0.0, 1.0)
}

fn shadow_panel() -> ParameterPanel {
    ParameterPanel::new("Shadows")
        .heading("Material")
        .slider("metalness", "metalness", 0.0, 1.0, 0.001, 0.0)
        .slider("roughness", "roughness", 0.0, 1.0, 0.001, 0.7)
        .heading("Lights")
        .slider("ambient", "ambientIntensity", 0.0, 1.0, 0.001, 0.4)
        .slider("directional", "dirIntensity", 0.0, 1.0, 0.001, 0.4)
        .slider("spot", "spotIntensity", 0.0, 1.0, 0.001, 0.4)
        .slider("point", "pointIntensity", 0.0, 1.0, 0.001, 0.3)
}

fn spawn_shadow_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let panel = shadow_panel();

    // Slightly off the pole so the camera's up vector stays defined.
    commands.spawn((
        orbit_page_camera(
            Vec3::new(0.0, 10.0, 0.01),
            Vec3::ZERO,
            75.0,
            Color::srgb_u8(0x11, 0x11, 0x11),
        ),
        StateScoped(PAGE),
    ));
    commands.insert_resource(AmbientLight {
        brightness: ambient_brightness(panel.float("ambient")),
        ..default()
    });

    commands
        .spawn((
            DirectionalLight {
                illuminance: directional_illuminance(panel.float("directional")),
                shadows_enabled: true,
                ..default()
            },
            CascadeShadowConfigBuilder {
                num_cascades: 1,
                minimum_distance: 0.5,
                maximum_distance: 50.0,
                ..default()
            }
            .build(),
            Transform::from_xyz(4.0, 2.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
            ShadowLight::Directional,
            StateScoped(PAGE),
        ))
        .with_child(light_helper(
            &mut meshes,
            &mut materials,
            LightHelperShape::Directional { size: 0.5 },
            Color::WHITE,
        ));
    commands.spawn((
        SpotLight {
            intensity: point_intensity(panel.float("spot")),
            range: 10.0,
            outer_angle: PI * 0.3,
            inner_angle: 0.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 2.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
        ShadowLight::Spot,
        StateScoped(PAGE),
    ));
    commands.spawn((
        PointLight {
            intensity: point_intensity(panel.float("point")),
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(-1.0, 1.0, 0.0),
        ShadowLight::Point,
        StateScoped(PAGE),
    ));

    let surface = materials.add(StandardMaterial {
        metallic: panel.float("metalness"),
        perceptual_roughness: panel.float("roughness"),
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(0.5).mesh().uv(32, 32))),
        MeshMaterial3d(surface.clone()),
        Transform::from_translation(bounce_position(0.0)),
        BouncingSphere,
        StateScoped(PAGE),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(6.0, 5.0))),
        MeshMaterial3d(surface.clone()),
        Transform::from_xyz(0.0, FLOOR_HEIGHT, 0.0),
        StateScoped(PAGE),
    ));

    let blob = materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(BLOB_MAX_OPACITY),
        base_color_texture: Some(images.add(radial_shadow_image(BLOB_TEXTURE_SIZE))),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(1.5, 1.5))),
        MeshMaterial3d(blob.clone()),
        Transform::from_xyz(0.0, FLOOR_HEIGHT + BLOB_LIFT, 0.0),
        BlobShadow,
        StateScoped(PAGE),
    ));

    commands.spawn((axes_helper(&mut meshes, &mut materials, 3.0), StateScoped(PAGE)));
    commands.insert_resource(ShadowMaterials { surface, blob });
    commands.insert_resource(panel);
}

/// Sphere hops around a circle and its blob shadow tracks it on the floor.
fn bounce_sphere(
    time: Res<Time>,
    shared: Res<ShadowMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut spheres: Query<&mut Transform, (With<BouncingSphere>, Without<BlobShadow>)>,
    mut blobs: Query<&mut Transform, (With<BlobShadow>, Without<BouncingSphere>)>,
) {
    let position = bounce_position(time.elapsed_secs());
    for mut transform in &mut spheres {
        transform.translation = position;
    }
    for mut transform in &mut blobs {
        transform.translation = Vec3::new(position.x, FLOOR_HEIGHT + BLOB_LIFT, position.z);
    }
    if let Some(blob) = materials.get_mut(&shared.blob) {
        blob.base_color.set_alpha(blob_opacity(position.y));
    }
}

fn apply_shadow_parameters(
    panel: Res<ParameterPanel>,
    shared: Res<ShadowMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ambient: ResMut<AmbientLight>,
    mut directional: Query<(&ShadowLight, &mut DirectionalLight)>,
    mut spots: Query<(&ShadowLight, &mut SpotLight)>,
    mut points: Query<(&ShadowLight, &mut PointLight)>,
) {
    if !panel.is_changed() {
        return;
    }
    if let Some(surface) = materials.get_mut(&shared.surface) {
        surface.metallic = panel.float("metalness");
        surface.perceptual_roughness = panel.float("roughness");
    }
    ambient.brightness = ambient_brightness(panel.float("ambient"));
    for (_, mut light) in &mut directional {
        light.illuminance = directional_illuminance(panel.float("directional"));
    }
    for (kind, mut light) in &mut spots {
        if matches!(kind, ShadowLight::Spot) {
            light.intensity = point_intensity(panel.float("spot"));
        }
    }
    for (kind, mut light) in &mut points {
        if matches!(kind, ShadowLight::Point) {
            light.intensity = point_intensity(panel.float("point"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_never_dips_below_its_rest_height() {
        for i in 0..200 {
            let p = bounce_position(i as f32 * 0.05);
            assert!(p.y >= 0.0 && p.y <= 1.0);
            assert!((Vec2::new(p.x, p.z).length() - BOUNCE_RADIUS).abs() < 1e-4);
        }
    }

    #[test]
    fn blob_fades_with_height() {
        assert!((blob_opacity(0.0) - 0.3).abs() < 1e-6);
        assert_eq!(blob_opacity(1.0), 0.0);
        assert!(blob_opacity(0.2) > blob_opacity(0.8));
    }

    #[test]
    fn intensity_sliders_drive_the_lights() {
        let mut app = App::new();
        app.init_resource::<Assets<StandardMaterial>>()
            .insert_resource(AmbientLight::default())
            .insert_resource(shadow_panel())
            .add_systems(Update, apply_shadow_parameters);
        let (surface, blob) = {
            let mut materials = app.world_mut().resource_mut::<Assets<StandardMaterial>>();
            (
                materials.add(StandardMaterial::default()),
                materials.add(StandardMaterial::default()),
            )
        };
        app.insert_resource(ShadowMaterials {
            surface: surface.clone(),
            blob,
        });
        let spot = app
            .world_mut()
            .spawn((SpotLight::default(), ShadowLight::Spot))
            .id();

        {
            let mut panel = app.world_mut().resource_mut::<ParameterPanel>();
            panel.set_float("spot", 1.0);
            panel.set_float("ambient", 0.0);
            panel.set_float("roughness", 0.25);
        }
        app.update();

        let world = app.world();
        assert_eq!(world.get::<SpotLight>(spot).unwrap().intensity, point_intensity(1.0));
        assert_eq!(world.resource::<AmbientLight>().brightness, 0.0);
        let surface = world.resource::<Assets<StandardMaterial>>().get(&surface).unwrap();
        assert!((surface.perceptual_roughness - 0.25).abs() < 1e-5);
    }
}
