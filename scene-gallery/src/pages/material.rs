use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::view::{ColorGrading, ColorGradingGlobal};
use constants::lighting::{ambient_brightness, point_intensity};

use super::orbit_page_camera;
use crate::constants::path::{DOOR_ALPHA_TEXTURE, DOOR_AO_TEXTURE, DOOR_HEIGHT_TEXTURE};
use crate::engine::core::app_state::GalleryPage;
use crate::engine::scene::alpha_mask::PendingAlphaMask;
use crate::engine::scene::geometry::with_tangents;
use crate::ui::parameter_panel::ParameterPanel;

const PAGE: GalleryPage = GalleryPage::Material;

const EXPOSURE: f32 = 0.8;

pub struct MaterialPagePlugin;

impl Plugin for MaterialPagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_material_scene)
            .add_systems(OnExit(PAGE), |mut commands: Commands| {
                commands.remove_resource::<SharedMaterial>();
            })
            .add_systems(
                Update,
                (
                    tumble_shapes,
                    apply_material_parameters.run_if(resource_exists::<ParameterPanel>),
                )
                    .run_if(in_state(PAGE).and(resource_exists::<SharedMaterial>)),
            );
    }
}

/// The one material every shape on the page renders with.
#[derive(Resource)]
struct SharedMaterial {
    material: Handle<StandardMaterial>,
}

#[derive(Component)]
struct TumblingShape;

pub fn tumble_rotation(elapsed: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, 0.15 * elapsed, 0.1 * elapsed, 0.0)
}

fn material_panel() -> ParameterPanel {
    ParameterPanel::new("Material")
        .slider("metalness", "metalness", 0.0, 1.0, 0.01, 0.7)
        .slider("roughness", "roughness", 0.0, 1.0, 0.01, 0.2)
        .slider("displacement", "displacementScale", 0.0, 1.0, 0.01, 0.05)
}

fn spawn_material_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let panel = material_panel();

    commands
        .spawn((
            orbit_page_camera(Vec3::new(1.0, 1.0, 2.0), Vec3::ZERO, 75.0, Color::BLACK),
            Tonemapping::AcesFitted,
            StateScoped(PAGE),
        ))
        .insert(ColorGrading {
            global: ColorGradingGlobal {
                exposure: EXPOSURE.log2(),
                ..default()
            },
            ..default()
        });

    commands.insert_resource(AmbientLight {
        brightness: ambient_brightness(0.5),
        ..default()
    });
    commands.spawn((
        PointLight {
            intensity: point_intensity(0.5),
            ..default()
        },
        Transform::from_xyz(2.0, 3.0, 4.0),
        StateScoped(PAGE),
    ));

    let alpha: Handle<Image> = asset_server.load(DOOR_ALPHA_TEXTURE);
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(alpha.clone()),
        occlusion_texture: Some(asset_server.load(DOOR_AO_TEXTURE)),
        depth_map: Some(asset_server.load(DOOR_HEIGHT_TEXTURE)),
        parallax_depth_scale: panel.float("displacement"),
        metallic: panel.float("metalness"),
        perceptual_roughness: panel.float("roughness"),
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    let shapes = [
        (Sphere::new(0.5).mesh().uv(16, 16), Vec3::new(-1.5, 0.0, 0.0)),
        (Mesh::from(Rectangle::new(1.0, 1.0)), Vec3::ZERO),
        (Mesh::from(Torus::new(0.1, 0.5)), Vec3::new(1.5, 0.0, 0.0)),
    ];
    for (mesh, position) in shapes {
        commands.spawn((
            Mesh3d(meshes.add(with_tangents(mesh))),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(position),
            TumblingShape,
            StateScoped(PAGE),
        ));
    }

    // The mask doubles as the colour map, so the surface is see-through where it is dark.
    commands.spawn((
        PendingAlphaMask {
            colour: alpha.clone(),
            mask: alpha,
            material: material.clone(),
        },
        StateScoped(PAGE),
    ));
    commands.insert_resource(SharedMaterial { material });
    commands.insert_resource(panel);
}

fn tumble_shapes(time: Res<Time>, mut shapes: Query<&mut Transform, With<TumblingShape>>) {
    let rotation = tumble_rotation(time.elapsed_secs());
    for mut transform in &mut shapes {
        transform.rotation = rotation;
    }
}

fn apply_material_parameters(
    panel: Res<ParameterPanel>,
    shared: Res<SharedMaterial>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !panel.is_changed() {
        return;
    }
    if let Some(material) = materials.get_mut(&shared.material) {
        material.metallic = panel.float("metalness");
        material.perceptual_roughness = panel.float("roughness");
        material.parallax_depth_scale = panel.float("displacement");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_starts_at_the_shipped_values() {
        let panel = material_panel();
        assert!((panel.float("metalness") - 0.7).abs() < 1e-5);
        assert!((panel.float("roughness") - 0.2).abs() < 1e-5);
        assert!((panel.float("displacement") - 0.05).abs() < 1e-5);
    }

    #[test]
    fn shapes_tumble_at_different_rates() {
        let (x, y, z) = tumble_rotation(2.0).to_euler(EulerRot::XYZ);
        assert!((x - 0.3).abs() < 1e-5);
        assert!((y - 0.2).abs() < 1e-5);
        assert!(z.abs() < 1e-5);
    }
}
