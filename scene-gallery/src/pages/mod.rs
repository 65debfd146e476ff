//! Gallery pages, one plugin per route.
//!
//! Each page spawns its scene on `OnEnter`, tags every entity with
//! `StateScoped` so it is despawned on exit, and keeps its per-frame
//! systems behind `in_state`.

pub mod animation;
pub mod camera;
pub mod debug_ui;
pub mod geometries;
pub mod haunted_house;
pub mod lights;
pub mod material;
pub mod setup;
pub mod shadow;
pub mod solar_system;
pub mod text_3d;
pub mod texture;
pub mod transform;

use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;

use crate::engine::camera::orbit_controls::OrbitControls;
use crate::engine::core::app_state::GalleryPage;
use crate::ui::parameter_panel::ParameterPanel;

pub struct GalleryPagesPlugin;

impl Plugin for GalleryPagesPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            setup::SetupPagePlugin,
            transform::TransformPagePlugin,
            animation::AnimationPagePlugin,
            camera::CameraPagePlugin,
            geometries::GeometriesPagePlugin,
            debug_ui::DebugUiPagePlugin,
            texture::TexturePagePlugin,
            material::MaterialPagePlugin,
            text_3d::TextPagePlugin,
            lights::LightsPagePlugin,
            shadow::ShadowPagePlugin,
            haunted_house::HauntedHousePagePlugin,
            solar_system::SolarSystemPagePlugin,
        ));

        for page in GalleryPage::ALL {
            app.add_systems(OnExit(page), clear_page_resources);
        }
    }
}

/// Drop resources that only live for the duration of one page.
fn clear_page_resources(mut commands: Commands) {
    commands.remove_resource::<ParameterPanel>();
    commands.insert_resource(AmbientLight {
        brightness: 0.0,
        ..default()
    });
}

/// Perspective camera at `position` aimed at `target`, clearing to `background`.
pub fn page_camera(position: Vec3, target: Vec3, fov_degrees: f32, background: Color) -> impl Bundle {
    (
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(background),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(position).looking_at(target, Vec3::Y),
    )
}

/// `page_camera` with damped orbit controls around `target`.
pub fn orbit_page_camera(
    position: Vec3,
    target: Vec3,
    fov_degrees: f32,
    background: Color,
) -> impl Bundle {
    (
        page_camera(position, target, fov_degrees, background),
        OrbitControls::new(target).with_damping(),
    )
}

/// Flat colour material that ignores lighting.
pub fn unlit(materials: &mut Assets<StandardMaterial>, color: Color) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn leaving_a_page_drops_its_parameter_panel() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<GalleryPage>()
            .add_systems(OnExit(GalleryPage::Setup), clear_page_resources);
        app.update();

        app.insert_resource(ParameterPanel::new("Setup"));
        app.world_mut()
            .resource_mut::<NextState<GalleryPage>>()
            .set(GalleryPage::Transform);
        app.update();

        assert!(!app.world().contains_resource::<ParameterPanel>());
        assert_eq!(app.world().resource::<AmbientLight>().brightness, 0.0);
    }

    #[test]
    fn page_camera_looks_at_target() {
        let mut world = World::new();
        let entity = world
            .spawn(page_camera(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 75.0, Color::BLACK))
            .id();

        let transform = world.get::<Transform>(entity).unwrap();
        assert!(transform.forward().as_vec3().distance(Vec3::NEG_Z) < 1e-5);
        match world.get::<Projection>(entity).unwrap() {
            Projection::Perspective(p) => assert!((p.fov - 75f32.to_radians()).abs() < 1e-6),
            _ => panic!("expected perspective projection"),
        }
    }
}
