//! Solar system page: orbiting planets, an asteroid belt, a star field and a
//! camera that follows whichever planet is selected.

pub mod asteroid_belt;
pub mod planets;
pub mod selection;
pub mod space_stars;

use bevy::prelude::*;
use constants::camera::{DEFAULT_CAMERA_POSITION, DEFAULT_CAMERA_TARGET};
use constants::lighting::{ambient_brightness, point_intensity};
use rand::SeedableRng;
use rand::rngs::StdRng;

use self::planets::OrbitClock;
use self::selection::{PlanetSelectionRequest, PressOrigin, SelectedPlanet};
use super::orbit_page_camera;
use crate::engine::assets::gallery_config::GalleryConfig;
use crate::engine::camera::follow::{
    CameraFollowController, FollowCamera, FollowSystems, FollowTarget, camera_follow_system,
};
use crate::engine::camera::orbit_controls::orbit_controls_input;
use crate::engine::core::app_state::GalleryPage;
use crate::ui::parameter_panel::ParameterPanel;

pub(crate) const PAGE: GalleryPage = GalleryPage::SolarSystem;

/// Reach of the sun's light; covers the outermost orbit.
const SUNLIGHT_RANGE: f32 = 100.0;

pub struct SolarSystemPagePlugin;

impl Plugin for SolarSystemPagePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlanetSelectionRequest>()
            .configure_sets(
                Update,
                (FollowSystems::Observe, FollowSystems::Tick)
                    .chain()
                    .after(orbit_controls_input)
                    .run_if(in_state(PAGE).and(resource_exists::<CameraFollowController>)),
            )
            .add_systems(OnEnter(PAGE), spawn_solar_system)
            .add_systems(OnExit(PAGE), clear_solar_system_resources)
            .add_systems(
                Update,
                (planets::advance_orbit_clock, planets::move_planets)
                    .chain()
                    .before(FollowSystems::Observe)
                    .run_if(
                        in_state(PAGE)
                            .and(resource_exists::<ParameterPanel>)
                            .and(resource_exists::<OrbitClock>),
                    ),
            )
            .add_systems(
                Update,
                (
                    selection::select_planet_on_click,
                    selection::apply_selection_requests,
                    selection::observe_selection_change,
                    selection::refresh_follow_target,
                )
                    .chain()
                    .in_set(FollowSystems::Observe),
            )
            .add_systems(Update, camera_follow_system.in_set(FollowSystems::Tick));
    }
}

fn solar_system_panel(config: &GalleryConfig) -> ParameterPanel {
    ParameterPanel::new("Solar System").slider(
        "rotation_speed",
        "rotationSpeed",
        0.0,
        100.0,
        5.0,
        config.solar_system.rotation_speed,
    )
}

fn spawn_solar_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<GalleryConfig>,
) {
    commands.spawn((
        orbit_page_camera(DEFAULT_CAMERA_POSITION, DEFAULT_CAMERA_TARGET, 75.0, Color::BLACK),
        FollowCamera,
        StateScoped(PAGE),
    ));

    commands.insert_resource(AmbientLight {
        brightness: ambient_brightness(0.08),
        ..default()
    });
    commands.spawn((
        PointLight {
            intensity: point_intensity(100.0),
            range: SUNLIGHT_RANGE,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
        StateScoped(PAGE),
    ));

    planets::spawn_sun(&mut commands, &mut meshes, &mut materials, &asset_server);
    planets::spawn_planets(&mut commands, &mut meshes, &mut materials, &asset_server);

    let mut rng = StdRng::seed_from_u64(config.random_seed);
    let solar = &config.solar_system;
    asteroid_belt::spawn_asteroid_belt(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut rng,
        solar.asteroid_count,
    );
    space_stars::spawn_space_stars(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut rng,
        solar.star_count,
        solar.star_radius,
    );

    commands.insert_resource(solar_system_panel(&config));
    commands.insert_resource(OrbitClock::default());
    commands.insert_resource(SelectedPlanet::default());
    commands.insert_resource(PressOrigin::default());
    commands.insert_resource(CameraFollowController::default());
    commands.insert_resource(FollowTarget::default());

    info!(
        "Solar system ready: {} asteroids, {} stars",
        solar.asteroid_count, solar.star_count
    );
}

fn clear_solar_system_resources(mut commands: Commands) {
    commands.remove_resource::<OrbitClock>();
    commands.remove_resource::<SelectedPlanet>();
    commands.remove_resource::<PressOrigin>();
    commands.remove_resource::<CameraFollowController>();
    commands.remove_resource::<FollowTarget>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    use super::selection::PlanetId;
    use crate::engine::camera::follow::FollowMode;
    use crate::engine::camera::orbit_controls::OrbitControls;

    /// Page resources and the follow loop, without any rendering.
    fn page_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<GalleryPage>()
            .add_event::<PlanetSelectionRequest>()
            .add_systems(
                OnEnter(PAGE),
                |mut commands: Commands| {
                    commands.insert_resource(SelectedPlanet::default());
                    commands.insert_resource(CameraFollowController::default());
                    commands.insert_resource(FollowTarget::default());
                    commands.spawn((
                        Transform::from_translation(DEFAULT_CAMERA_POSITION),
                        OrbitControls::new(Vec3::ZERO).with_damping(),
                        FollowCamera,
                        StateScoped(PAGE),
                    ));
                    for id in PlanetId::all() {
                        commands.spawn((
                            planets::Planet(id),
                            Transform::from_xyz(id.info().orbit_radius, 0.0, 0.0),
                            StateScoped(PAGE),
                        ));
                    }
                },
            )
            .add_systems(OnExit(PAGE), clear_solar_system_resources)
            .enable_state_scoped_entities::<GalleryPage>()
            .configure_sets(
                Update,
                (FollowSystems::Observe, FollowSystems::Tick)
                    .chain()
                    .run_if(in_state(PAGE).and(resource_exists::<CameraFollowController>)),
            )
            .add_systems(
                Update,
                (
                    selection::apply_selection_requests,
                    selection::observe_selection_change,
                    selection::refresh_follow_target,
                )
                    .chain()
                    .in_set(FollowSystems::Observe),
            )
            .add_systems(Update, camera_follow_system.in_set(FollowSystems::Tick));
        app
    }

    fn go_to(app: &mut App, page: GalleryPage) {
        app.world_mut().resource_mut::<NextState<GalleryPage>>().set(page);
        app.update();
    }

    fn camera_position(app: &mut App) -> Vec3 {
        let mut cameras = app.world_mut().query_filtered::<&Transform, With<FollowCamera>>();
        cameras.single(app.world()).unwrap().translation
    }

    #[test]
    fn panel_defaults_to_configured_speed() {
        let config = GalleryConfig::default();
        let panel = solar_system_panel(&config);
        assert_eq!(panel.float("rotation_speed"), 30.0);
    }

    #[test]
    fn selected_planet_pulls_the_camera_along() {
        let mut app = page_app();
        app.update();
        go_to(&mut app, PAGE);

        let start = camera_position(&mut app);
        let jupiter = PlanetId::from_name("jupiter");
        app.world_mut().send_event(PlanetSelectionRequest { planet: jupiter });
        for _ in 0..30 {
            app.update();
        }

        let controller = app.world().resource::<CameraFollowController>();
        let desired = controller.desired_position(Vec3::new(17.0, 0.0, 0.0));
        assert_eq!(controller.mode(), FollowMode::Following);

        assert!(camera_position(&mut app).distance(desired) < start.distance(desired));
    }

    #[test]
    fn leaving_the_page_drops_follow_state() {
        let mut app = page_app();
        app.update();
        go_to(&mut app, PAGE);
        assert!(app.world().contains_resource::<CameraFollowController>());

        go_to(&mut app, GalleryPage::Setup);
        assert!(!app.world().contains_resource::<CameraFollowController>());
        assert!(!app.world().contains_resource::<SelectedPlanet>());
        assert!(!app.world().contains_resource::<FollowTarget>());

        let mut cameras = app.world_mut().query::<&FollowCamera>();
        assert_eq!(cameras.iter(app.world()).count(), 0);
    }
}
