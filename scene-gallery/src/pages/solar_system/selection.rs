//! Planet selection: mouse picking, remote requests and the follow target.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::planets::{PLANETS, PlanetInfo, planet_index};
use serde_json::json;

use super::planets::Planet;
use crate::engine::camera::follow::{CameraFollowController, FollowCamera, FollowTarget};
use crate::engine::scene::geometry::ray_sphere_distance;
use crate::engine::scene::text_sprite::{TextSprite, TextSpriteStyle};
use crate::rpc::web_rpc::WebRpcInterface;

/// Cursor travel in pixels above which a press is an orbit drag, not a click.
const CLICK_TOLERANCE: f32 = 5.0;
const LABEL_GAP: f32 = 0.1;

/// Stable identifier of a planet: its index in the planet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanetId(usize);

impl PlanetId {
    /// Case-insensitive lookup by planet name.
    pub fn from_name(name: &str) -> Option<Self> {
        planet_index(name).map(Self)
    }

    pub fn info(self) -> &'static PlanetInfo {
        &PLANETS[self.0]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn all() -> impl Iterator<Item = PlanetId> {
        (0..PLANETS.len()).map(Self)
    }
}

/// The planet the camera follows, if any.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct SelectedPlanet(pub Option<PlanetId>);

/// Ask for a planet to be selected, or for the selection to be cleared.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlanetSelectionRequest {
    pub planet: Option<PlanetId>,
}

/// Where the primary button went down, to tell clicks from drags.
#[derive(Resource, Debug, Default)]
pub(super) struct PressOrigin(Option<Vec2>);

/// Nearest planet along the ray.
pub fn pick_planet(
    origin: Vec3,
    direction: Vec3,
    planets: impl IntoIterator<Item = (PlanetId, Vec3)>,
) -> Option<PlanetId> {
    planets
        .into_iter()
        .filter_map(|(id, center)| {
            ray_sphere_distance(origin, direction, center, id.info().size).map(|t| (id, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Select the clicked planet, or clear the selection when the click hits
/// empty space. Presses that turn into orbit drags and clicks on the UI
/// are ignored.
pub(super) fn select_planet_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    mut press: ResMut<PressOrigin>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<FollowCamera>>,
    interactions: Query<&Interaction>,
    planets: Query<(&Planet, &GlobalTransform)>,
    mut requests: EventWriter<PlanetSelectionRequest>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor = window.cursor_position();

    if buttons.just_pressed(MouseButton::Left) {
        press.0 = cursor;
    }
    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    let (Some(pressed_at), Some(cursor)) = (press.0.take(), cursor) else {
        return;
    };
    if pressed_at.distance(cursor) > CLICK_TOLERANCE {
        return;
    }
    if interactions.iter().any(|i| *i != Interaction::None) {
        return;
    }
    let Ok((camera_transform, camera)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    let hit = pick_planet(
        ray.origin,
        ray.direction.as_vec3(),
        planets.iter().map(|(planet, transform)| (planet.0, transform.translation())),
    );
    requests.write(PlanetSelectionRequest { planet: hit });
}

pub(super) fn apply_selection_requests(
    mut requests: EventReader<PlanetSelectionRequest>,
    mut selected: ResMut<SelectedPlanet>,
) {
    if let Some(request) = requests.read().last() {
        selected.set_if_neq(SelectedPlanet(request.planet));
    }
}

fn planet_position(planets: &Query<(Entity, &Planet, &Transform)>, id: PlanetId) -> Option<Vec3> {
    planets
        .iter()
        .find(|(_, planet, _)| planet.0 == id)
        .map(|(_, _, transform)| transform.translation)
}

fn selection_label(id: PlanetId) -> TextSprite {
    let style = TextSpriteStyle {
        font_size: 40.0,
        scale_factor: 0.4,
        ..default()
    };
    TextSprite::new(id.name().to_uppercase(), style)
        .with_offset(Vec3::Y * (id.info().size + LABEL_GAP))
}

/// React to a new selection: hand it to the follow controller, move the
/// label and tell the host page.
pub(super) fn observe_selection_change(
    mut commands: Commands,
    selected: Res<SelectedPlanet>,
    mut controller: ResMut<CameraFollowController>,
    planets: Query<(Entity, &Planet, &Transform)>,
    labelled: Query<Entity, (With<Planet>, With<TextSprite>)>,
    rpc: Option<ResMut<WebRpcInterface>>,
) {
    if !selected.is_changed() || selected.is_added() {
        return;
    }

    let target = selected.0.and_then(|id| planet_position(&planets, id));
    controller.on_selection_changed(target);

    for entity in &labelled {
        commands.entity(entity).remove::<TextSprite>();
    }
    if let Some(id) = selected.0 {
        if let Some((entity, ..)) = planets.iter().find(|(_, planet, _)| planet.0 == id) {
            commands.entity(entity).insert(selection_label(id));
        }
        info!("Following {}", id.name());
    } else {
        info!("Planet selection cleared");
    }

    if let Some(mut rpc) = rpc {
        rpc.send_notification("planet_selected", json!({ "planet": selected.0.map(|p| p.name()) }));
    }
}

/// Keep the follow target on the selected planet as it orbits.
pub(super) fn refresh_follow_target(
    selected: Res<SelectedPlanet>,
    planets: Query<(Entity, &Planet, &Transform)>,
    mut target: ResMut<FollowTarget>,
) {
    target.0 = selected.0.and_then(|id| planet_position(&planets, id));
}
