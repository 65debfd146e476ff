//! Camera-facing text labels anchored to world positions.
//!
//! A `TextSprite` on a world entity gets a UI text node that is re-projected
//! every frame, so it always faces the camera and shrinks with distance.

use bevy::prelude::*;
use bevy::transform::TransformSystem;

use crate::engine::scene::geometry::ray_sphere_distance;

/// Appearance of a text sprite, in canvas pixels before scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSpriteStyle {
    pub font_size: f32,
    pub border_thickness: f32,
    pub border_color: Color,
    pub background_color: Color,
    pub color: Color,
    pub scale_factor: f32,
}

impl Default for TextSpriteStyle {
    fn default() -> Self {
        Self {
            font_size: 32.0,
            border_thickness: 4.0,
            border_color: Color::NONE,
            background_color: Color::NONE,
            color: Color::WHITE,
            scale_factor: 0.5,
        }
    }
}

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.6;
/// Canvas pixels per world unit at a scale factor of one.
const PIXELS_PER_UNIT: f32 = 10.0;
const MIN_SCREEN_FONT: f32 = 6.0;
const MAX_SCREEN_FONT: f32 = 96.0;

impl TextSpriteStyle {
    pub fn estimated_text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.font_size * GLYPH_ADVANCE
    }

    /// Canvas holding the text plus a border on every side.
    pub fn canvas_size(&self, text_width: f32) -> Vec2 {
        Vec2::new(
            text_width + self.border_thickness * 2.0,
            self.font_size + self.border_thickness * 2.0,
        )
    }

    /// Where the text baseline starts inside the canvas.
    pub fn text_origin(&self) -> Vec2 {
        Vec2::new(
            self.border_thickness,
            self.font_size + self.border_thickness / 2.0,
        )
    }

    /// Box size and text inset of a label whose text is drawn `font_size`
    /// pixels tall: the canvas scaled from the style's font size.
    pub fn label_box(&self, text: &str, font_size: f32) -> (Vec2, Vec2) {
        let ratio = font_size / self.font_size;
        let canvas = self.canvas_size(self.estimated_text_width(text)) * ratio;
        let origin = self.text_origin() * ratio;
        (canvas, Vec2::new(origin.x, origin.y - font_size))
    }

    /// World-space size of the sprite quad.
    pub fn sprite_scale(&self, text_width: f32) -> Vec3 {
        Vec3::new(
            text_width / PIXELS_PER_UNIT * self.scale_factor,
            self.font_size / PIXELS_PER_UNIT * self.scale_factor,
            1.0,
        )
    }
}

/// World anchor of a text label.
#[derive(Component, Debug, Clone)]
pub struct TextSprite {
    pub text: String,
    pub style: TextSpriteStyle,
    /// Offset from the anchor's global translation.
    pub offset: Vec3,
}

impl TextSprite {
    pub fn new(text: impl Into<String>, style: TextSpriteStyle) -> Self {
        Self {
            text: text.into(),
            style,
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn world_height(&self) -> f32 {
        self.style
            .sprite_scale(self.style.estimated_text_width(&self.text))
            .y
    }
}

/// UI node drawing the label of the anchor entity it points at.
#[derive(Component)]
pub struct TextSpriteLabel(pub Entity);

/// Sphere that hides labels behind it.
#[derive(Component, Debug, Clone, Copy)]
pub struct LabelOccluder {
    pub radius: f32,
}

/// True when a sphere sits on the segment from `eye` to `point`.
pub fn is_occluded(eye: Vec3, point: Vec3, spheres: impl IntoIterator<Item = (Vec3, f32)>) -> bool {
    let to_point = point - eye;
    let distance = to_point.length();
    let Some(direction) = to_point.try_normalize() else {
        return false;
    };
    spheres.into_iter().any(|(center, radius)| {
        ray_sphere_distance(eye, direction, center, radius).is_some_and(|t| t < distance)
    })
}

fn place_label(node: &mut Node, style: &TextSpriteStyle, text: &str, font_size: f32) {
    let (size, inset) = style.label_box(text, font_size);
    let border = style.border_thickness * font_size / style.font_size;
    node.width = Val::Px(size.x);
    node.height = Val::Px(size.y);
    node.border = UiRect::all(Val::Px(border));
    node.padding = UiRect::new(
        Val::Px((inset.x - border).max(0.0)),
        Val::ZERO,
        Val::Px((inset.y - border).max(0.0)),
        Val::ZERO,
    );
}

/// Height in pixels of a world-space span seen at `distance` through a
/// perspective camera with vertical `fov` over a viewport `viewport_height` tall.
pub fn projected_height(world_height: f32, distance: f32, fov: f32, viewport_height: f32) -> f32 {
    if distance <= f32::EPSILON {
        return 0.0;
    }
    let visible_height = 2.0 * distance * (fov / 2.0).tan();
    world_height / visible_height * viewport_height
}

pub struct TextSpritePlugin;

impl Plugin for TextSpritePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (spawn_text_sprite_labels, track_text_sprite_labels)
                .chain()
                .after(TransformSystem::TransformPropagate),
        );
    }
}

fn spawn_text_sprite_labels(mut commands: Commands, sprites: Query<(Entity, &TextSprite), Added<TextSprite>>) {
    for (entity, sprite) in &sprites {
        let style = sprite.style;
        let font_size = style.font_size * style.scale_factor;
        let mut node = Node {
            position_type: PositionType::Absolute,
            overflow: Overflow::visible(),
            ..default()
        };
        place_label(&mut node, &style, &sprite.text, font_size);

        commands
            .spawn((
                node,
                BackgroundColor(style.background_color),
                BorderColor(style.border_color),
                Visibility::Hidden,
                Pickable::IGNORE,
                TextSpriteLabel(entity),
            ))
            .with_child((
                Text::new(sprite.text.clone()),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(style.color),
                Pickable::IGNORE,
            ));
    }
}

/// Move each label over its projected anchor, size it by distance and hide
/// it while an occluder stands between it and the camera.
fn track_text_sprite_labels(
    mut commands: Commands,
    cameras: Query<(&Camera, &GlobalTransform, &Projection), With<Camera3d>>,
    anchors: Query<(&GlobalTransform, &TextSprite)>,
    occluders: Query<(Entity, &GlobalTransform, &LabelOccluder)>,
    mut labels: Query<(Entity, &TextSpriteLabel, &mut Node, &mut Visibility, &Children)>,
    mut fonts: Query<&mut TextFont>,
) {
    let camera = cameras
        .iter()
        .filter(|(camera, ..)| camera.is_active)
        .min_by_key(|(camera, ..)| camera.order);

    for (label, anchor, mut node, mut visibility, children) in &mut labels {
        let Ok((anchor_transform, sprite)) = anchors.get(anchor.0) else {
            commands.entity(label).despawn();
            continue;
        };
        let Some((camera, camera_transform, projection)) = camera else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };

        let world = anchor_transform.translation() + sprite.offset;
        let eye = camera_transform.translation();
        let blockers = occluders
            .iter()
            .filter(|(entity, ..)| *entity != anchor.0)
            .map(|(_, transform, occluder)| (transform.translation(), occluder.radius));
        if is_occluded(eye, world, blockers) {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        }
        let Ok(screen) = camera.world_to_viewport(camera_transform, world) else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };
        visibility.set_if_neq(Visibility::Inherited);

        let style = &sprite.style;
        let font_size = match (projection, camera.logical_viewport_size()) {
            (Projection::Perspective(perspective), Some(viewport)) => {
                projected_height(sprite.world_height(), eye.distance(world), perspective.fov, viewport.y)
                    .clamp(MIN_SCREEN_FONT, MAX_SCREEN_FONT)
            }
            _ => style.font_size * style.scale_factor,
        };
        place_label(&mut node, style, &sprite.text, font_size);
        let (size, _) = style.label_box(&sprite.text, font_size);
        node.left = Val::Px(screen.x - size.x / 2.0);
        node.top = Val::Px(screen.y - size.y);

        if let Some(mut font) = children.first().and_then(|&text| fonts.get_mut(text).ok()) {
            if (font.font_size - font_size).abs() > 0.5 {
                font.font_size = font_size;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_matches_label_defaults() {
        let style = TextSpriteStyle::default();
        assert_eq!(style.font_size, 32.0);
        assert_eq!(style.border_thickness, 4.0);
        assert_eq!(style.scale_factor, 0.5);
        assert_eq!(style.color, Color::WHITE);
    }

    #[test]
    fn canvas_wraps_text_in_border() {
        let style = TextSpriteStyle::default();
        assert_eq!(style.canvas_size(100.0), Vec2::new(108.0, 40.0));
        assert_eq!(style.text_origin(), Vec2::new(4.0, 34.0));
    }

    #[test]
    fn label_box_scales_canvas_to_screen_font() {
        let style = TextSpriteStyle::default();
        // Four glyphs at 32px make a 76.8px wide canvas before the border.
        let (size, inset) = style.label_box("MARS", 16.0);
        assert!(size.distance(Vec2::new(42.4, 20.0)) < 1e-4);
        assert!(inset.distance(Vec2::new(2.0, 1.0)) < 1e-5);
    }

    #[test]
    fn labels_behind_a_sphere_are_occluded() {
        let eye = Vec3::new(0.0, 0.0, 20.0);
        let sun = [(Vec3::ZERO, 3.0)];

        assert!(is_occluded(eye, Vec3::new(0.0, 0.0, -10.0), sun));
        assert!(!is_occluded(eye, Vec3::new(0.0, 0.0, 10.0), sun));
        assert!(!is_occluded(eye, Vec3::new(0.0, 5.0, -10.0), sun));
        assert!(!is_occluded(eye, eye, sun));
    }

    #[test]
    fn sprite_scale_follows_text_size() {
        let style = TextSpriteStyle {
            font_size: 40.0,
            scale_factor: 0.4,
            ..default()
        };
        let scale = style.sprite_scale(200.0);
        assert!((scale.x - 8.0).abs() < 1e-5);
        assert!((scale.y - 1.6).abs() < 1e-5);
        assert_eq!(scale.z, 1.0);
    }

    #[test]
    fn projection_shrinks_with_distance() {
        let fov = 75f32.to_radians();
        let near = projected_height(1.0, 5.0, fov, 720.0);
        let far = projected_height(1.0, 10.0, fov, 720.0);
        assert!((near - 2.0 * far).abs() < 1e-3);
        assert_eq!(projected_height(1.0, 0.0, fov, 720.0), 0.0);
    }

    #[test]
    fn orphaned_labels_are_removed() {
        let mut app = App::new();
        app.add_systems(Update, (spawn_text_sprite_labels, track_text_sprite_labels).chain());
        let anchor = app
            .world_mut()
            .spawn((
                GlobalTransform::default(),
                TextSprite::new("EARTH", TextSpriteStyle::default()),
            ))
            .id();
        app.update();

        let mut labels = app.world_mut().query::<&TextSpriteLabel>();
        assert_eq!(labels.iter(app.world()).count(), 1);

        app.world_mut().despawn(anchor);
        app.update();
        app.update();

        let mut labels = app.world_mut().query::<&TextSpriteLabel>();
        assert_eq!(labels.iter(app.world()).count(), 0);
    }
}
