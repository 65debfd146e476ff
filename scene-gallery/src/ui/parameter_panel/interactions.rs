use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;
use constants::render_settings::{BUTTON_HOVERED, BUTTON_IDLE, BUTTON_PRESSED};

use super::state::*;

// Chevron icon toggles collapse state
pub fn parameter_collapse_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<ParameterCollapseButton>),
    >,
    mut state: ResMut<ParameterPanelUiState>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                state.collapsed = !state.collapsed;
                *bg = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *bg = BackgroundColor(BUTTON_IDLE),
        }
    }
}

/// Convert a centre-origin cursor position into a 0..1 track fraction.
pub fn track_fraction(normalized: Vec2) -> f32 {
    (normalized.x + 0.5).clamp(0.0, 1.0)
}

// Sliders follow the cursor for as long as the track is held
pub fn slider_drag_interaction(
    tracks: Query<(&Interaction, &RelativeCursorPosition, &ParameterKey), With<SliderTrack>>,
    mut panel: ResMut<ParameterPanel>,
) {
    for (interaction, cursor, key) in &tracks {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(normalized) = cursor.normalized else {
            continue;
        };
        // Avoid marking the panel changed when the value did not move.
        let fraction = track_fraction(normalized);
        if panel.bypass_change_detection().set_fraction(&key.0, fraction) {
            panel.set_changed();
        }
    }
}

pub fn toggle_button_interaction(
    q: Query<(&Interaction, &ParameterKey), (Changed<Interaction>, With<ToggleButton>)>,
    mut panel: ResMut<ParameterPanel>,
) {
    for (interaction, key) in &q {
        if *interaction == Interaction::Pressed {
            panel.flip_toggle(&key.0);
        }
    }
}

pub fn swatch_button_interaction(
    q: Query<(&Interaction, &ParameterKey, &SwatchButton), Changed<Interaction>>,
    mut panel: ResMut<ParameterPanel>,
) {
    for (interaction, key, swatch) in &q {
        if *interaction == Interaction::Pressed {
            panel.set_colour(&key.0, swatch.0);
        }
    }
}

pub fn action_button_interaction(
    mut q: Query<
        (&Interaction, &ParameterKey, &mut BackgroundColor),
        (Changed<Interaction>, With<ActionButton>),
    >,
    mut panel: ResMut<ParameterPanel>,
) {
    for (interaction, key, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                panel.trigger_action(&key.0);
                *bg = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *bg = BackgroundColor(BUTTON_IDLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_fraction_is_clamped() {
        assert_eq!(track_fraction(Vec2::new(-0.5, 0.0)), 0.0);
        assert_eq!(track_fraction(Vec2::new(0.0, 0.1)), 0.5);
        assert_eq!(track_fraction(Vec2::new(0.9, 0.0)), 1.0);
    }

    #[test]
    fn pressed_action_button_queues_action() {
        let mut app = App::new();
        app.insert_resource(ParameterPanel::new("Test").action("spin", "Spin"))
            .add_systems(Update, action_button_interaction);
        app.world_mut().spawn((
            ActionButton,
            ParameterKey("spin".to_string()),
            Interaction::Pressed,
            BackgroundColor(BUTTON_IDLE),
        ));

        app.update();

        let mut panel = app.world_mut().resource_mut::<ParameterPanel>();
        assert!(panel.take_action("spin"));
    }

    #[test]
    fn pressed_toggle_flips_value() {
        let mut app = App::new();
        app.insert_resource(ParameterPanel::new("Test").toggle("wire", "Wireframe", false))
            .add_systems(Update, toggle_button_interaction);
        app.world_mut().spawn((
            ToggleButton,
            ParameterKey("wire".to_string()),
            Interaction::Pressed,
        ));

        app.update();

        assert!(app.world().resource::<ParameterPanel>().toggle_value("wire"));
    }
}
