use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;
use constants::render_settings::{
    BUTTON_ACTIVE, BUTTON_IDLE, COLOUR_SWATCHES, PANEL_BACKGROUND, PANEL_HEADER, SLIDER_FILL,
};

use super::state::*;

const TEXT_COLOUR: Color = Color::srgb(1.0, 1.0, 1.0);
const MUTED_TEXT: Color = Color::srgb(0.70, 0.72, 0.76);

fn toggle_text(label: &str, value: bool) -> String {
    format!("{}: {}", label, if value { "on" } else { "off" })
}

fn slider_text(value: f32, step: f32) -> String {
    let decimals = step
        .to_string()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len());
    format!("{value:.decimals$}")
}

fn button_node(height: f32) -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Px(height),
        display: Display::Flex,
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        border: UiRect::all(Val::Px(1.0)),
        ..default()
    }
}

// Rebuilds the panel whenever a page installs a new ParameterPanel
pub fn spawn_parameter_panel_ui(
    mut commands: Commands,
    panel: Res<ParameterPanel>,
    state: Res<ParameterPanelUiState>,
    existing: Query<Entity, With<ParameterPanelRoot>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let width = if state.collapsed { state.closed_width } else { state.open_width };
    let body_display = if state.collapsed { Display::None } else { Display::Flex };

    commands
        .spawn((
            ParameterPanelRoot,
            Name::new("ParameterPanel"),
            Interaction::default(),
            BackgroundColor(PANEL_BACKGROUND.with_alpha(0.92)),
            Node {
                width: Val::Px(width),
                max_height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|parent| {
            let (pad, btn) = if state.collapsed { (4.0, 24.0) } else { (12.0, 28.0) };

            parent
                .spawn((
                    ParameterHeader,
                    Name::new("Header"),
                    BackgroundColor(PANEL_HEADER),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(pad)),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: if state.collapsed {
                            JustifyContent::FlexEnd
                        } else {
                            JustifyContent::SpaceBetween
                        },
                        ..default()
                    },
                ))
                .with_children(|header| {
                    header.spawn((
                        ParameterTitle,
                        Text::new(panel.title.clone()),
                        TextFont { font_size: 18.0, ..default() },
                        TextColor(TEXT_COLOUR),
                        Node {
                            display: if state.collapsed { Display::None } else { Display::Flex },
                            ..default()
                        },
                    ));

                    header
                        .spawn((
                            ParameterCollapseButton,
                            Button,
                            BackgroundColor(BUTTON_IDLE),
                            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                            Node {
                                width: Val::Px(btn),
                                height: Val::Px(btn),
                                display: Display::Flex,
                                align_items: AlignItems::Center,
                                justify_content: JustifyContent::Center,
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                        ))
                        .with_children(|b| {
                            b.spawn((
                                ParameterCollapseLabel,
                                Text::new(if state.collapsed { "<" } else { ">" }),
                                TextFont { font_size: 18.0, ..default() },
                                TextColor(TEXT_COLOUR),
                            ));
                        });
                });

            parent
                .spawn((
                    ParameterPanelBody,
                    Name::new("Body"),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                        row_gap: Val::Px(8.0),
                        display: body_display,
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::clip_y(),
                        ..default()
                    },
                ))
                .with_children(|body| {
                    for entry in panel.entries() {
                        spawn_entry(body, entry, &panel);
                    }
                });
        });
}

fn spawn_entry(body: &mut ChildSpawnerCommands, entry: &ParameterEntry, panel: &ParameterPanel) {
    let key = ParameterKey(entry.key.clone());

    match &entry.kind {
        ParameterKind::Heading => {
            body.spawn((
                Text::new(entry.label.clone()),
                TextFont { font_size: 15.0, ..default() },
                TextColor(MUTED_TEXT),
                Node { margin: UiRect::top(Val::Px(6.0)), ..default() },
            ));
        }
        ParameterKind::Slider { step, value, .. } => {
            body.spawn(Node {
                width: Val::Percent(100.0),
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            })
            .with_children(|row| {
                row.spawn((
                    Text::new(entry.label.clone()),
                    TextFont { font_size: 14.0, ..default() },
                    TextColor(TEXT_COLOUR),
                ));
                row.spawn((
                    SliderValueText,
                    key.clone(),
                    Text::new(slider_text(*value, *step)),
                    TextFont { font_size: 14.0, ..default() },
                    TextColor(TEXT_COLOUR),
                ));
            });

            body.spawn((
                SliderTrack,
                key.clone(),
                Button,
                RelativeCursorPosition::default(),
                BackgroundColor(BUTTON_IDLE),
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Px(12.0),
                    ..default()
                },
            ))
            .with_children(|track| {
                track.spawn((
                    SliderFill,
                    key,
                    BackgroundColor(SLIDER_FILL),
                    Node {
                        width: Val::Percent(panel.slider_fraction(&entry.key) * 100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                ));
            });
        }
        ParameterKind::Toggle { value } => {
            body.spawn((
                ToggleButton,
                key.clone(),
                Button,
                BackgroundColor(if *value { BUTTON_ACTIVE } else { BUTTON_IDLE }),
                BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                button_node(30.0),
            ))
            .with_children(|btn| {
                btn.spawn((
                    ToggleLabel,
                    key,
                    Text::new(toggle_text(&entry.label, *value)),
                    TextFont { font_size: 14.0, ..default() },
                    TextColor(TEXT_COLOUR),
                ));
            });
        }
        ParameterKind::Colour { value } => {
            body.spawn((
                Text::new(entry.label.clone()),
                TextFont { font_size: 14.0, ..default() },
                TextColor(TEXT_COLOUR),
            ));
            body.spawn(Node {
                width: Val::Percent(100.0),
                column_gap: Val::Px(6.0),
                flex_wrap: FlexWrap::Wrap,
                ..default()
            })
            .with_children(|row| {
                for swatch in COLOUR_SWATCHES {
                    row.spawn((
                        SwatchButton(*swatch),
                        key.clone(),
                        Button,
                        BackgroundColor(*swatch),
                        BorderColor(swatch_border(*swatch == *value)),
                        Node {
                            width: Val::Px(24.0),
                            height: Val::Px(24.0),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                    ));
                }
            });
        }
        ParameterKind::Action => {
            body.spawn((
                ActionButton,
                key,
                Button,
                BackgroundColor(BUTTON_IDLE),
                BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                button_node(32.0),
            ))
            .with_children(|btn| {
                btn.spawn((
                    Text::new(entry.label.clone()),
                    TextFont { font_size: 14.0, ..default() },
                    TextColor(TEXT_COLOUR),
                ));
            });
        }
    }
}

pub fn swatch_border(selected: bool) -> Color {
    if selected {
        Color::WHITE
    } else {
        Color::srgba(0.0, 0.0, 0.0, 0.25)
    }
}

pub fn despawn_parameter_panel_ui(
    mut commands: Commands,
    roots: Query<Entity, With<ParameterPanelRoot>>,
) {
    for entity in &roots {
        commands.entity(entity).despawn();
    }
}

pub fn apply_parameter_collapse_state(
    state: Res<ParameterPanelUiState>,
    mut nodes: ParamSet<(
        Query<&mut Node, With<ParameterPanelRoot>>,
        Query<&mut Node, With<ParameterPanelBody>>,
        Query<&mut Node, With<ParameterHeader>>,
        Query<&mut Node, With<ParameterTitle>>,
    )>,
    mut chevrons: Query<&mut Text, With<ParameterCollapseLabel>>,
) {
    if !state.is_changed() {
        return;
    }

    if let Ok(mut n) = nodes.p0().single_mut() {
        n.width = Val::Px(if state.collapsed { state.closed_width } else { state.open_width });
    }
    if let Ok(mut n) = nodes.p1().single_mut() {
        n.display = if state.collapsed { Display::None } else { Display::Flex };
    }
    if let Ok(mut n) = nodes.p2().single_mut() {
        n.padding = UiRect::all(Val::Px(if state.collapsed { 4.0 } else { 12.0 }));
        n.justify_content = if state.collapsed {
            JustifyContent::FlexEnd
        } else {
            JustifyContent::SpaceBetween
        };
    }
    if let Ok(mut n) = nodes.p3().single_mut() {
        n.display = if state.collapsed { Display::None } else { Display::Flex };
    }
    for mut t in &mut chevrons {
        *t = Text::new(if state.collapsed { "<" } else { ">" });
    }
}

/// Push current parameter values back into the widgets.
pub fn reflect_parameter_values(
    panel: Res<ParameterPanel>,
    mut fills: Query<(&ParameterKey, &mut Node), With<SliderFill>>,
    mut value_texts: Query<(&ParameterKey, &mut Text), (With<SliderValueText>, Without<ToggleLabel>)>,
    mut toggle_labels: Query<(&ParameterKey, &mut Text), (With<ToggleLabel>, Without<SliderValueText>)>,
    mut toggle_buttons: Query<(&ParameterKey, &mut BackgroundColor), With<ToggleButton>>,
    mut swatches: Query<(&ParameterKey, &SwatchButton, &mut BorderColor)>,
) {
    if !panel.is_changed() {
        return;
    }

    for (key, mut node) in &mut fills {
        node.width = Val::Percent(panel.slider_fraction(&key.0) * 100.0);
    }

    for entry in panel.entries() {
        match &entry.kind {
            ParameterKind::Slider { step, value, .. } => {
                for (key, mut text) in &mut value_texts {
                    if key.0 == entry.key {
                        text.0 = slider_text(*value, *step);
                    }
                }
            }
            ParameterKind::Toggle { value } => {
                for (key, mut text) in &mut toggle_labels {
                    if key.0 == entry.key {
                        text.0 = toggle_text(&entry.label, *value);
                    }
                }
                for (key, mut bg) in &mut toggle_buttons {
                    if key.0 == entry.key {
                        *bg = BackgroundColor(if *value { BUTTON_ACTIVE } else { BUTTON_IDLE });
                    }
                }
            }
            _ => {}
        }
    }

    for (key, swatch, mut border) in &mut swatches {
        *border = BorderColor(swatch_border(panel.colour_value(&key.0) == swatch.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_text_uses_step_precision() {
        assert_eq!(slider_text(30.0, 5.0), "30");
        assert_eq!(slider_text(0.25, 0.01), "0.25");
        assert_eq!(slider_text(0.7, 0.001), "0.700");
    }

    #[test]
    fn panel_ui_spawns_one_widget_per_control() {
        let mut app = App::new();
        app.insert_resource(
            ParameterPanel::new("Debug")
                .slider("x", "X", -3.0, 3.0, 0.01, 0.0)
                .toggle("visible", "Visible", true)
                .action("spin", "Spin"),
        )
        .init_resource::<ParameterPanelUiState>()
        .add_systems(Update, spawn_parameter_panel_ui);

        app.update();

        let world = app.world_mut();
        assert_eq!(world.query::<&ParameterPanelRoot>().iter(world).count(), 1);
        assert_eq!(world.query::<&SliderTrack>().iter(world).count(), 1);
        assert_eq!(world.query::<&ToggleButton>().iter(world).count(), 1);
        assert_eq!(world.query::<&ActionButton>().iter(world).count(), 1);
    }
}
