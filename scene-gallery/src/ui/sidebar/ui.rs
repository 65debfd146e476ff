use bevy::prelude::*;
use constants::render_settings::{BUTTON_ACTIVE, BUTTON_IDLE, PANEL_BACKGROUND, PANEL_HEADER};

use super::state::*;
use crate::engine::core::app_state::GalleryPage;

// Spawns the sidebar with its toggle button and one entry per page
pub fn spawn_sidebar_ui(mut commands: Commands, state: Res<SidebarState>) {
    let body_display = if state.open { Display::Flex } else { Display::None };

    commands
        .spawn((
            SidebarRoot,
            Name::new("Sidebar"),
            Interaction::default(),
            BackgroundColor(PANEL_BACKGROUND),
            Node {
                width: Val::Px(state.width()),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    SidebarHeader,
                    Name::new("Header"),
                    BackgroundColor(PANEL_HEADER),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(6.0)),
                        display: Display::Flex,
                        justify_content: JustifyContent::FlexEnd,
                        ..default()
                    },
                ))
                .with_children(|header| {
                    header
                        .spawn((
                            SidebarToggleButton,
                            Button,
                            BackgroundColor(BUTTON_IDLE),
                            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                            BorderRadius::MAX,
                            Node {
                                width: Val::Px(28.0),
                                height: Val::Px(28.0),
                                display: Display::Flex,
                                align_items: AlignItems::Center,
                                justify_content: JustifyContent::Center,
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                        ))
                        .with_children(|b| {
                            b.spawn((
                                Text::new("="),
                                TextFont { font_size: 18.0, ..default() },
                                TextColor(Color::WHITE),
                            ));
                        });
                });

            parent
                .spawn((
                    SidebarBody,
                    Name::new("Body"),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::axes(Val::Px(10.0), Val::Px(8.0)),
                        row_gap: Val::Px(4.0),
                        display: body_display,
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::scroll_y(),
                        ..default()
                    },
                ))
                .with_children(|body| {
                    body.spawn((
                        SidebarTitle,
                        Text::new("Scene Gallery"),
                        TextFont { font_size: 20.0, ..default() },
                        TextColor(Color::WHITE),
                        Node { margin: UiRect::bottom(Val::Px(10.0)), ..default() },
                    ));

                    for page in GalleryPage::ALL {
                        body.spawn((
                            NavButton(page),
                            Name::new(page.title()),
                            Button,
                            BackgroundColor(BUTTON_IDLE),
                            Node {
                                width: Val::Percent(100.0),
                                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                                ..default()
                            },
                        ))
                        .with_children(|btn| {
                            btn.spawn((
                                Text::new(page.title()),
                                TextFont { font_size: 15.0, ..default() },
                                TextColor(Color::WHITE),
                            ));
                        });
                    }
                });
        });
}

pub fn apply_sidebar_state(
    state: Res<SidebarState>,
    mut nodes: ParamSet<(
        Query<&mut Node, With<SidebarRoot>>,
        Query<&mut Node, With<SidebarBody>>,
    )>,
) {
    if !state.is_changed() {
        return;
    }

    if let Ok(mut n) = nodes.p0().single_mut() {
        n.width = Val::Px(state.width());
    }
    if let Ok(mut n) = nodes.p1().single_mut() {
        n.display = if state.open { Display::Flex } else { Display::None };
    }
}

/// Highlight the entry of the page being shown.
pub fn reflect_active_page(
    page: Res<State<GalleryPage>>,
    mut buttons: Query<(&NavButton, &mut BackgroundColor)>,
) {
    for (nav, mut bg) in &mut buttons {
        *bg = BackgroundColor(if nav.0 == *page.get() { BUTTON_ACTIVE } else { BUTTON_IDLE });
    }
}
