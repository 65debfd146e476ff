use bevy::prelude::*;
use constants::render_settings::{BUTTON_HOVERED, BUTTON_IDLE, BUTTON_PRESSED};

use super::state::*;
use crate::engine::assets::gallery_config::GalleryConfig;
use crate::engine::core::navigation::{NavigationEvent, NavigationSource};

// Bars icon opens and closes the sidebar
pub fn sidebar_toggle_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<SidebarToggleButton>),
    >,
    mut state: ResMut<SidebarState>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                state.open = !state.open;
                *bg = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *bg = BackgroundColor(BUTTON_IDLE),
        }
    }
}

pub fn nav_button_interaction(
    q: Query<(&Interaction, &NavButton), (Changed<Interaction>, With<Button>)>,
    mut navigation: EventWriter<NavigationEvent>,
) {
    for (interaction, nav) in &q {
        if *interaction == Interaction::Pressed {
            navigation.write(NavigationEvent {
                page: nav.0,
                source: NavigationSource::Sidebar,
            });
        }
    }
}

/// Adopt the configured open state whenever the configuration changes.
pub fn sync_sidebar_with_config(config: Res<GalleryConfig>, mut state: ResMut<SidebarState>) {
    if state.open != config.sidebar_open {
        state.open = config.sidebar_open;
    }
}
