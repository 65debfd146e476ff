//! Collapsible navigation sidebar.
//!
//! Lists every gallery page in route order, highlights the active one and
//! turns clicks into `NavigationEvent`s.

/// Toggle and navigation button handling.
pub mod interactions;

/// Sidebar resource and marker components.
pub mod state;

/// Sidebar spawning and layout updates.
pub mod ui;

use bevy::prelude::*;

pub use state::SidebarState;

use crate::engine::assets::gallery_config::GalleryConfig;
use crate::engine::core::app_state::GalleryPage;
use interactions::{nav_button_interaction, sidebar_toggle_interaction, sync_sidebar_with_config};
use ui::{apply_sidebar_state, reflect_active_page, spawn_sidebar_ui};

pub struct SidebarPlugin;

impl Plugin for SidebarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SidebarState>()
            .add_systems(Startup, spawn_sidebar_ui)
            .add_systems(
                Update,
                (
                    sync_sidebar_with_config.run_if(resource_changed::<GalleryConfig>),
                    sidebar_toggle_interaction,
                    nav_button_interaction,
                    apply_sidebar_state,
                    reflect_active_page.run_if(state_changed::<GalleryPage>),
                )
                    .chain(),
            );
    }
}
