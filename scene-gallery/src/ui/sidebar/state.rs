use bevy::prelude::*;
use constants::render_settings::{SIDEBAR_CLOSED_WIDTH, SIDEBAR_OPEN_WIDTH};

use crate::engine::core::app_state::GalleryPage;

#[derive(Resource)]
pub struct SidebarState {
    pub open: bool,
    pub open_width: f32,
    pub closed_width: f32,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            open: true,
            open_width: SIDEBAR_OPEN_WIDTH,
            closed_width: SIDEBAR_CLOSED_WIDTH,
        }
    }
}

impl SidebarState {
    pub fn width(&self) -> f32 {
        if self.open { self.open_width } else { self.closed_width }
    }
}

// Components
#[derive(Component)]
pub struct SidebarRoot;
#[derive(Component)]
pub struct SidebarBody;
#[derive(Component)]
pub struct SidebarHeader;
#[derive(Component)]
pub struct SidebarTitle;
#[derive(Component)]
pub struct SidebarToggleButton;

/// Navigation button for one page.
#[derive(Component, Debug, Clone, Copy)]
pub struct NavButton(pub GalleryPage);
