//! Right-hand parameter panel that pages populate with tweakable values.
//!
//! A page inserts a `ParameterPanel` resource describing its controls; the
//! panel UI is rebuilt from it and torn down when the resource goes away.
//! Widgets write straight into the resource, pages read it every frame.

/// Collapse toggle, slider drag, toggle, swatch and action buttons.
pub mod interactions;

/// Parameter values, builder, widget components and UI state.
pub mod state;

/// Panel spawning and value reflection systems.
pub mod ui;

use bevy::prelude::*;

pub use state::{ParameterPanel, ParameterPanelUiState};

use interactions::{
    action_button_interaction, parameter_collapse_interaction, slider_drag_interaction,
    swatch_button_interaction, toggle_button_interaction,
};
use ui::{
    apply_parameter_collapse_state, despawn_parameter_panel_ui, reflect_parameter_values,
    spawn_parameter_panel_ui,
};

// Registers the parameter panel UI state and systems.
pub struct ParameterPanelPlugin;

impl Plugin for ParameterPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParameterPanelUiState>()
            .add_systems(
                Update,
                (
                    spawn_parameter_panel_ui.run_if(resource_added::<ParameterPanel>),
                    despawn_parameter_panel_ui.run_if(not(resource_exists::<ParameterPanel>)),
                    apply_parameter_collapse_state,
                    parameter_collapse_interaction,
                ),
            )
            .add_systems(
                Update,
                (
                    slider_drag_interaction,
                    toggle_button_interaction,
                    swatch_button_interaction,
                    action_button_interaction,
                    reflect_parameter_values,
                )
                    .chain()
                    .run_if(resource_exists::<ParameterPanel>),
            );
    }
}
