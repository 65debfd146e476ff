use bevy::prelude::*;
use constants::render_settings::{PARAMETER_PANEL_CLOSED_WIDTH, PARAMETER_PANEL_OPEN_WIDTH};

/// One control in the parameter panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    Heading,
    Slider {
        min: f32,
        max: f32,
        step: f32,
        value: f32,
    },
    Toggle {
        value: bool,
    },
    Colour {
        value: Color,
    },
    Action,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEntry {
    pub key: String,
    pub label: String,
    pub kind: ParameterKind,
}

/// Page-owned set of tweakable values, shown in the right-hand panel.
///
/// A page inserts one on enter and removes it on exit. Systems read the
/// current values every frame; unknown keys read as zero, false or white.
#[derive(Resource, Debug, Clone, Default)]
pub struct ParameterPanel {
    pub title: String,
    entries: Vec<ParameterEntry>,
    pending_actions: Vec<String>,
}

impl ParameterPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..default()
        }
    }

    fn push(mut self, key: &str, label: &str, kind: ParameterKind) -> Self {
        self.entries.push(ParameterEntry {
            key: key.to_string(),
            label: label.to_string(),
            kind,
        });
        self
    }

    pub fn heading(self, label: &str) -> Self {
        self.push("", label, ParameterKind::Heading)
    }

    pub fn slider(self, key: &str, label: &str, min: f32, max: f32, step: f32, value: f32) -> Self {
        let value = snap(value, min, max, step);
        self.push(
            key,
            label,
            ParameterKind::Slider {
                min,
                max,
                step,
                value,
            },
        )
    }

    pub fn toggle(self, key: &str, label: &str, value: bool) -> Self {
        self.push(key, label, ParameterKind::Toggle { value })
    }

    pub fn colour(self, key: &str, label: &str, value: Color) -> Self {
        self.push(key, label, ParameterKind::Colour { value })
    }

    pub fn action(self, key: &str, label: &str) -> Self {
        self.push(key, label, ParameterKind::Action)
    }

    pub fn entries(&self) -> &[ParameterEntry] {
        &self.entries
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut ParameterKind> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.kind)
    }

    fn entry(&self, key: &str) -> Option<&ParameterKind> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.kind)
    }

    pub fn float(&self, key: &str) -> f32 {
        match self.entry(key) {
            Some(ParameterKind::Slider { value, .. }) => *value,
            _ => 0.0,
        }
    }

    pub fn toggle_value(&self, key: &str) -> bool {
        matches!(self.entry(key), Some(ParameterKind::Toggle { value: true }))
    }

    pub fn colour_value(&self, key: &str) -> Color {
        match self.entry(key) {
            Some(ParameterKind::Colour { value }) => *value,
            _ => Color::WHITE,
        }
    }

    /// Fraction of the slider range covered by the current value.
    pub fn slider_fraction(&self, key: &str) -> f32 {
        match self.entry(key) {
            Some(ParameterKind::Slider { min, max, value, .. }) if max > min => {
                (value - min) / (max - min)
            }
            _ => 0.0,
        }
    }

    /// Set a slider, snapping to its step and clamping to its range.
    /// Returns whether the stored value changed.
    pub fn set_float(&mut self, key: &str, new_value: f32) -> bool {
        let Some(ParameterKind::Slider {
            min,
            max,
            step,
            value,
        }) = self.entry_mut(key)
        else {
            return false;
        };
        let snapped = snap(new_value, *min, *max, *step);
        if snapped == *value {
            return false;
        }
        *value = snapped;
        true
    }

    /// Set a slider from a 0..1 position along its track.
    pub fn set_fraction(&mut self, key: &str, fraction: f32) -> bool {
        let Some(ParameterKind::Slider { min, max, .. }) = self.entry(key) else {
            return false;
        };
        let target = min + fraction.clamp(0.0, 1.0) * (max - min);
        self.set_float(key, target)
    }

    pub fn set_toggle(&mut self, key: &str, new_value: bool) {
        if let Some(ParameterKind::Toggle { value }) = self.entry_mut(key) {
            *value = new_value;
        }
    }

    pub fn flip_toggle(&mut self, key: &str) {
        let current = self.toggle_value(key);
        self.set_toggle(key, !current);
    }

    pub fn set_colour(&mut self, key: &str, new_value: Color) {
        if let Some(ParameterKind::Colour { value }) = self.entry_mut(key) {
            *value = new_value;
        }
    }

    pub fn trigger_action(&mut self, key: &str) {
        if matches!(self.entry(key), Some(ParameterKind::Action)) {
            self.pending_actions.push(key.to_string());
        }
    }

    /// Consume one pending trigger of `key`.
    pub fn take_action(&mut self, key: &str) -> bool {
        match self.pending_actions.iter().position(|a| a == key) {
            Some(index) => {
                self.pending_actions.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Snap `value` to the nearest multiple of `step` above `min`, then clamp.
pub fn snap(value: f32, min: f32, max: f32, step: f32) -> f32 {
    let snapped = if step > 0.0 {
        min + ((value - min) / step).round() * step
    } else {
        value
    };
    snapped.clamp(min, max)
}

#[derive(Resource)]
pub struct ParameterPanelUiState {
    pub collapsed: bool,
    pub open_width: f32,
    pub closed_width: f32,
}

impl Default for ParameterPanelUiState {
    fn default() -> Self {
        Self {
            collapsed: false,
            open_width: PARAMETER_PANEL_OPEN_WIDTH,
            closed_width: PARAMETER_PANEL_CLOSED_WIDTH,
        }
    }
}

// Components
#[derive(Component)]
pub struct ParameterPanelRoot;
#[derive(Component)]
pub struct ParameterPanelBody;
#[derive(Component)]
pub struct ParameterHeader;
#[derive(Component)]
pub struct ParameterTitle;
#[derive(Component)]
pub struct ParameterCollapseButton;
#[derive(Component)]
pub struct ParameterCollapseLabel;

/// Links a widget entity to the parameter it edits.
#[derive(Component, Debug, Clone)]
pub struct ParameterKey(pub String);

#[derive(Component)]
pub struct SliderTrack;
#[derive(Component)]
pub struct SliderFill;
#[derive(Component)]
pub struct SliderValueText;
#[derive(Component)]
pub struct ToggleButton;
#[derive(Component)]
pub struct ToggleLabel;
#[derive(Component)]
pub struct SwatchButton(pub Color);
#[derive(Component)]
pub struct ActionButton;
