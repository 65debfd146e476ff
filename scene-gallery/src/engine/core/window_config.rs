use bevy::prelude::*;
use bevy::window::PresentMode;

/// Title shown in the native window.
const WINDOW_TITLE: &str = "Scene Gallery";

/// Primary window settings. On the web the gallery renders into the
/// `#bevy` canvas and leaves browser event handling alone.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: WINDOW_TITLE.into(),
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: WINDOW_TITLE.into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
