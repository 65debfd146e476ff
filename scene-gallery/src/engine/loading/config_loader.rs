use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::constants::path::GALLERY_CONFIG_PATH;
use crate::engine::assets::gallery_config::GalleryConfig;
use crate::engine::core::app_state::GalleryPage;
use crate::engine::core::navigation::{NavigationEvent, NavigationSource};

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<GalleryConfig>>,
    applied: bool,
}

// Start loading the gallery configuration
pub fn start_config_loading(mut loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(GALLERY_CONFIG_PATH));
}

/// Copy the loaded configuration into the `GalleryConfig` resource once.
/// Defaults stay in place if the file is missing or malformed.
pub fn apply_loaded_config(
    mut loader: ResMut<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<GalleryConfig>>,
    current_page: Res<State<GalleryPage>>,
    mut commands: Commands,
    mut navigation: EventWriter<NavigationEvent>,
) {
    if loader.applied {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(config) = configs.get(&handle) {
        println!("✓ Gallery config loaded from {}", GALLERY_CONFIG_PATH);
        loader.applied = true;
        commands.insert_resource(config.clone());

        // A page chosen by the browser location takes precedence.
        if *current_page.get() != GalleryPage::default() {
            return;
        }
        match GalleryPage::from_route(&config.initial_route) {
            Ok(page) => {
                navigation.write(NavigationEvent {
                    page,
                    source: NavigationSource::Config,
                });
            }
            Err(e) => warn!("Ignoring configured initial route: {e}"),
        }
        return;
    }

    if let LoadState::Failed(err) = asset_server.load_state(&handle) {
        warn!("Failed to load {GALLERY_CONFIG_PATH}, using defaults: {err}");
        loader.applied = true;
    }
}
