use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::gallery_config::GalleryConfig;
use crate::engine::camera::orbit_controls::{orbit_controls_input, orbit_controls_update};
use crate::engine::core::app_state::{FpsText, GalleryPage};
use crate::engine::core::browser_events::BrowserQueue;
use crate::engine::core::navigation::{
    HistoryPop, NavigationEvent, follow_browser_history, handle_navigation_events,
    handle_navigation_shortcuts, navigate_from_browser_location,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{ConfigLoader, apply_loaded_config, start_config_loading};
use crate::engine::render::matcap_material::MatcapMaterial;
use crate::engine::scene::alpha_mask::bake_pending_alpha_masks;
use crate::engine::scene::text_sprite::TextSpritePlugin;
use crate::engine::systems::fps_tracking::{
    fps_notification_system, fps_text_update_system, fps_visibility_system,
};
use crate::pages::GalleryPagesPlugin;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::ui::parameter_panel::ParameterPanelPlugin;
use crate::ui::sidebar::SidebarPlugin;

/// Draws the UI panels over whichever page camera is active.
const UI_CAMERA_ORDER: isize = 10;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers GalleryConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<GalleryConfig>::new(&["json"]))
        .add_plugins(MaterialPlugin::<MatcapMaterial>::default())
        .add_plugins(WireframePlugin::default())
        .insert_resource(WireframeConfig {
            global: false,
            default_color: Color::WHITE,
        })
        .add_plugins(TextSpritePlugin)
        .add_plugins(WebRpcPlugin);

    app.init_state::<GalleryPage>()
        .enable_state_scoped_entities::<GalleryPage>();

    // Initialise resources early
    app.init_resource::<GalleryConfig>()
        .init_resource::<ConfigLoader>()
        .init_resource::<BrowserQueue<HistoryPop>>()
        .add_event::<NavigationEvent>();

    app.add_plugins((SidebarPlugin, ParameterPanelPlugin, GalleryPagesPlugin));

    app.add_systems(
        Startup,
        (setup, start_config_loading, navigate_from_browser_location).chain(),
    )
    .add_systems(
        Update,
        (
            apply_loaded_config,
            handle_navigation_shortcuts,
            follow_browser_history,
            handle_navigation_events,
        )
            .chain(),
    )
    .add_systems(
        Update,
        (orbit_controls_input, orbit_controls_update).chain(),
    )
    .add_systems(
        Update,
        (
            bake_pending_alpha_masks,
            fps_notification_system,
            fps_visibility_system.run_if(resource_changed::<GalleryConfig>),
        ),
    );

    #[cfg(target_arch = "wasm32")]
    {
        app.add_systems(
            Startup,
            crate::engine::core::navigation::listen_for_history_changes,
        );
    }

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    println!("=== SCENE GALLERY ===");
    for page in GalleryPage::ALL {
        println!("  {:<16} {}", page.route(), page.title());
    }

    create_ui_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

fn create_ui_camera(commands: &mut Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            order: UI_CAMERA_ORDER,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        IsDefaultUiCamera,
    ));
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
