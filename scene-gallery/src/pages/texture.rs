use bevy::image::{ImageLoaderSettings, ImageSampler};
use bevy::prelude::*;

use super::orbit_page_camera;
use crate::constants::path::DOOR_COLOR_TEXTURE;
use crate::engine::core::app_state::GalleryPage;
use crate::engine::scene::helpers::axes_helper;

const PAGE: GalleryPage = GalleryPage::Texture;

pub struct TexturePagePlugin;

impl Plugin for TexturePagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PAGE), spawn_texture_scene);
    }
}

/// Door texture on a box, sampled with nearest filtering so texels stay crisp.
fn spawn_texture_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    commands.spawn((
        orbit_page_camera(Vec3::new(1.0, 1.0, 4.0), Vec3::ZERO, 100.0, Color::BLACK),
        StateScoped(PAGE),
    ));

    let color: Handle<Image> =
        asset_server.load_with_settings(DOOR_COLOR_TEXTURE, |settings: &mut ImageLoaderSettings| {
            settings.sampler = ImageSampler::nearest();
        });

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(color),
            unlit: true,
            ..default()
        })),
        StateScoped(PAGE),
    ));
    commands.spawn((axes_helper(&mut meshes, &mut materials, 2.0), StateScoped(PAGE)));
}
