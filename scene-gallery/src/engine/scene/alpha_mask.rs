use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;

/// Material whose colour texture should gain its alpha from a greyscale mask.
/// Removed once the mask has loaded and the baked texture is in place.
#[derive(Component, Debug, Clone)]
pub struct PendingAlphaMask {
    pub colour: Handle<Image>,
    pub mask: Handle<Image>,
    pub material: Handle<StandardMaterial>,
}

/// Copy of `colour` whose alpha is taken from the red channel of `mask`.
/// Both images must be RGBA8 and the same size.
pub fn combine_alpha_mask(colour: &Image, mask: &Image) -> Option<Image> {
    let rgba8 = |image: &Image| {
        matches!(
            image.texture_descriptor.format,
            TextureFormat::Rgba8Unorm | TextureFormat::Rgba8UnormSrgb
        )
    };
    if !rgba8(colour) || !rgba8(mask) || colour.size() != mask.size() {
        return None;
    }

    let mut baked = colour.clone();
    let mask_data = mask.data.as_ref()?;
    let data = baked.data.as_mut()?;
    for (pixel, mask_pixel) in data.chunks_exact_mut(4).zip(mask_data.chunks_exact(4)) {
        pixel[3] = mask_pixel[0];
    }
    Some(baked)
}

pub fn bake_pending_alpha_masks(
    mut commands: Commands,
    pending: Query<(Entity, &PendingAlphaMask)>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, request) in &pending {
        let (Some(colour), Some(mask)) = (images.get(&request.colour), images.get(&request.mask))
        else {
            continue;
        };
        commands.entity(entity).remove::<PendingAlphaMask>();

        let Some(baked) = combine_alpha_mask(colour, mask) else {
            warn!("Alpha mask does not match its colour texture, leaving the surface opaque");
            continue;
        };
        let baked = images.add(baked);
        if let Some(material) = materials.get_mut(&request.material) {
            material.base_color_texture = Some(baked);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::RenderAssetUsages;
    use bevy::render::render_resource::{Extent3d, TextureDimension};

    fn image(width: u32, data: Vec<u8>, format: TextureFormat) -> Image {
        Image::new(
            Extent3d {
                width,
                height: 1,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            data,
            format,
            RenderAssetUsages::default(),
        )
    }

    #[test]
    fn mask_brightness_becomes_alpha() {
        let colour = image(2, vec![200, 10, 10, 255, 10, 200, 10, 255], TextureFormat::Rgba8UnormSrgb);
        let mask = image(2, vec![255, 255, 255, 255, 20, 20, 20, 255], TextureFormat::Rgba8UnormSrgb);

        let baked = combine_alpha_mask(&colour, &mask).unwrap();
        let data = baked.data.unwrap();
        assert_eq!(&data[0..4], &[200, 10, 10, 255]);
        assert_eq!(&data[4..8], &[10, 200, 10, 20]);
    }

    #[test]
    fn mismatched_images_are_rejected() {
        let colour = image(2, vec![0; 8], TextureFormat::Rgba8UnormSrgb);
        let small_mask = image(1, vec![0; 4], TextureFormat::Rgba8UnormSrgb);
        let float_mask = image(2, vec![0; 32], TextureFormat::Rgba32Float);

        assert!(combine_alpha_mask(&colour, &small_mask).is_none());
        assert!(combine_alpha_mask(&colour, &float_mask).is_none());
    }

    #[test]
    fn material_gets_baked_texture_once_both_images_load() {
        let mut app = App::new();
        app.init_resource::<Assets<Image>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(Update, bake_pending_alpha_masks);

        let (colour, mask) = {
            let mut images = app.world_mut().resource_mut::<Assets<Image>>();
            (
                images.add(image(1, vec![9, 9, 9, 255], TextureFormat::Rgba8UnormSrgb)),
                images.add(image(1, vec![0, 0, 0, 255], TextureFormat::Rgba8UnormSrgb)),
            )
        };
        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                base_color_texture: Some(colour.clone()),
                ..default()
            });
        let request = app
            .world_mut()
            .spawn(PendingAlphaMask {
                colour: colour.clone(),
                mask,
                material: material.clone(),
            })
            .id();

        app.update();

        assert!(app.world().get::<PendingAlphaMask>(request).is_none());
        let world = app.world();
        let texture = world
            .resource::<Assets<StandardMaterial>>()
            .get(&material)
            .and_then(|m| m.base_color_texture.clone())
            .unwrap();
        assert_ne!(texture, colour);
        let baked = world.resource::<Assets<Image>>().get(&texture).unwrap();
        assert_eq!(baked.data.as_ref().unwrap()[3], 0);
    }
}
