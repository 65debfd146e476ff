use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};

use crate::constants::path::MATCAP_SHADER;

/// Unlit material that samples a matcap image by view-space normal.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct MatcapMaterial {
    #[texture(0)]
    #[sampler(1)]
    pub matcap: Handle<Image>,

    #[uniform(2)]
    pub tint: LinearRgba,
}

impl MatcapMaterial {
    pub fn new(matcap: Handle<Image>) -> Self {
        Self {
            matcap,
            tint: LinearRgba::WHITE,
        }
    }
}

impl Material for MatcapMaterial {
    fn fragment_shader() -> ShaderRef {
        MATCAP_SHADER.into()
    }
}
