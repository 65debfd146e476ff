/// Runtime gallery configuration.
pub const GALLERY_CONFIG_PATH: &str = "config/gallery.json";

pub const DOOR_COLOR_TEXTURE: &str = "textures/door/color.jpg";
pub const DOOR_ALPHA_TEXTURE: &str = "textures/door/alpha.jpg";
pub const DOOR_AO_TEXTURE: &str = "textures/door/ambientOcclusion.jpg";
pub const DOOR_HEIGHT_TEXTURE: &str = "textures/door/height.jpg";

pub const MATCAP_TEXTURE: &str = "textures/matcaps/5.png";
pub const MATCAP_SHADER: &str = "shaders/matcap.wgsl";

pub const HOUSE_BRICKS_COLOR: &str = "textures/house/bricks/color.jpg";
pub const HOUSE_BRICKS_AO: &str = "textures/house/bricks/ambientOcclusion.jpg";
pub const HOUSE_BRICKS_NORMAL: &str = "textures/house/bricks/normal.jpg";
pub const HOUSE_BRICKS_ROUGHNESS: &str = "textures/house/bricks/roughness.jpg";
pub const HOUSE_DOOR_COLOR: &str = "textures/house/door/color.jpg";
pub const HOUSE_DOOR_ALPHA: &str = "textures/house/door/alpha.jpg";
pub const HOUSE_DOOR_AO: &str = "textures/house/door/ambientOcclusion.jpg";
pub const HOUSE_DOOR_NORMAL: &str = "textures/house/door/normal.jpg";
pub const HOUSE_DOOR_HEIGHT: &str = "textures/house/door/height.jpg";
pub const HOUSE_DOOR_ROUGHNESS: &str = "textures/house/door/roughness.jpg";
pub const HOUSE_GRASS_COLOR: &str = "textures/house/grass/color.jpg";
pub const HOUSE_GRASS_AO: &str = "textures/house/grass/ambientOcclusion.jpg";
pub const HOUSE_GRASS_NORMAL: &str = "textures/house/grass/normal.jpg";
pub const HOUSE_GRASS_ROUGHNESS: &str = "textures/house/grass/roughness.jpg";

pub const SUN_TEXTURE: &str = "textures/planets/sun.jpg";
pub const SATURN_RING_TEXTURE: &str = "textures/planets/saturn-ring.png";

/// Surface texture for a planet from the planet table.
pub fn planet_texture(name: &str) -> String {
    format!("textures/planets/{}.jpg", name.to_lowercase())
}
