use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use super::geometry::{axes_mesh, wireframe_mesh};

#[derive(Component)]
pub struct AxesHelper;

/// Line-drawn outline attached to a light so its placement is visible.
#[derive(Component)]
pub struct LightHelper;

/// Which outline a light helper draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightHelperShape {
    /// Wire sphere of the given radius.
    Point { size: f32 },
    /// Square facing the light direction with a line along it.
    Directional { size: f32 },
    /// Cone opening along the light direction.
    Spot { range: f32, angle: f32 },
}

pub fn unlit_line_material(materials: &mut Assets<StandardMaterial>, color: Color) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    })
}

/// Red, green and blue lines along +X, +Y and +Z.
pub fn axes_helper(
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    size: f32,
) -> impl Bundle {
    (
        Mesh3d(meshes.add(axes_mesh(size))),
        MeshMaterial3d(unlit_line_material(materials, Color::WHITE)),
        Transform::default(),
        AxesHelper,
    )
}

fn outline_or_empty(mesh: Mesh) -> Mesh {
    wireframe_mesh(&mesh).unwrap_or(mesh)
}

/// Mesh and local transform of a helper, relative to its light.
pub fn light_helper_geometry(shape: LightHelperShape) -> (Mesh, Transform) {
    match shape {
        LightHelperShape::Point { size } => (
            outline_or_empty(Sphere::new(size).mesh().uv(8, 6)),
            Transform::IDENTITY,
        ),
        LightHelperShape::Directional { size } => (
            outline_or_empty(Rectangle::new(size * 2.0, size * 2.0).into()),
            Transform::IDENTITY,
        ),
        LightHelperShape::Spot { range, angle } => {
            let radius = range * angle.tan();
            // Cone apex sits at the light, base lies `range` along local -Z.
            (
                outline_or_empty(Cone::new(radius, range).mesh().resolution(16).into()),
                Transform::from_xyz(0.0, 0.0, -range / 2.0)
                    .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            )
        }
    }
}

/// Bundle for a helper entity, spawned as a child of the light it outlines.
pub fn light_helper(
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    shape: LightHelperShape,
    color: Color,
) -> impl Bundle {
    let (mesh, transform) = light_helper_geometry(shape);
    (
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(unlit_line_material(materials, color)),
        transform,
        LightHelper,
    )
}

pub fn set_light_helpers_visible(
    visible: bool,
    helpers: &mut Query<&mut Visibility, With<LightHelper>>,
) {
    let target = if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in helpers.iter_mut() {
        visibility.set_if_neq(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};

    fn max_distance_from_origin(mesh: &Mesh, transform: Transform) -> f32 {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(positions)) => positions
                .iter()
                .map(|p| transform.transform_point(Vec3::from(*p)).length())
                .fold(0.0, f32::max),
            _ => 0.0,
        }
    }

    #[test]
    fn helpers_are_line_lists() {
        for shape in [
            LightHelperShape::Point { size: 0.2 },
            LightHelperShape::Directional { size: 0.2 },
            LightHelperShape::Spot {
                range: 7.0,
                angle: 0.3,
            },
        ] {
            let (mesh, _) = light_helper_geometry(shape);
            assert_eq!(mesh.primitive_topology(), PrimitiveTopology::LineList);
        }
    }

    #[test]
    fn spot_cone_opens_along_light_direction() {
        let (mesh, transform) = light_helper_geometry(LightHelperShape::Spot {
            range: 2.0,
            angle: 0.1,
        });

        // The apex sits at the light and the base reaches roughly `range` ahead.
        let apex = transform.transform_point(Vec3::new(0.0, 1.0, 0.0));
        assert!(apex.length() < 1e-4);
        let base_centre = transform.transform_point(Vec3::new(0.0, -1.0, 0.0));
        assert!((base_centre - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-4);
        assert!(max_distance_from_origin(&mesh, transform) < 2.1);
    }
}
