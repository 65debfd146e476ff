//! Procedural mesh and texture builders shared by the pages.

use std::collections::HashSet;
use std::f32::consts::PI;

use bevy::asset::RenderAssetUsages;
use bevy::math::Affine2;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use rand::Rng;

/// Edge list of a triangle mesh, one line per unique index pair.
/// Returns `None` for meshes without float3 positions or a non-triangle topology.
pub fn wireframe_mesh(mesh: &Mesh) -> Option<Mesh> {
    if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
        return None;
    }
    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return None;
    };

    let indices: Vec<u32> = match mesh.indices() {
        Some(indices) => indices.iter().map(|i| i as u32).collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            if seen.insert((a.min(b), a.max(b))) {
                lines.push(positions[a as usize]);
                lines.push(positions[b as usize]);
            }
        }
    }

    Some(
        Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, lines),
    )
}

/// `count` triangles worth of vertices, each coordinate uniform in [-1, 1].
pub fn random_triangle_positions(rng: &mut impl Rng, count: usize) -> Vec<[f32; 3]> {
    (0..count * 3)
        .map(|_| {
            [
                (rng.random::<f32>() - 0.5) * 2.0,
                (rng.random::<f32>() - 0.5) * 2.0,
                (rng.random::<f32>() - 0.5) * 2.0,
            ]
        })
        .collect()
}

/// Unindexed triangle list from raw positions.
pub fn triangle_soup_mesh(positions: Vec<[f32; 3]>) -> Mesh {
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

/// Points uniformly distributed over a sphere of `radius`.
pub fn sphere_shell_points(rng: &mut impl Rng, count: usize, radius: f32) -> Vec<[f32; 3]> {
    (0..count)
        .map(|_| {
            let theta = rng.random::<f32>() * 2.0 * PI;
            let phi = (2.0 * rng.random::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
            [
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            ]
        })
        .collect()
}

pub fn point_list_mesh(positions: Vec<[f32; 3]>) -> Mesh {
    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

/// Polar UVs for a flat ring in the XY plane: `u` runs around the ring,
/// `v` is the distance from the centre relative to `outer_radius`.
pub fn polar_ring_uvs(positions: &[[f32; 3]], outer_radius: f32) -> Vec<[f32; 2]> {
    positions
        .iter()
        .map(|p| {
            let angle = p[1].atan2(p[0]);
            let radius = Vec2::new(p[0], p[1]).length() / outer_radius;
            [(angle + PI) / (2.0 * PI), radius]
        })
        .collect()
}

/// Replace a ring mesh's UVs with polar ones so a strip texture wraps around it.
pub fn apply_polar_ring_uvs(mesh: &mut Mesh, outer_radius: f32) {
    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return;
    };
    let uvs = polar_ring_uvs(positions, outer_radius);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
}

/// UV transform that repeats a texture `repeat` times and rotates it by
/// `rotation` radians about `center`.
pub fn uv_transform(repeat: Vec2, rotation: f32, center: Vec2) -> Affine2 {
    Affine2::from_translation(center)
        * Affine2::from_scale(repeat)
        * Affine2::from_angle(-rotation)
        * Affine2::from_translation(-center)
}

/// Alpha of a soft round blob at `distance` from its centre (0.5 = edge).
pub fn radial_falloff(distance: f32) -> f32 {
    let t = (1.0 - distance / 0.5).clamp(0.0, 1.0);
    t * t
}

/// Black RGBA image whose alpha fades radially from the centre.
pub fn radial_shadow_image(size: u32) -> Image {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let u = (x as f32 + 0.5) / size as f32 - 0.5;
            let v = (y as f32 + 0.5) / size as f32 - 0.5;
            let alpha = radial_falloff(Vec2::new(u, v).length());
            data.extend_from_slice(&[0, 0, 0, (alpha * 255.0).round() as u8]);
        }
    }

    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

/// Line list of the three coordinate axes coloured red, green and blue.
pub fn axes_mesh(size: f32) -> Mesh {
    let positions = vec![
        [0.0, 0.0, 0.0],
        [size, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, size, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, 0.0, size],
    ];
    let red = [1.0, 0.0, 0.0, 1.0];
    let green = [0.0, 1.0, 0.0, 1.0];
    let blue = [0.0, 0.0, 1.0, 1.0];
    let colours = vec![red, red, green, green, blue, blue];

    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colours)
        .with_inserted_indices(Indices::U32(vec![0, 1, 2, 3, 4, 5]))
}

/// Mesh with tangents for normal and parallax maps, or the mesh unchanged
/// if they cannot be generated.
pub fn with_tangents(mesh: Mesh) -> Mesh {
    let fallback = mesh.clone();
    mesh.with_generated_tangents().unwrap_or_else(|err| {
        warn!("Could not generate tangents, normal and depth maps disabled on this mesh: {err}");
        fallback
    })
}

/// Distance along the ray to the first hit with a sphere, if any.
pub fn ray_sphere_distance(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = origin - center;
    let b = to_center.dot(direction);
    let c = to_center.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    [-b - root, -b + root].into_iter().find(|t| *t >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn line_count(mesh: &Mesh) -> usize {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(p)) => p.len() / 2,
            _ => 0,
        }
    }

    #[test]
    fn cube_wireframe_has_unique_edges() {
        let cube = Mesh::from(Cuboid::new(1.0, 1.0, 1.0));
        let wire = wireframe_mesh(&cube).unwrap();

        assert_eq!(wire.primitive_topology(), PrimitiveTopology::LineList);
        // Six faces, two triangles each, five unique edges per face.
        assert_eq!(line_count(&wire), 30);
    }

    #[test]
    fn unindexed_triangles_give_three_edges_each() {
        let mut rng = StdRng::seed_from_u64(7);
        let soup = triangle_soup_mesh(random_triangle_positions(&mut rng, 20));
        let wire = wireframe_mesh(&soup).unwrap();
        assert_eq!(line_count(&wire), 60);
    }

    #[test]
    fn wireframe_rejects_line_meshes() {
        assert!(wireframe_mesh(&axes_mesh(1.0)).is_none());
    }

    #[test]
    fn random_triangles_stay_in_unit_cube() {
        let mut rng = StdRng::seed_from_u64(42);
        let positions = random_triangle_positions(&mut rng, 500);
        assert_eq!(positions.len(), 1500);
        assert!(positions.iter().flatten().all(|c| (-1.0..=1.0).contains(c)));
    }

    #[test]
    fn same_seed_same_layout() {
        let a = random_triangle_positions(&mut StdRng::seed_from_u64(3), 10);
        let b = random_triangle_positions(&mut StdRng::seed_from_u64(3), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn shell_points_sit_on_the_sphere() {
        let mut rng = StdRng::seed_from_u64(1);
        for p in sphere_shell_points(&mut rng, 200, 500.0) {
            let r = Vec3::from(p).length();
            assert!((r - 500.0).abs() < 0.1);
        }
    }

    #[test]
    fn polar_uvs_wrap_around_the_ring() {
        let uvs = polar_ring_uvs(
            &[[2.5, 0.0, 0.0], [0.0, 1.5, 0.0], [-2.5, -0.0001, 0.0]],
            2.5,
        );
        assert!((uvs[0][0] - 0.5).abs() < 1e-6);
        assert!((uvs[0][1] - 1.0).abs() < 1e-6);
        assert!((uvs[1][0] - 0.75).abs() < 1e-6);
        assert!((uvs[1][1] - 0.6).abs() < 1e-6);
        assert!(uvs[2][0] < 0.01);
    }

    #[test]
    fn uv_transform_keeps_centre_fixed() {
        let t = uv_transform(Vec2::new(10.0, 1.0), PI, Vec2::splat(0.5));
        let centre = t.transform_point2(Vec2::splat(0.5));
        assert!(centre.distance(Vec2::splat(0.5)) < 1e-5);
    }

    #[test]
    fn shadow_blob_is_opaque_in_the_middle_and_clear_at_corners() {
        let image = radial_shadow_image(64);
        let data = image.data.as_ref().unwrap();
        let pixel = |x: usize, y: usize| data[(y * 64 + x) * 4 + 3];

        assert!(pixel(32, 32) > 240);
        assert_eq!(pixel(0, 0), 0);
        assert_eq!(radial_falloff(0.0), 1.0);
        assert_eq!(radial_falloff(0.6), 0.0);
    }

    #[test]
    fn ray_hits_front_of_sphere() {
        let t = ray_sphere_distance(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 1.0);
        assert!((t.unwrap() - 9.0).abs() < 1e-5);
        assert!(ray_sphere_distance(Vec3::new(0.0, 2.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 1.0).is_none());
        assert!(ray_sphere_distance(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, Vec3::ZERO, 1.0).is_none());
    }
}
