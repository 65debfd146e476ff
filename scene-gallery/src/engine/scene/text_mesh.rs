//! Extruded text meshes built from font glyph outlines.
//!
//! Outlines come from `ttf-parser` and are flattened and tessellated with
//! `lyon`. The solid is centred on the origin: front and back caps, a
//! chamfered bevel on both edges and straight side walls in between.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use lyon::lyon_tessellation::{BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers};
use lyon::math::point;
use lyon::path::PathEvent;
use lyon::path::iterator::PathIterator;
use thiserror::Error;

/// Longest miter allowed at sharp corners, as a multiple of the bevel size.
const MAX_MITER: f32 = 2.0;

#[derive(Debug, Error)]
pub enum TextMeshError {
    #[error("font could not be parsed: {0}")]
    Font(ttf_parser::FaceParsingError),
    #[error("glyph tessellation failed: {0:?}")]
    Tessellation(lyon::lyon_tessellation::TessellationError),
    #[error("text {0:?} has no visible glyphs")]
    Empty(String),
}

/// Shape of an extruded headline, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtrusion {
    /// Cap height of the em box.
    pub size: f32,
    /// Depth of the straight side walls.
    pub depth: f32,
    /// How far the bevel reaches past each cap along z.
    pub bevel_thickness: f32,
    /// How far the bevel pushes the walls out from the glyph outline.
    pub bevel_size: f32,
    /// Maximum distance between a curve and its flattened polyline.
    pub tolerance: f32,
}

impl Default for TextExtrusion {
    fn default() -> Self {
        Self {
            size: 0.5,
            depth: 0.2,
            bevel_thickness: 0.03,
            bevel_size: 0.02,
            tolerance: 0.005,
        }
    }
}

/// Collects one glyph outline as lyon path events, placed at the pen
/// position and scaled from font units.
struct GlyphOutline<'a> {
    events: &'a mut Vec<PathEvent>,
    origin: Vec2,
    scale: f32,
    first: Option<lyon::math::Point>,
    current: lyon::math::Point,
}

impl GlyphOutline<'_> {
    fn map(&self, x: f32, y: f32) -> lyon::math::Point {
        point(self.origin.x + x * self.scale, self.origin.y + y * self.scale)
    }

    fn end_contour(&mut self) {
        if let Some(first) = self.first.take() {
            self.events.push(PathEvent::End {
                last: self.current,
                first,
                close: true,
            });
        }
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutline<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.end_contour();
        let at = self.map(x, y);
        self.events.push(PathEvent::Begin { at });
        self.first = Some(at);
        self.current = at;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let to = self.map(x, y);
        self.events.push(PathEvent::Line { from: self.current, to });
        self.current = to;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let to = self.map(x, y);
        self.events.push(PathEvent::Quadratic {
            from: self.current,
            ctrl: self.map(x1, y1),
            to,
        });
        self.current = to;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let to = self.map(x, y);
        self.events.push(PathEvent::Cubic {
            from: self.current,
            ctrl1: self.map(x1, y1),
            ctrl2: self.map(x2, y2),
            to,
        });
        self.current = to;
    }

    fn close(&mut self) {
        self.end_contour();
    }
}

/// Outline events for a single line of text set with `font`, baseline at y = 0.
pub fn text_outline(font: &[u8], text: &str, size: f32) -> Result<Vec<PathEvent>, TextMeshError> {
    let face = ttf_parser::Face::parse(font, 0).map_err(TextMeshError::Font)?;
    let scale = size / f32::from(face.units_per_em());

    let mut events = Vec::new();
    let mut pen = 0.0;
    for c in text.chars() {
        let Some(glyph) = face.glyph_index(c) else {
            warn!("Font has no glyph for {c:?}");
            continue;
        };
        let mut outline = GlyphOutline {
            events: &mut events,
            origin: Vec2::new(pen, 0.0),
            scale,
            first: None,
            current: point(0.0, 0.0),
        };
        face.outline_glyph(glyph, &mut outline);
        outline.end_contour();
        pen += face.glyph_hor_advance(glyph).map_or(0.0, f32::from) * scale;
    }
    Ok(events)
}

/// Closed polylines of an outline, without the repeated closing point.
pub fn flatten_contours(events: &[PathEvent], tolerance: f32) -> Vec<Vec<Vec2>> {
    let mut contours = Vec::new();
    let mut contour: Vec<Vec2> = Vec::new();
    for event in events.iter().cloned().flattened(tolerance) {
        match event {
            PathEvent::Begin { at } => {
                contour.clear();
                contour.push(Vec2::new(at.x, at.y));
            }
            PathEvent::Line { to, .. } => contour.push(Vec2::new(to.x, to.y)),
            PathEvent::End { .. } => {
                if contour.len() > 1 && contour.first() == contour.last() {
                    contour.pop();
                }
                if contour.len() >= 3 {
                    contours.push(std::mem::take(&mut contour));
                }
            }
            _ => {}
        }
    }
    contours
}

/// Twice the signed area; positive for counter-clockwise contours.
pub fn signed_area(contour: &[Vec2]) -> f32 {
    contour
        .iter()
        .zip(contour.iter().cycle().skip(1))
        .map(|(a, b)| a.perp_dot(*b))
        .sum()
}

/// Outward normal of the edge `a -> b`. Glyph outlines keep the filled
/// side on one consistent hand, given by `outer_ccw`.
fn edge_normal(a: Vec2, b: Vec2, outer_ccw: bool) -> Vec2 {
    let d = (b - a).normalize_or_zero();
    if outer_ccw { Vec2::new(d.y, -d.x) } else { Vec2::new(-d.y, d.x) }
}

/// Contour pushed out by `distance` along mitered vertex normals.
pub fn offset_contour(contour: &[Vec2], distance: f32, outer_ccw: bool) -> Vec<Vec2> {
    let n = contour.len();
    (0..n)
        .map(|i| {
            let prev = contour[(i + n - 1) % n];
            let here = contour[i];
            let next = contour[(i + 1) % n];
            let incoming = edge_normal(prev, here, outer_ccw);
            let outgoing = edge_normal(here, next, outer_ccw);
            let miter = (incoming + outgoing).normalize_or(outgoing);
            let stretch = (1.0 / miter.dot(outgoing).max(f32::EPSILON)).min(MAX_MITER);
            here + miter * distance * stretch
        })
        .collect()
}

#[derive(Default)]
struct MeshBuffers {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl MeshBuffers {
    /// Quad `a b c d` facing along `hint`.
    fn quad(&mut self, corners: [Vec3; 4], hint: Vec3) {
        let [a, b, _, d] = corners;
        let mut normal = (b - a).cross(d - a).normalize_or(hint.normalize_or_zero());
        let flip = normal.dot(hint) < 0.0;
        if flip {
            normal = -normal;
        }
        let base = self.positions.len() as u32;
        for corner in corners {
            self.positions.push(corner.to_array());
            self.normals.push(normal.to_array());
        }
        let order: [u32; 6] = if flip { [0, 2, 1, 0, 3, 2] } else { [0, 1, 2, 0, 2, 3] };
        self.indices.extend(order.iter().map(|i| base + i));
    }

    /// Tessellated cap at height `z`, wound to face `facing` (+1 or -1 on z).
    fn cap(&mut self, vertices: &[[f32; 2]], triangles: &[u32], z: f32, facing: f32) {
        let base = self.positions.len() as u32;
        for v in vertices {
            self.positions.push([v[0], v[1], z]);
            self.normals.push([0.0, 0.0, facing]);
        }
        for tri in triangles.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec2::from(vertices[i as usize]));
            let ccw = (b - a).perp_dot(c - a) > 0.0;
            if ccw == (facing > 0.0) {
                self.indices.extend([base + tri[0], base + tri[1], base + tri[2]]);
            } else {
                self.indices.extend([base + tri[0], base + tri[2], base + tri[1]]);
            }
        }
    }
}

/// Extruded, bevelled and centred mesh of `text`.
pub fn extruded_text_mesh(font: &[u8], text: &str, shape: &TextExtrusion) -> Result<Mesh, TextMeshError> {
    let events = text_outline(font, text, shape.size)?;
    let contours = flatten_contours(&events, shape.tolerance);
    if contours.is_empty() {
        return Err(TextMeshError::Empty(text.to_string()));
    }

    let mut caps: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate(
            events.iter().cloned(),
            &FillOptions::default()
                .with_tolerance(shape.tolerance)
                .with_fill_rule(FillRule::NonZero),
            &mut BuffersBuilder::new(&mut caps, |vertex: FillVertex| vertex.position().to_array()),
        )
        .map_err(TextMeshError::Tessellation)?;

    // Outer contours enclose the most area, so they set the winding.
    let outer_ccw = contours.iter().map(|c| signed_area(c)).sum::<f32>() > 0.0;

    let wall = shape.depth / 2.0;
    let face = wall + shape.bevel_thickness;
    let mut mesh = MeshBuffers::default();
    mesh.cap(&caps.vertices, &caps.indices, face, 1.0);
    mesh.cap(&caps.vertices, &caps.indices, -face, -1.0);

    for contour in &contours {
        let outset = offset_contour(contour, shape.bevel_size, outer_ccw);
        let n = contour.len();
        for i in 0..n {
            let j = (i + 1) % n;
            let out = edge_normal(contour[i], contour[j], outer_ccw).extend(0.0);
            let (p0, p1) = (contour[i], contour[j]);
            let (q0, q1) = (outset[i], outset[j]);

            mesh.quad(
                [p0.extend(face), p1.extend(face), q1.extend(wall), q0.extend(wall)],
                out + Vec3::Z,
            );
            mesh.quad(
                [q0.extend(wall), q1.extend(wall), q1.extend(-wall), q0.extend(-wall)],
                out,
            );
            mesh.quad(
                [q0.extend(-wall), q1.extend(-wall), p1.extend(-face), p0.extend(-face)],
                out - Vec3::Z,
            );
        }
    }

    center_positions(&mut mesh.positions);

    Ok(Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, mesh.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, mesh.normals)
        .with_inserted_indices(Indices::U32(mesh.indices)))
}

/// Move the bounding box centre to the origin.
fn center_positions(positions: &mut [[f32; 3]]) {
    let (min, max) = positions.iter().fold(
        (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
        |(min, max), p| (min.min(Vec3::from(*p)), max.max(Vec3::from(*p))),
    );
    let center = (min + max) / 2.0;
    for p in positions.iter_mut() {
        *p = (Vec3::from(*p) - center).to_array();
    }
}
