//! Triangle tessellation of primitive shapes.
//!
//! Round shapes are lathed: a profile of `(radius, y)` points from top to
//! bottom is revolved around local Y. Triangles wind counter-clockwise seen
//! from outside.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::config::TessellationConfig;
use crate::geometry::{linear_part, Shape, WorldPrimitive};
use crate::math::{self, Vec3};
use crate::scene::Scene;

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl TriMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Component-wise position bounds, `None` when empty.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(lo, hi), p| {
            (
                [lo[0].min(p[0]), lo[1].min(p[1]), lo[2].min(p[2])],
                [hi[0].max(p[0]), hi[1].max(p[1]), hi[2].max(p[2])],
            )
        }))
    }

    /// Appends another mesh, offsetting its indices.
    pub fn append(&mut self, other: &TriMesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    fn push_vertex(&mut self, p: Vec3, n: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(p.map(|v| v as f32));
        self.normals.push(n.map(|v| v as f32));
        index
    }
}

/// Scene geometry grouped by material key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMesh {
    pub groups: BTreeMap<String, TriMesh>,
}

impl SceneMesh {
    /// Tessellates every primitive of a scene into world space.
    pub fn from_scene(scene: &Scene, tess: &TessellationConfig) -> Self {
        let mut groups: BTreeMap<String, TriMesh> = BTreeMap::new();
        for wp in scene.flatten() {
            let mesh = tessellate_world(&wp, tess);
            groups
                .entry(wp.primitive.material.key())
                .or_default()
                .append(&mesh);
        }
        groups.retain(|_, mesh| !mesh.is_empty());
        Self { groups }
    }

    pub fn triangle_count(&self) -> usize {
        self.groups.values().map(TriMesh::triangle_count).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.groups.values().map(TriMesh::vertex_count).sum()
    }
}

/// Tessellates a primitive and moves it into world space.
pub fn tessellate_world(wp: &WorldPrimitive, tess: &TessellationConfig) -> TriMesh {
    let local = tessellate(&wp.primitive.shape, tess);
    let linear = linear_part(&wp.transform, wp.primitive.scale);
    // Normals go through the inverse transpose: R * S^-1.
    let inv_scale = wp.primitive.scale.map(|s| 1.0 / s);
    let normal_matrix = linear_part(&wp.transform, inv_scale);
    let mut out = TriMesh {
        positions: Vec::with_capacity(local.positions.len()),
        normals: Vec::with_capacity(local.normals.len()),
        indices: local.indices,
    };
    for (p, n) in local.positions.iter().zip(local.normals.iter()) {
        let p = p.map(f64::from);
        let n = n.map(f64::from);
        let world = math::add(wp.transform.translation, linear.apply(p));
        out.positions.push(world.map(|v| v as f32));
        out.normals
            .push(math::normalize(normal_matrix.apply(n)).map(|v| v as f32));
    }
    out
}

/// Tessellates a shape in its local frame.
pub fn tessellate(shape: &Shape, tess: &TessellationConfig) -> TriMesh {
    let rings = tess.rings.max(3) as usize;
    let segments = tess.segments.max(3) as usize;
    match *shape {
        Shape::Sphere {
            radius,
            polar_extent,
        } => {
            let profile = (0..=rings)
                .map(|i| {
                    let theta = polar_extent * i as f64 / rings as f64;
                    let (s, c) = theta.sin_cos();
                    ([radius * s, radius * c], [s, c])
                })
                .collect::<Vec<_>>();
            lathe(&profile, segments)
        }
        Shape::Capsule { radius, length } => {
            let half = rings / 2;
            let mut profile = Vec::with_capacity(2 * (half + 1));
            for (offset, from) in [(length / 2.0, 0.0), (-length / 2.0, FRAC_PI_2)] {
                for i in 0..=half {
                    let theta = from + FRAC_PI_2 * i as f64 / half as f64;
                    let (s, c) = theta.sin_cos();
                    profile.push(([radius * s, radius * c + offset], [s, c]));
                }
            }
            lathe(&profile, segments)
        }
        Shape::Cylinder {
            radius_top,
            radius_bottom,
            height,
        } => {
            let side = normalize2([height, radius_bottom - radius_top]);
            let top = height / 2.0;
            lathe(
                &[
                    ([0.0, top], [0.0, 1.0]),
                    ([radius_top, top], [0.0, 1.0]),
                    ([radius_top, top], side),
                    ([radius_bottom, -top], side),
                    ([radius_bottom, -top], [0.0, -1.0]),
                    ([0.0, -top], [0.0, -1.0]),
                ],
                segments,
            )
        }
        Shape::Cone { radius, height } => {
            let side = normalize2([height, radius]);
            let top = height / 2.0;
            lathe(
                &[
                    ([0.0, top], side),
                    ([radius, -top], side),
                    ([radius, -top], [0.0, -1.0]),
                    ([0.0, -top], [0.0, -1.0]),
                ],
                segments,
            )
        }
        Shape::Box { size } => cuboid(size),
    }
}

fn normalize2(v: [f64; 2]) -> [f64; 2] {
    let len = (v[0] * v[0] + v[1] * v[1]).sqrt();
    if len > 1e-12 {
        [v[0] / len, v[1] / len]
    } else {
        [1.0, 0.0]
    }
}

/// Revolves `(point, normal)` profile pairs, each `[radial, y]`, around Y.
fn lathe(profile: &[([f64; 2], [f64; 2])], segments: usize) -> TriMesh {
    let mut mesh = TriMesh::default();
    let stride = segments + 1;
    for (point, normal) in profile {
        for j in 0..=segments {
            let (s, c) = (TAU * j as f64 / segments as f64).sin_cos();
            mesh.push_vertex(
                [point[0] * c, point[1], point[0] * s],
                [normal[0] * c, normal[1], normal[0] * s],
            );
        }
    }
    for i in 0..profile.len().saturating_sub(1) {
        for j in 0..segments {
            let a = (i * stride + j) as u32;
            let b = a + stride as u32;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

fn cuboid(size: Vec3) -> TriMesh {
    let h = math::scale(size, 0.5);
    let x = [h[0], 0.0, 0.0];
    let y = [0.0, h[1], 0.0];
    let z = [0.0, 0.0, h[2]];
    // (face center, u, v) with u x v pointing outward.
    let faces = [
        (x, y, z),
        (math::scale(x, -1.0), z, y),
        (y, z, x),
        (math::scale(y, -1.0), x, z),
        (z, x, y),
        (math::scale(z, -1.0), y, x),
    ];
    let mut mesh = TriMesh::default();
    for (center, u, v) in faces {
        let normal = math::normalize(center);
        let corners = [
            math::sub(math::sub(center, u), v),
            math::sub(math::add(center, u), v),
            math::add(math::add(center, u), v),
            math::add(math::sub(center, u), v),
        ];
        let base = mesh.positions.len() as u32;
        for corner in corners {
            mesh.push_vertex(corner, normal);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tess() -> TessellationConfig {
        TessellationConfig::default()
    }

    /// Sum of outward-weighted triangle normals; positive means outward winding.
    fn outwardness(mesh: &TriMesh) -> f64 {
        mesh.indices
            .chunks(3)
            .map(|t| {
                let p = |i: u32| mesh.positions[i as usize].map(f64::from);
                let (a, b, c) = (p(t[0]), p(t[1]), p(t[2]));
                let n = math::cross(math::sub(b, a), math::sub(c, a));
                let centroid = math::scale(math::add(math::add(a, b), c), 1.0 / 3.0);
                math::dot(n, centroid)
            })
            .sum()
    }

    #[test]
    fn test_sphere_vertices_lie_on_radius() {
        let mesh = tessellate(&Shape::sphere(2.0), &tess());
        for p in &mesh.positions {
            let r = math::length(p.map(f64::from));
            assert!((r - 2.0).abs() < 1e-5);
        }
        assert_eq!(mesh.vertex_count(), 13 * 17);
        assert_eq!(mesh.triangle_count(), 12 * 16 * 2);
    }

    #[test]
    fn test_every_shape_winds_outward() {
        let shapes = [
            Shape::sphere(1.0),
            Shape::capsule(0.5, 1.0),
            Shape::cylinder(0.4, 0.6, 1.0),
            Shape::cone(0.5, 1.0),
            Shape::cuboid(1.0, 2.0, 3.0),
        ];
        for shape in shapes {
            let mesh = tessellate(&shape, &tess());
            assert!(outwardness(&mesh) > 0.0, "{} winds inward", shape.kind_name());
        }
    }

    #[test]
    fn test_mesh_bounds_match_shape_bounds() {
        let shape = Shape::capsule(0.1, 0.6);
        let (lo, hi) = tessellate(&shape, &tess()).bounds().unwrap();
        assert!((hi[1] - 0.4).abs() < 1e-6);
        assert!((lo[1] + 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_append_offsets_indices() {
        let a = tessellate(&Shape::cuboid(1.0, 1.0, 1.0), &tess());
        let mut both = a.clone();
        both.append(&a);
        assert_eq!(both.vertex_count(), 48);
        assert_eq!(both.indices[36], 24);
    }
}
