//! Orthographic front-view screenshot.
//!
//! The camera looks down -Z at the avatar. Triangles are z-buffered with
//! flat Lambert shading and encoded with fixed PNG settings so identical
//! scenes give identical bytes.

use std::collections::BTreeMap;

use omniavatar_spec::Rgb;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};

use super::mesh::SceneMesh;
use crate::config::RenderConfig;
use crate::math::{self, Vec3};
use crate::scene::PaletteEntry;

const AMBIENT: f64 = 0.25;
const MARGIN: f64 = 0.9;

/// An RGBA8 image.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Framebuffer {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Rasterizes the mesh into a framebuffer.
pub fn render(
    mesh: &SceneMesh,
    palette: &BTreeMap<String, PaletteEntry>,
    config: &RenderConfig,
) -> Framebuffer {
    let (width, height) = (config.width.max(1), config.height.max(1));
    let background = Rgb::from_hex_or(&config.background, Rgb::new(0.0, 0.0, 0.0));
    let bg = to_rgba8(background);
    let mut pixels = bg.repeat((width * height) as usize);
    let mut depth = vec![f64::NEG_INFINITY; (width * height) as usize];

    let Some((lo, hi)) = mesh_bounds(mesh) else {
        return Framebuffer {
            width,
            height,
            pixels,
        };
    };
    let size_x = (hi[0] - lo[0]).max(1e-6);
    let size_y = (hi[1] - lo[1]).max(1e-6);
    let scale = (width as f64 * MARGIN / size_x).min(height as f64 * MARGIN / size_y);
    let center = [(lo[0] + hi[0]) / 2.0, (lo[1] + hi[1]) / 2.0];
    let project = |p: [f32; 3]| -> Vec3 {
        [
            (p[0] as f64 - center[0]) * scale + width as f64 / 2.0,
            height as f64 / 2.0 - (p[1] as f64 - center[1]) * scale,
            p[2] as f64,
        ]
    };
    let light = math::normalize([0.3, 0.5, 1.0]);

    for (key, group) in &mesh.groups {
        let base = palette
            .get(key)
            .map(|e| e.color)
            .unwrap_or(Rgb::new(0.6, 0.6, 0.6));
        for tri in group.indices.chunks_exact(3) {
            let idx = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let v = idx.map(|i| project(group.positions[i]));
            let n = idx.iter().fold(math::ZERO, |acc, &i| {
                math::add(acc, group.normals[i].map(f64::from))
            });
            let lambert = math::dot(math::normalize(n), light).max(0.0);
            let shade = AMBIENT + (1.0 - AMBIENT) * lambert;
            let color = to_rgba8(base.scaled(shade));
            fill_triangle(v, width, height, &mut depth, &mut pixels, color);
        }
    }

    Framebuffer {
        width,
        height,
        pixels,
    }
}

fn mesh_bounds(mesh: &SceneMesh) -> Option<([f64; 3], [f64; 3])> {
    mesh.groups
        .values()
        .filter_map(|g| g.bounds())
        .map(|(lo, hi)| (lo.map(f64::from), hi.map(f64::from)))
        .reduce(|(alo, ahi), (blo, bhi)| {
            (
                [alo[0].min(blo[0]), alo[1].min(blo[1]), alo[2].min(blo[2])],
                [ahi[0].max(bhi[0]), ahi[1].max(bhi[1]), ahi[2].max(bhi[2])],
            )
        })
}

fn to_rgba8(c: Rgb) -> [u8; 4] {
    let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(c.r), q(c.g), q(c.b), 255]
}

fn edge(a: Vec3, b: Vec3, px: f64, py: f64) -> f64 {
    (b[0] - a[0]) * (py - a[1]) - (b[1] - a[1]) * (px - a[0])
}

/// Fills one screen-space triangle, keeping the nearest (largest z) sample.
fn fill_triangle(
    v: [Vec3; 3],
    width: u32,
    height: u32,
    depth: &mut [f64],
    pixels: &mut [u8],
    color: [u8; 4],
) {
    let area = edge(v[0], v[1], v[2][0], v[2][1]);
    if area.abs() < 1e-12 {
        return;
    }
    let min_x = v.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min).floor().max(0.0) as u32;
    let max_x = v.iter().map(|p| p[0]).fold(f64::NEG_INFINITY, f64::max).ceil().min(width as f64 - 1.0);
    let min_y = v.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min).floor().max(0.0) as u32;
    let max_y = v.iter().map(|p| p[1]).fold(f64::NEG_INFINITY, f64::max).ceil().min(height as f64 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let (max_x, max_y) = (max_x as u32, max_y as u32);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
            let w0 = edge(v[1], v[2], px, py) / area;
            let w1 = edge(v[2], v[0], px, py) / area;
            let w2 = edge(v[0], v[1], px, py) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }
            let z = w0 * v[0][2] + w1 * v[1][2] + w2 * v[2][2];
            let i = (y * width + x) as usize;
            if z > depth[i] {
                depth[i] = z;
                pixels[i * 4..i * 4 + 4].copy_from_slice(&color);
            }
        }
    }
}

/// Encodes a framebuffer as PNG bytes.
pub fn encode_png(frame: &Framebuffer) -> Result<Vec<u8>, png::EncodingError> {
    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, frame.width, frame.height);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_compression(Compression::Default);
        encoder.set_filter(FilterType::NoFilter);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&frame.pixels)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TessellationConfig;
    use crate::export::mesh::tessellate;
    use crate::geometry::Shape;

    fn single(shape: Shape) -> SceneMesh {
        let mut mesh = SceneMesh::default();
        mesh.groups
            .insert("skin".to_string(), tessellate(&shape, &TessellationConfig::default()));
        mesh
    }

    fn small() -> RenderConfig {
        RenderConfig {
            width: 32,
            height: 32,
            background: "#000000".to_string(),
        }
    }

    #[test]
    fn test_center_is_covered_corners_are_background() {
        let frame = render(&single(Shape::sphere(1.0)), &BTreeMap::new(), &small());
        assert_ne!(frame.pixel(16, 16), [0, 0, 0, 255]);
        assert_eq!(frame.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_empty_mesh_is_background() {
        let frame = render(&SceneMesh::default(), &BTreeMap::new(), &small());
        assert!(frame.pixels.chunks(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_png_signature_and_determinism() {
        let frame = render(&single(Shape::cuboid(1.0, 2.0, 1.0)), &BTreeMap::new(), &small());
        let a = encode_png(&frame).unwrap();
        let b = encode_png(&frame).unwrap();
        assert_eq!(&a[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(a, b);
    }
}
