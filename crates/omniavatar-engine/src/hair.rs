//! Hair and facial hair resolution.
//!
//! [`hair_assembly`] is the registry: every [`HairStyle`] maps to its own
//! generator. Primitives are in head-local space, origin at the head center.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use omniavatar_spec::{FacialHairStyle, HairStyle, StrandArrangement, StrandLayout};
use tracing::debug;

use crate::dimensions::{FaceDimensions, HeadDimensions};
use crate::geometry::{MaterialRef, Primitive, Shape};
use crate::math::{self, euler_for_axis, Vec3};

/// Resolves a hair catalog id.
///
/// `None` and `bald` give an empty assembly. Ids missing from the catalog
/// resolve to `fallback`.
pub fn resolve_hair(id: Option<&str>, head: &HeadDimensions, fallback: HairStyle) -> Vec<Primitive> {
    let Some(id) = id else {
        return Vec::new();
    };
    let style = match HairStyle::from_catalog_id(id) {
        Some(style) => style,
        None => {
            debug!("unknown hair id '{}', using '{}'", id, fallback);
            fallback
        }
    };
    hair_assembly(style, head)
}

/// Builds the primitives of a hair style.
pub fn hair_assembly(style: HairStyle, head: &HeadDimensions) -> Vec<Primitive> {
    let h = head.height;
    match style {
        HairStyle::Bald => Vec::new(),
        HairStyle::Buzz => vec![scalp_cap("buzz_cap", head, 1.95, h * 0.02)],
        HairStyle::Crew => vec![scalp_cap("crew_cap", head, 1.75, h * 0.09)],
        HairStyle::LowFade => vec![
            scalp_cap("fade_top", head, 1.25, h * 0.08),
            scalp_cap("fade_sides", head, 1.95, h * 0.02),
        ],
        HairStyle::HighFade => vec![
            scalp_cap("fade_top", head, 0.9, h * 0.1),
            scalp_cap("fade_sides", head, 1.6, h * 0.015),
        ],
        HairStyle::Afro => afro(head),
        HairStyle::DreadsShort
        | HairStyle::DreadsLong
        | HairStyle::BoxBraids
        | HairStyle::Twists
        | HairStyle::Cornrows => {
            let mut out = vec![scalp_cap("base_cap", head, 1.55, h * 0.03)];
            if let Some(layout) = style.strand_layout() {
                out.extend(strands(head, &layout));
            }
            out
        }
        HairStyle::Ponytail => {
            let radius = h * 0.09;
            let length = h * 1.2;
            let root = [0.0, h * 0.2, -head.depth * 1.05];
            vec![
                scalp_cap("ponytail_cap", head, 1.7, h * 0.05),
                Primitive::new("ponytail_tie", Shape::sphere(radius * 1.2), MaterialRef::Hair)
                    .at(root),
                Primitive::new("ponytail", Shape::capsule(radius, length), MaterialRef::Hair)
                    .at([0.0, root[1] - length / 2.0, root[2] - h * 0.1])
                    .rotated([-0.2, 0.0, 0.0]),
            ]
        }
        HairStyle::Bun => vec![
            scalp_cap("bun_cap", head, 1.7, h * 0.05),
            Primitive::new("bun", Shape::sphere(h * 0.35), MaterialRef::Hair)
                .at([0.0, h * 0.7, -head.depth * 0.75]),
        ],
        HairStyle::LongStraight => {
            let mut out = vec![
                scalp_cap("long_cap", head, 1.75, h * 0.07),
                Primitive::new(
                    "back_panel",
                    Shape::cuboid(head.width * 2.1, h * 1.6, h * 0.15),
                    MaterialRef::Hair,
                )
                .at([0.0, -h * 0.4, -head.depth * 0.95]),
            ];
            for (side, label) in [(1.0, "left"), (-1.0, "right")] {
                out.push(
                    Primitive::new(
                        format!("{}_lock", label),
                        Shape::cuboid(h * 0.12, h * 1.4, head.depth * 0.9),
                        MaterialRef::Hair,
                    )
                    .at([side * head.width * 1.02, -h * 0.3, -head.depth * 0.1]),
                );
            }
            out
        }
        HairStyle::Bob => vec![
            scalp_cap("bob_cap", head, 1.95, h * 0.1),
            Primitive::new(
                "back_panel",
                Shape::cuboid(head.width * 2.1, h * 0.9, h * 0.15),
                MaterialRef::Hair,
            )
            .at([0.0, -h * 0.15, -head.depth * 0.95]),
        ],
        HairStyle::Mohawk => {
            let mut out = vec![scalp_cap("shaved_cap", head, 1.9, h * 0.01)];
            let spikes = 7;
            for i in 0..spikes {
                let t = i as f64 / (spikes - 1) as f64;
                // Front of the crest to the back of the skull, along the midline.
                let phi = -0.35 + 2.1 * t;
                let normal = math::normalize([0.0, phi.cos(), -phi.sin()]);
                let length = h * 0.45;
                let surface = [0.0, h * phi.cos(), -head.depth * phi.sin()];
                out.push(
                    Primitive::new(
                        format!("spike_{}", i),
                        Shape::cone(h * 0.08, length),
                        MaterialRef::Hair,
                    )
                    .at(math::add(surface, math::scale(normal, length * 0.4)))
                    .rotated(euler_for_axis(normal)),
                );
            }
            out
        }
    }
}

/// A shell cap over the scalp covering polar angles `[0, extent]` from the crown.
fn scalp_cap(name: &str, head: &HeadDimensions, extent: f64, thickness: f64) -> Primitive {
    Primitive::new(name, Shape::cap(1.0, extent), MaterialRef::Hair).scaled([
        head.width + thickness,
        head.height + thickness,
        head.depth + thickness,
    ])
}

fn afro(head: &HeadDimensions) -> Vec<Primitive> {
    let radius = head.max_radius() * 1.5;
    vec![Primitive::new("afro", Shape::cap(radius, 1.9), MaterialRef::Hair)
        .at([0.0, head.height * 0.45, -head.depth * 0.15])
        .scaled([1.0, 0.9, 1.0])]
}

fn strands(head: &HeadDimensions, layout: &StrandLayout) -> Vec<Primitive> {
    let length = layout.length * head.height;
    let radius = layout.radius * head.height;
    match layout.arrangement {
        StrandArrangement::Radial => radial_strands(head, layout.count, length, radius, layout.tilt),
        StrandArrangement::Rows => row_strands(head, layout.count, length, radius),
    }
}

/// Strands rooted around the crown and sides, hanging down and outward.
/// The front of the face is left clear.
fn radial_strands(head: &HeadDimensions, count: u32, length: f64, radius: f64, tilt: f64) -> Vec<Primitive> {
    let start = 0.35 * PI;
    let span = TAU - 2.0 * start;
    (0..count)
        .map(|i| {
            let theta = start + span * (i as f64 + 0.5) / count as f64;
            let alpha = 0.9 + 0.35 * (i % 2) as f64;
            let root = [
                head.width * alpha.sin() * theta.sin(),
                head.height * alpha.cos(),
                head.depth * alpha.sin() * theta.cos(),
            ];
            let hang = [tilt.sin() * theta.sin(), -tilt.cos(), tilt.sin() * theta.cos()];
            Primitive::new(
                format!("strand_{}", i),
                Shape::capsule(radius, length),
                MaterialRef::Hair,
            )
            .at(math::add(root, math::scale(hang, length / 2.0)))
            .rotated(euler_for_axis(math::scale(hang, -1.0)))
        })
        .collect()
}

/// Parallel front-to-back rows hugging the scalp, each split into segments.
fn row_strands(head: &HeadDimensions, count: u32, length: f64, radius: f64) -> Vec<Primitive> {
    let segments = 5;
    // Arc extent is chosen so the row length along the scalp tracks `length`.
    let sweep = (length / head.height).clamp(0.5, 2.4);
    let start = -0.45;
    let mut out = Vec::with_capacity(count as usize * segments);
    for row in 0..count {
        let fx = if count > 1 {
            -0.7 + 1.4 * row as f64 / (count - 1) as f64
        } else {
            0.0
        };
        let squeeze = (1.0 - fx * fx).sqrt();
        let point = |phi: f64| -> Vec3 {
            [
                fx * head.width,
                squeeze * (head.height + radius) * phi.cos(),
                -squeeze * (head.depth + radius) * phi.sin(),
            ]
        };
        for k in 0..segments {
            let a = point(start + sweep * k as f64 / segments as f64);
            let b = point(start + sweep * (k + 1) as f64 / segments as f64);
            let chord = math::sub(b, a);
            out.push(
                Primitive::new(
                    format!("cornrow_{}_{}", row, k),
                    Shape::capsule(radius, math::length(chord).max(radius)),
                    MaterialRef::Hair,
                )
                .at(math::scale(math::add(a, b), 0.5))
                .rotated(euler_for_axis(chord)),
            );
        }
    }
    out
}

/// Builds facial hair in head-local space.
pub fn resolve_facial_hair(
    style: FacialHairStyle,
    head: &HeadDimensions,
    face: &FaceDimensions,
) -> Vec<Primitive> {
    let mustache = || {
        Primitive::new(
            "mustache",
            Shape::capsule(face.lip_upper * 0.5, face.mouth_width * 1.6),
            MaterialRef::Hair,
        )
        .at([
            0.0,
            face.mouth_y + face.lip_upper * 2.2,
            head.depth * 0.9 + face.mouth_protrusion,
        ])
        .rotated([0.0, 0.0, FRAC_PI_2])
    };
    match style {
        FacialHairStyle::None => Vec::new(),
        FacialHairStyle::Stubble => vec![Primitive::new("stubble", Shape::sphere(1.0), MaterialRef::Hair)
            .at([0.0, -head.height * 0.45, head.depth * 0.1])
            .scaled([head.jaw_width * 1.03, head.jaw_height * 0.62, head.depth * 0.83])],
        FacialHairStyle::Mustache => vec![mustache()],
        FacialHairStyle::Goatee => vec![
            mustache(),
            Primitive::new("goatee", Shape::sphere(head.chin_width * 0.6), MaterialRef::Hair)
                .at([
                    0.0,
                    -head.height * 0.8,
                    head.depth * 0.55 + head.chin_protrusion,
                ])
                .scaled([1.0, 1.2, 0.8]),
        ],
        FacialHairStyle::FullBeard => vec![
            mustache(),
            Primitive::new("beard", Shape::sphere(1.0), MaterialRef::Hair)
                .at([0.0, -head.height * 0.5, head.depth * 0.12])
                .scaled([head.jaw_width * 1.08, head.jaw_height * 0.75, head.depth * 0.88]),
        ],
    }
}
