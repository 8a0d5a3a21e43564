//! Accessory geometry: glasses on the head and a watch on the left wrist.

use std::f64::consts::{FRAC_PI_2, TAU};

use omniavatar_spec::{Accessories, Glasses, Watch};

use crate::dimensions::{ArmDimensions, FaceDimensions, HeadDimensions};
use crate::geometry::{BodyPart, MaterialRef, Primitive, Shape};
use crate::math::{self, euler_for_axis, Vec3};

const RIM_SEGMENTS: usize = 16;

/// Accessory primitives grouped by the part they attach to.
pub fn resolve_accessories(
    accessories: &Accessories,
    head: &HeadDimensions,
    face: &FaceDimensions,
    arms: &ArmDimensions,
) -> Vec<(BodyPart, Vec<Primitive>)> {
    let mut out = Vec::new();
    let glasses = glasses_primitives(accessories.glasses, head, face);
    if !glasses.is_empty() {
        out.push((BodyPart::Head, glasses));
    }
    let watch = watch_primitives(accessories.watch, arms);
    if !watch.is_empty() {
        out.push((BodyPart::LeftForearm, watch));
    }
    out
}

/// Builds eyewear in head-local space.
pub fn glasses_primitives(
    style: Glasses,
    head: &HeadDimensions,
    face: &FaceDimensions,
) -> Vec<Primitive> {
    let wire = face.eye_radius * 0.12;
    let lens_z = face.eye_z + face.eye_radius * 1.3;
    let (half_w, half_h) = match style {
        Glasses::None => return Vec::new(),
        Glasses::Reading => (face.eye_radius * 1.7, face.eye_radius * 1.2),
        Glasses::Round | Glasses::Monocle => (face.eye_radius * 1.5, face.eye_radius * 1.5),
        Glasses::Square => (face.eye_radius * 1.6, face.eye_radius * 1.4),
    };
    let material = match style {
        Glasses::Monocle => MaterialRef::Gold,
        _ => MaterialRef::Metal,
    };

    if style == Glasses::Monocle {
        // Worn over the right eye, which sits on -X.
        let center = [-face.eye_spacing, face.eye_y, lens_z];
        return oval_rim("glasses_right_rim", center, half_w, half_h, wire, material);
    }

    let mut out = Vec::new();
    for (side, label) in [(1.0, "left"), (-1.0, "right")] {
        let center = [side * face.eye_spacing, face.eye_y, lens_z];
        let name = format!("glasses_{}_rim", label);
        if style == Glasses::Square {
            out.extend(square_rim(&name, center, half_w, half_h, wire, material));
        } else {
            out.extend(oval_rim(&name, center, half_w, half_h, wire, material));
        }
        let temple_x = side * (face.eye_spacing + half_w).max(head.width * 0.95);
        out.push(
            Primitive::new(
                format!("glasses_{}_temple", label),
                Shape::cuboid(wire * 1.5, wire * 1.5, lens_z),
                material,
            )
            .at([temple_x, face.eye_y, lens_z / 2.0]),
        );
    }
    let bridge = (2.0 * (face.eye_spacing - half_w)).max(wire * 2.0);
    out.push(
        Primitive::new("glasses_bridge", Shape::cuboid(bridge, wire * 1.5, wire * 1.5), material)
            .at([0.0, face.eye_y + half_h * 0.3, lens_z]),
    );
    out
}

/// A closed elliptical frame in the XY plane made of capsule segments.
fn oval_rim(
    name: &str,
    center: Vec3,
    half_w: f64,
    half_h: f64,
    wire: f64,
    material: MaterialRef,
) -> Vec<Primitive> {
    let point = |k: usize| -> Vec3 {
        let t = TAU * k as f64 / RIM_SEGMENTS as f64;
        math::add(center, [half_w * t.cos(), half_h * t.sin(), 0.0])
    };
    (0..RIM_SEGMENTS)
        .map(|k| {
            let (a, b) = (point(k), point(k + 1));
            let chord = math::sub(b, a);
            Primitive::new(
                format!("{}_{}", name, k),
                Shape::capsule(wire, math::length(chord).max(wire)),
                material,
            )
            .at(math::scale(math::add(a, b), 0.5))
            .rotated(euler_for_axis(chord))
        })
        .collect()
}

fn square_rim(
    name: &str,
    center: Vec3,
    half_w: f64,
    half_h: f64,
    wire: f64,
    material: MaterialRef,
) -> Vec<Primitive> {
    let bar = |suffix: &str, size: Vec3, offset: Vec3| {
        Primitive::new(
            format!("{}_{}", name, suffix),
            Shape::cuboid(size[0], size[1], size[2]),
            material,
        )
        .at(math::add(center, offset))
    };
    let t = wire * 2.0;
    vec![
        bar("top", [2.0 * half_w + t, t, t], [0.0, half_h, 0.0]),
        bar("bottom", [2.0 * half_w + t, t, t], [0.0, -half_h, 0.0]),
        bar("outer", [t, 2.0 * half_h, t], [half_w, 0.0, 0.0]),
        bar("inner", [t, 2.0 * half_h, t], [-half_w, 0.0, 0.0]),
    ]
}

/// Builds a watch in left-forearm space, just above the wrist.
pub fn watch_primitives(style: Watch, arms: &ArmDimensions) -> Vec<Primitive> {
    let material = match style {
        Watch::None => return Vec::new(),
        Watch::Silver => MaterialRef::Metal,
        Watch::Gold => MaterialRef::Gold,
    };
    let y = -arms.forearm_length * 0.9;
    let band_radius = arms.wrist_radius * 1.15;
    let face_radius = arms.wrist_radius * 0.8;
    vec![
        Primitive::new(
            "watch_band",
            Shape::cylinder(band_radius, band_radius, arms.wrist_radius * 0.7),
            material,
        )
        .at([0.0, y, 0.0]),
        // Dial faces outward along +Z with the forearm at rest.
        Primitive::new(
            "watch_face",
            Shape::cylinder(face_radius, face_radius, arms.wrist_radius * 0.25),
            material,
        )
        .at([0.0, y, band_radius])
        .rotated([FRAC_PI_2, 0.0, 0.0]),
    ]
}
