//! Facial features in head-local space (origin at the head center, +Z forward).
//!
//! Variants are chosen by lookup on the feature enums; only sizes and
//! positions come from the continuous sliders.

use std::f64::consts::{FRAC_PI_2, PI};

use omniavatar_spec::{EyeType, EyebrowType, EyelashType, FaceFeatures, TeethType};

use super::primitive::{MaterialRef, Primitive, Shape};
use crate::dimensions::{BodyDimensions, FaceDimensions, HeadDimensions};

const SIDES: [(f64, &str); 2] = [(1.0, "left"), (-1.0, "right")];

/// Per-variant eye shape.
struct EyeShape {
    width: f64,
    height: f64,
    tilt: f64,
    hooded: bool,
}

fn eye_shape(eye: EyeType) -> EyeShape {
    match eye {
        EyeType::Round => EyeShape {
            width: 1.0,
            height: 1.0,
            tilt: 0.0,
            hooded: false,
        },
        EyeType::Almond => EyeShape {
            width: 1.1,
            height: 0.75,
            tilt: 0.1,
            hooded: false,
        },
        EyeType::Hooded => EyeShape {
            width: 1.0,
            height: 0.7,
            tilt: -0.05,
            hooded: true,
        },
        EyeType::Monolid => EyeShape {
            width: 1.05,
            height: 0.6,
            tilt: 0.05,
            hooded: false,
        },
    }
}

/// Every facial feature primitive.
pub fn face_primitives(dims: &BodyDimensions, features: &FaceFeatures) -> Vec<Primitive> {
    let head = &dims.head;
    let face = &dims.face;
    let mut out = Vec::new();
    out.extend(eye_primitives(face, features.eye));
    out.extend(nose_primitives(head, face));
    out.extend(lip_primitives(head, face));
    out.extend(ear_primitives(head, face));
    out.extend(cheek_primitives(head, face));
    out.extend(eyebrow_primitives(face, features.eyebrow));
    out.extend(eyelash_primitives(face, features.eyelash));
    out.extend(teeth_primitives(head, face, features.teeth));
    out
}

fn eye_center(face: &FaceDimensions, side: f64) -> [f64; 3] {
    [side * face.eye_spacing, face.eye_y, face.eye_z]
}

/// Sclera, iris and pupil per eye, plus a lid for hooded eyes.
pub fn eye_primitives(face: &FaceDimensions, eye: EyeType) -> Vec<Primitive> {
    let shape = eye_shape(eye);
    let r = face.eye_radius;
    let mut out = Vec::new();
    for (side, label) in SIDES {
        let center = eye_center(face, side);
        let tilt = side * (face.eye_tilt + shape.tilt);
        out.push(
            Primitive::new(format!("{}_eye", label), Shape::sphere(r), MaterialRef::EyeWhite)
                .at(center)
                .rotated([0.0, 0.0, tilt])
                .scaled([shape.width, shape.height * face.eye_aperture, 1.0]),
        );
        out.push(
            Primitive::new(
                format!("{}_iris", label),
                Shape::sphere(r * 0.5),
                MaterialRef::Iris,
            )
            .at([center[0], center[1], center[2] + r * 0.8])
            .scaled([1.0, 1.0, 0.4]),
        );
        out.push(
            Primitive::new(
                format!("{}_pupil", label),
                Shape::sphere(r * 0.22),
                MaterialRef::Pupil,
            )
            .at([center[0], center[1], center[2] + r * 0.95])
            .scaled([1.0, 1.0, 0.4]),
        );
        if shape.hooded {
            out.push(
                Primitive::new(
                    format!("{}_eyelid", label),
                    Shape::cap(r * 1.08, FRAC_PI_2 * 0.8),
                    MaterialRef::Skin,
                )
                .at(center)
                .rotated([0.35, 0.0, tilt])
                .scaled([shape.width, 1.0, 1.0]),
            );
        }
    }
    out
}

fn nose_primitives(head: &HeadDimensions, face: &FaceDimensions) -> Vec<Primitive> {
    let surface = head.depth * 0.9;
    let base_y = face.eye_y - face.nose_length * 0.75;
    let mut out = vec![
        Primitive::new(
            "nose_bridge",
            Shape::capsule(face.nose_bridge / 2.0, face.nose_length * 0.6),
            MaterialRef::Skin,
        )
        .at([0.0, face.eye_y - face.nose_length * 0.35, surface + face.nose_bridge * 0.3]),
        Primitive::new(
            "nose",
            Shape::cone(face.nose_width, face.nose_protrusion),
            MaterialRef::Skin,
        )
        .at([0.0, base_y, surface + face.nose_protrusion / 2.0])
        .rotated([FRAC_PI_2, 0.0, 0.0]),
        Primitive::new("nose_tip", Shape::sphere(face.nose_tip), MaterialRef::Skin).at([
            0.0,
            face.eye_y - face.nose_length * 0.8,
            surface + face.nose_protrusion * 0.85,
        ]),
    ];
    for (side, label) in SIDES {
        out.push(
            Primitive::new(
                format!("{}_nostril", label),
                Shape::sphere(face.nostril_width / 2.0),
                MaterialRef::Skin,
            )
            .at([
                side * face.nose_width * 0.55,
                face.eye_y - face.nose_length * 0.95 + face.nostril_height / 2.0,
                surface + face.nose_protrusion * 0.4,
            ])
            .scaled([1.0, 0.6, 0.8]),
        );
    }
    out
}

fn lip_primitives(head: &HeadDimensions, face: &FaceDimensions) -> Vec<Primitive> {
    let z = head.depth * 0.88 + face.mouth_protrusion;
    let lip = |name: &str, radius: f64, y: f64| {
        let length = (2.0 * face.mouth_width - 2.0 * radius).max(radius * 0.5);
        Primitive::new(name, Shape::capsule(radius, length), MaterialRef::Lip)
            .at([0.0, y, z])
            .rotated([0.0, 0.0, FRAC_PI_2])
    };
    vec![
        lip("upper_lip", face.lip_upper, face.mouth_y + face.lip_upper * 0.9),
        lip("lower_lip", face.lip_lower, face.mouth_y - face.lip_lower * 0.9),
    ]
}

fn ear_primitives(head: &HeadDimensions, face: &FaceDimensions) -> Vec<Primitive> {
    SIDES
        .iter()
        .map(|(side, label)| {
            Primitive::new(
                format!("{}_ear", label),
                Shape::sphere(face.ear_size),
                MaterialRef::Skin,
            )
            .at([side * (head.width + face.ear_size * 0.15), face.ear_y, 0.0])
            .rotated([0.0, side * face.ear_angle, 0.0])
            .scaled([0.35, 1.0, 0.6])
        })
        .collect()
}

fn cheek_primitives(head: &HeadDimensions, face: &FaceDimensions) -> Vec<Primitive> {
    SIDES
        .iter()
        .map(|(side, label)| {
            Primitive::new(
                format!("{}_cheek", label),
                Shape::sphere(head.cheek_radius),
                MaterialRef::Skin,
            )
            .at([
                side * head.cheekbone_width * 0.6,
                face.eye_y - head.height * 0.2 + head.cheekbone_height,
                head.depth * 0.62,
            ])
        })
        .collect()
}

/// Eyebrows by variant.
pub fn eyebrow_primitives(face: &FaceDimensions, eyebrow: EyebrowType) -> Vec<Primitive> {
    let r = face.eye_radius;
    let z = face.eye_z + face.brow_protrusion + r * 0.5;
    let mut out = Vec::new();
    for (side, label) in SIDES {
        let x = side * face.eye_spacing;
        let tilt = FRAC_PI_2 + side * face.brow_angle * 0.5;
        match eyebrow {
            EyebrowType::None => {}
            EyebrowType::Thin | EyebrowType::Thick => {
                let (radius, length) = if eyebrow == EyebrowType::Thin {
                    (r * 0.12, r * 2.0)
                } else {
                    (r * 0.22, r * 2.1)
                };
                out.push(
                    Primitive::new(
                        format!("{}_eyebrow", label),
                        Shape::capsule(radius, length),
                        MaterialRef::Hair,
                    )
                    .at([x, face.brow_y, z])
                    .rotated([0.0, 0.0, tilt]),
                );
            }
            EyebrowType::Arched => {
                let half = r * 0.55;
                for (part, dx, lift) in [("inner", -1.0, 0.35), ("outer", 1.0, -0.35)] {
                    out.push(
                        Primitive::new(
                            format!("{}_eyebrow_{}", label, part),
                            Shape::capsule(r * 0.15, r * 1.1),
                            MaterialRef::Hair,
                        )
                        .at([x + side * dx * half, face.brow_y + r * 0.15, z])
                        .rotated([0.0, 0.0, tilt + side * lift]),
                    );
                }
            }
        }
    }
    out
}

/// Number of lashes per eye for a variant.
pub fn eyelash_count(eyelash: EyelashType) -> usize {
    match eyelash {
        EyelashType::None => 0,
        EyelashType::Short => 3,
        EyelashType::Long => 5,
        EyelashType::Dramatic => 7,
    }
}

/// Eyelashes by variant: cones fanned over the upper lid.
pub fn eyelash_primitives(face: &FaceDimensions, eyelash: EyelashType) -> Vec<Primitive> {
    let count = eyelash_count(eyelash);
    if count == 0 {
        return Vec::new();
    }
    let r = face.eye_radius;
    let length = r * match eyelash {
        EyelashType::Short => 0.25,
        EyelashType::Long => 0.4,
        _ => 0.6,
    };
    let mut out = Vec::with_capacity(count * 2);
    for (side, label) in SIDES {
        let center = eye_center(face, side);
        for i in 0..count {
            let t = i as f64 / (count - 1) as f64;
            let phi = -0.6 + 1.2 * t;
            let lid = r * face.eye_aperture;
            out.push(
                Primitive::new(
                    format!("{}_eyelash_{}", label, i),
                    Shape::cone(r * 0.05, length),
                    MaterialRef::Hair,
                )
                .at([
                    center[0] + phi.sin() * r,
                    center[1] + phi.cos() * lid + length * 0.4,
                    center[2] + r * 0.6,
                ])
                .rotated([0.4, 0.0, -phi]),
            );
        }
    }
    out
}

/// Teeth by variant.
pub fn teeth_primitives(
    head: &HeadDimensions,
    face: &FaceDimensions,
    teeth: TeethType,
) -> Vec<Primitive> {
    let lip = face.lip_upper;
    let row = |material: MaterialRef| {
        Primitive::new(
            "teeth",
            Shape::cuboid(face.mouth_width * 1.5, lip * 1.6, head.depth * 0.1),
            material,
        )
        .at([0.0, face.mouth_y, head.depth * 0.8])
    };
    match teeth {
        TeethType::None => Vec::new(),
        TeethType::White => vec![row(MaterialRef::Tooth)],
        TeethType::Gold => vec![row(MaterialRef::Gold)],
        TeethType::Vampire => {
            let mut out = vec![row(MaterialRef::Tooth)];
            for (side, label) in SIDES {
                out.push(
                    Primitive::new(
                        format!("{}_fang", label),
                        Shape::cone(lip * 0.35, lip * 1.8),
                        MaterialRef::Tooth,
                    )
                    .at([side * face.mouth_width * 0.45, face.mouth_y - lip * 0.8, head.depth * 0.84])
                    .rotated([PI, 0.0, 0.0]),
                );
            }
            out
        }
        TeethType::Braces => {
            let z = head.depth * 0.86;
            let mut out = vec![
                row(MaterialRef::Tooth),
                Primitive::new(
                    "braces_wire",
                    Shape::capsule(lip * 0.08, face.mouth_width * 1.4),
                    MaterialRef::Metal,
                )
                .at([0.0, face.mouth_y, z])
                .rotated([0.0, 0.0, FRAC_PI_2]),
            ];
            let brackets = 6;
            for i in 0..brackets {
                let t = i as f64 / (brackets - 1) as f64 - 0.5;
                out.push(
                    Primitive::new(
                        format!("bracket_{}", i),
                        Shape::cuboid(lip * 0.4, lip * 0.4, lip * 0.2),
                        MaterialRef::Metal,
                    )
                    .at([t * face.mouth_width * 1.3, face.mouth_y, z + lip * 0.1]),
                );
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::compute_dimensions;
    use omniavatar_spec::AvatarProfile;

    fn dims() -> BodyDimensions {
        compute_dimensions(&AvatarProfile::default())
    }

    fn names(prims: &[Primitive]) -> Vec<&str> {
        prims.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_eyes_have_iris_and_pupil() {
        let d = dims();
        let eyes = eye_primitives(&d.face, EyeType::Round);
        assert_eq!(
            names(&eyes),
            vec!["left_eye", "left_iris", "left_pupil", "right_eye", "right_iris", "right_pupil"]
        );
        let hooded = eye_primitives(&d.face, EyeType::Hooded);
        assert_eq!(hooded.len(), 8);
    }

    #[test]
    fn test_eyebrow_variants() {
        let d = dims();
        assert!(eyebrow_primitives(&d.face, EyebrowType::None).is_empty());
        assert_eq!(eyebrow_primitives(&d.face, EyebrowType::Thin).len(), 2);
        assert_eq!(eyebrow_primitives(&d.face, EyebrowType::Arched).len(), 4);

        let thin = &eyebrow_primitives(&d.face, EyebrowType::Thin)[0];
        let thick = &eyebrow_primitives(&d.face, EyebrowType::Thick)[0];
        let radius = |p: &Primitive| match p.shape {
            Shape::Capsule { radius, .. } => radius,
            _ => panic!("eyebrows are capsules"),
        };
        assert!(radius(thin) < radius(thick));
    }

    #[test]
    fn test_eyelash_counts() {
        let d = dims();
        for (kind, per_eye) in [
            (EyelashType::None, 0),
            (EyelashType::Short, 3),
            (EyelashType::Long, 5),
            (EyelashType::Dramatic, 7),
        ] {
            assert_eq!(eyelash_primitives(&d.face, kind).len(), per_eye * 2);
        }
    }

    #[test]
    fn test_teeth_variants() {
        let d = dims();
        assert!(teeth_primitives(&d.head, &d.face, TeethType::None).is_empty());
        let gold = teeth_primitives(&d.head, &d.face, TeethType::Gold);
        assert_eq!(gold[0].material, MaterialRef::Gold);
        let vampire = teeth_primitives(&d.head, &d.face, TeethType::Vampire);
        assert!(names(&vampire).contains(&"left_fang"));
        let braces = teeth_primitives(&d.head, &d.face, TeethType::Braces);
        assert!(braces.iter().any(|p| p.material == MaterialRef::Metal));
    }

    #[test]
    fn test_all_face_primitives_are_valid() {
        let d = dims();
        let features = FaceFeatures {
            eye: EyeType::Hooded,
            teeth: TeethType::Braces,
            eyebrow: EyebrowType::Arched,
            eyelash: EyelashType::Dramatic,
        };
        for p in face_primitives(&d, &features) {
            assert!(p.is_valid(), "{} is invalid", p.name);
        }
    }
}
