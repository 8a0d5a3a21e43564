//! Body assembly.
//!
//! Builds the node tree from a dimension record. The hips node sits at the
//! hip joint; every other node is offset from its parent so that adjacent
//! segments overlap at neutral values, the feet rest on `y = 0`, and the top
//! of the head reaches the avatar's height.

use std::f64::consts::FRAC_PI_2;

use omniavatar_spec::FaceFeatures;

use super::face::face_primitives;
use super::primitive::{MaterialRef, Primitive, Shape};
use super::{BodyPart, Joint, Node};
use crate::dimensions::{ArmDimensions, BodyDimensions, LegDimensions};

/// Which side of the body a limb hangs on. Left is +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn sign(self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Assembles the full body tree, face included.
pub fn assemble_body(dims: &BodyDimensions, features: &FaceFeatures) -> Node {
    let torso = &dims.torso;

    let hips = Node::new(BodyPart::Hips, [0.0, dims.hip_joint_y(), 0.0])
        .with_primitives(vec![
            Primitive::new("hips", Shape::sphere(1.0), MaterialRef::Skin)
                .at([0.0, torso.hip_section * 0.35, 0.0])
                .scaled([torso.hip_width / 2.0, torso.hip_section * 0.7, torso.hip_depth / 2.0]),
            Primitive::new("glutes", Shape::sphere(1.0), MaterialRef::Skin)
                .at([0.0, torso.hip_section * 0.2, -torso.hip_depth * 0.3])
                .scaled([torso.hip_width * 0.4, torso.glute_radius, torso.glute_radius]),
        ]);

    let waist = Node::new(BodyPart::Waist, [0.0, torso.hip_section, 0.0])
        .with_joint(Joint::Torso)
        .with_primitives(vec![Primitive::new("waist", Shape::sphere(1.0), MaterialRef::Skin)
            .at([0.0, torso.waist_section * 0.5, 0.0])
            .scaled([
                torso.waist_width / 2.0,
                torso.waist_section * 0.75,
                torso.waist_depth / 2.0,
            ])]);

    let shoulder_y = torso.chest_section - torso.shoulder_drop;
    let shoulder_radius = dims.arms.upper_radius * 1.1;
    let mut chest_prims = vec![
        Primitive::new("chest", Shape::sphere(1.0), MaterialRef::Skin)
            .at([0.0, torso.chest_section * 0.5, 0.0])
            .rotated([torso.back_curvature, 0.0, 0.0])
            .scaled([
                torso.chest_width / 2.0,
                torso.chest_section * 0.6,
                torso.chest_depth / 2.0,
            ]),
        Primitive::new(
            "shoulders",
            Shape::capsule(
                shoulder_radius,
                (torso.shoulder_width - 2.0 * shoulder_radius).max(0.01),
            ),
            MaterialRef::Skin,
        )
        .at([0.0, shoulder_y, 0.0])
        .rotated([0.0, 0.0, FRAC_PI_2]),
    ];
    for side in [Side::Left, Side::Right] {
        chest_prims.push(
            Primitive::new(
                format!("{}_bust", side.label()),
                Shape::sphere(torso.bust_radius),
                MaterialRef::Skin,
            )
            .at([
                side.sign() * torso.chest_width * 0.2,
                torso.chest_section * 0.55,
                torso.chest_depth / 2.0 - torso.bust_radius * 0.5,
            ]),
        );
    }

    let neck = Node::new(BodyPart::Neck, [0.0, torso.chest_section, 0.0]).with_primitives(vec![
        Primitive::new(
            "neck",
            Shape::cylinder(torso.neck_radius * 0.95, torso.neck_radius, torso.neck_length * 1.3),
            MaterialRef::Skin,
        )
        .at([0.0, torso.neck_length / 2.0, 0.0]),
    ]);

    let head = head_node(dims, features);

    let mut chest = Node::new(BodyPart::Chest, [0.0, torso.waist_section, 0.0])
        .with_primitives(chest_prims)
        .with_child(neck.with_child(head));
    let shoulder_x = torso.shoulder_width / 2.0 - dims.arms.upper_radius;
    for side in [Side::Left, Side::Right] {
        chest = chest.with_child(arm_chain(&dims.arms, side, [side.sign() * shoulder_x, shoulder_y, 0.0]));
    }

    let mut hips = hips.with_child(waist.with_child(chest));
    for side in [Side::Left, Side::Right] {
        hips = hips.with_child(leg_chain(&dims.legs, side));
    }
    hips
}

/// Head node, origin at the head center.
fn head_node(dims: &BodyDimensions, features: &FaceFeatures) -> Node {
    let head = &dims.head;
    let mut prims = vec![
        Primitive::new("head", Shape::sphere(1.0), MaterialRef::Skin)
            .scaled([head.width, head.height, head.depth]),
        Primitive::new("jaw", Shape::sphere(1.0), MaterialRef::Skin)
            .at([0.0, -head.height * 0.45, head.depth * 0.1])
            .rotated([head.jaw_angle, 0.0, 0.0])
            .scaled([head.jaw_width, head.jaw_height * 0.6, head.depth * 0.8]),
        Primitive::new("chin", Shape::sphere(1.0), MaterialRef::Skin)
            .at([
                0.0,
                -head.height * 0.8,
                head.depth * 0.5 + head.chin_protrusion,
            ])
            .scaled([head.chin_width / 2.0, head.chin_height, head.chin_width / 2.0]),
        Primitive::new("forehead", Shape::sphere(1.0), MaterialRef::Skin)
            .at([
                0.0,
                head.height * 0.35,
                head.depth * 0.45 + head.forehead_protrusion,
            ])
            .scaled([head.forehead_width * 0.85, head.forehead_height, head.depth * 0.5]),
    ];
    prims.extend(face_primitives(dims, features));
    Node::new(
        BodyPart::Head,
        [0.0, dims.torso.neck_length + head.height, 0.0],
    )
    .with_joint(Joint::Head)
    .with_primitives(prims)
}

fn arm_chain(arms: &ArmDimensions, side: Side, shoulder: [f64; 3]) -> Node {
    let (upper, forearm, hand, joint) = match side {
        Side::Left => (
            BodyPart::LeftUpperArm,
            BodyPart::LeftForearm,
            BodyPart::LeftHand,
            Joint::LeftArm,
        ),
        Side::Right => (
            BodyPart::RightUpperArm,
            BodyPart::RightForearm,
            BodyPart::RightHand,
            Joint::RightArm,
        ),
    };
    let label = side.label();

    let hand = Node::new(hand, [0.0, -arms.forearm_length, 0.0]).with_primitives(vec![
        Primitive::new(
            format!("{}_hand", label),
            Shape::cuboid(arms.hand_thickness, arms.hand_length, arms.hand_width),
            MaterialRef::Skin,
        )
        .at([0.0, -arms.hand_length / 2.0, 0.0]),
    ]);

    let forearm = Node::new(forearm, [0.0, -arms.upper_length, 0.0])
        .with_primitives(vec![
            Primitive::new(
                format!("{}_forearm", label),
                Shape::capsule(arms.forearm_radius, arms.forearm_length),
                MaterialRef::Skin,
            )
            .at([0.0, -arms.forearm_length / 2.0, 0.0]),
            Primitive::new(
                format!("{}_wrist", label),
                Shape::sphere(arms.wrist_radius),
                MaterialRef::Skin,
            )
            .at([0.0, -arms.forearm_length, 0.0]),
        ])
        .with_child(hand);

    Node::new(upper, shoulder)
        .with_joint(joint)
        .with_primitives(vec![Primitive::new(
            format!("{}_bicep", label),
            Shape::capsule(arms.upper_radius, arms.upper_length),
            MaterialRef::Skin,
        )
        .at([0.0, -arms.upper_length / 2.0, 0.0])])
        .with_child(forearm)
}

fn leg_chain(legs: &LegDimensions, side: Side) -> Node {
    let (thigh, calf, foot, joint) = match side {
        Side::Left => (
            BodyPart::LeftThigh,
            BodyPart::LeftCalf,
            BodyPart::LeftFoot,
            Joint::LeftLeg,
        ),
        Side::Right => (
            BodyPart::RightThigh,
            BodyPart::RightCalf,
            BodyPart::RightFoot,
            Joint::RightLeg,
        ),
    };
    let label = side.label();

    // Foot origin is the ankle, which sits `foot_height` above the ground.
    let foot = Node::new(foot, [0.0, -legs.calf_length, 0.0]).with_primitives(vec![
        Primitive::new(
            format!("{}_foot", label),
            Shape::cuboid(legs.foot_width, legs.foot_height, legs.foot_length),
            MaterialRef::Skin,
        )
        .at([0.0, -legs.foot_height / 2.0, legs.foot_length * 0.3]),
    ]);

    let calf = Node::new(calf, [0.0, -legs.thigh_length, 0.0])
        .with_primitives(vec![
            Primitive::new(
                format!("{}_calf", label),
                Shape::cylinder(legs.calf_radius, legs.ankle_radius, legs.calf_length),
                MaterialRef::Skin,
            )
            .at([0.0, -legs.calf_length / 2.0, 0.0]),
            Primitive::new(
                format!("{}_ankle", label),
                Shape::sphere(legs.ankle_radius),
                MaterialRef::Skin,
            )
            .at([0.0, -legs.calf_length, 0.0]),
        ])
        .with_child(foot);

    Node::new(thigh, [side.sign() * legs.hip_joint_offset, 0.0, 0.0])
        .with_joint(joint)
        .with_primitives(vec![
            Primitive::new(
                format!("{}_thigh", label),
                Shape::capsule(legs.thigh_radius, legs.thigh_length),
                MaterialRef::Skin,
            )
            .at([0.0, -legs.thigh_length / 2.0, 0.0]),
            Primitive::new(
                format!("{}_knee", label),
                Shape::sphere(legs.knee_radius),
                MaterialRef::Skin,
            )
            .at([0.0, -legs.thigh_length, 0.0]),
        ])
        .with_child(calf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::compute_dimensions;
    use omniavatar_spec::AvatarProfile;

    fn body_for(profile: &AvatarProfile) -> (BodyDimensions, Node) {
        let dims = compute_dimensions(profile);
        let body = assemble_body(&dims, &profile.features);
        (dims, body)
    }

    #[test]
    fn test_feet_on_ground_and_head_at_height() {
        let (dims, body) = body_for(&AvatarProfile::default());
        let bounds = body.bounds();
        assert!(bounds.min[1].abs() < 1e-9, "lowest point {}", bounds.min[1]);
        assert!((bounds.max[1] - dims.height).abs() < 1e-9, "top {}", bounds.max[1]);
    }

    #[test]
    fn test_tall_profile_is_taller() {
        let mut tall = AvatarProfile::default();
        tall.macro_morphs.height = 100.0;
        let (_, short_body) = body_for(&AvatarProfile::default());
        let (_, tall_body) = body_for(&tall);
        assert!(tall_body.bounds().max[1] > short_body.bounds().max[1]);
    }

    #[test]
    fn test_every_primitive_is_valid() {
        for value in [0.0, 50.0, 100.0] {
            let mut profile = AvatarProfile::default();
            for (group, name, _) in profile.all_morphs() {
                profile
                    .set_morph(group, name, value)
                    .expect("known morph");
            }
            let (_, body) = body_for(&profile);
            for p in body.flatten() {
                assert!(p.primitive.is_valid(), "{} invalid at {}", p.primitive.name, value);
            }
        }
    }

    #[test]
    fn test_limb_segments_touch() {
        let (_, body) = body_for(&AvatarProfile::default());
        let flat = body.flatten();
        let part_bounds = |part: BodyPart| {
            flat.iter()
                .filter(|p| p.part == part)
                .fold(crate::math::Aabb::EMPTY, |acc, p| acc.union(&p.bounds))
        };
        let chains = [
            (BodyPart::Chest, BodyPart::LeftUpperArm),
            (BodyPart::LeftUpperArm, BodyPart::LeftForearm),
            (BodyPart::LeftForearm, BodyPart::LeftHand),
            (BodyPart::Hips, BodyPart::RightThigh),
            (BodyPart::RightThigh, BodyPart::RightCalf),
            (BodyPart::RightCalf, BodyPart::RightFoot),
            (BodyPart::Hips, BodyPart::Waist),
            (BodyPart::Waist, BodyPart::Chest),
            (BodyPart::Chest, BodyPart::Neck),
            (BodyPart::Neck, BodyPart::Head),
        ];
        for (parent, child) in chains {
            assert!(
                part_bounds(parent).touches(&part_bounds(child), 1e-6),
                "{} and {} are disconnected",
                parent.name(),
                child.name()
            );
        }
    }

    #[test]
    fn test_joints_present() {
        let (_, body) = body_for(&AvatarProfile::default());
        let mut joints = Vec::new();
        body.walk(&mut |node, _| {
            if let Some(j) = node.joint {
                joints.push(j);
            }
        });
        assert_eq!(joints.len(), 6);
    }
}
