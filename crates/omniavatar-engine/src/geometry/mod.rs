//! Body geometry: a tree of named body-part nodes holding primitive shapes.
//!
//! The tree is a plain data contract between the engine and whatever draws
//! it. Each [`Node`] carries a rest transform relative to its parent plus an
//! optional [`Joint`] whose rotation the pose engine drives.

mod body;
mod face;
mod primitive;

use serde::{Deserialize, Serialize};

use crate::math::{self, Aabb, Transform, Vec3};

pub use body::assemble_body;
pub use face::{
    eye_primitives, eyebrow_primitives, eyelash_count, eyelash_primitives, face_primitives,
    teeth_primitives,
};
pub use primitive::{linear_part, MaterialRef, Primitive, Shape};

/// Named body segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Hips,
    Waist,
    Chest,
    Neck,
    Head,
    LeftUpperArm,
    LeftForearm,
    LeftHand,
    RightUpperArm,
    RightForearm,
    RightHand,
    LeftThigh,
    LeftCalf,
    LeftFoot,
    RightThigh,
    RightCalf,
    RightFoot,
}

impl BodyPart {
    pub fn name(&self) -> &'static str {
        match self {
            BodyPart::Hips => "hips",
            BodyPart::Waist => "waist",
            BodyPart::Chest => "chest",
            BodyPart::Neck => "neck",
            BodyPart::Head => "head",
            BodyPart::LeftUpperArm => "left_upper_arm",
            BodyPart::LeftForearm => "left_forearm",
            BodyPart::LeftHand => "left_hand",
            BodyPart::RightUpperArm => "right_upper_arm",
            BodyPart::RightForearm => "right_forearm",
            BodyPart::RightHand => "right_hand",
            BodyPart::LeftThigh => "left_thigh",
            BodyPart::LeftCalf => "left_calf",
            BodyPart::LeftFoot => "left_foot",
            BodyPart::RightThigh => "right_thigh",
            BodyPart::RightCalf => "right_calf",
            BodyPart::RightFoot => "right_foot",
        }
    }
}

/// Joints driven by the pose engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Torso,
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Joint {
    pub fn name(&self) -> &'static str {
        match self {
            Joint::Torso => "torso",
            Joint::Head => "head",
            Joint::LeftArm => "left_arm",
            Joint::RightArm => "right_arm",
            Joint::LeftLeg => "left_leg",
            Joint::RightLeg => "right_leg",
        }
    }
}

/// A body-part node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub part: BodyPart,
    pub joint: Option<Joint>,
    /// Offset from the parent node.
    pub translation: Vec3,
    /// XYZ Euler rotation in radians, applied at `translation`.
    pub rotation: Vec3,
    pub primitives: Vec<Primitive>,
    pub children: Vec<Node>,
}

/// A primitive resolved into world space.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldPrimitive {
    pub part: BodyPart,
    pub primitive: Primitive,
    /// World transform of the primitive (scale excluded).
    pub transform: Transform,
    pub bounds: Aabb,
}

impl Node {
    pub fn new(part: BodyPart, translation: Vec3) -> Self {
        Self {
            part,
            joint: None,
            translation,
            rotation: math::ZERO,
            primitives: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_joint(mut self, joint: Joint) -> Self {
        self.joint = Some(joint);
        self
    }

    pub fn with_primitives(mut self, primitives: Vec<Primitive>) -> Self {
        self.primitives = primitives;
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    fn local_transform(&self) -> Transform {
        Transform::new(self.translation, self.rotation)
    }

    /// Depth-first search for a part.
    pub fn find(&self, part: BodyPart) -> Option<&Node> {
        if self.part == part {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(part))
    }

    pub fn find_mut(&mut self, part: BodyPart) -> Option<&mut Node> {
        if self.part == part {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(part))
    }

    /// Appends primitives to a part. Returns false if the part is missing.
    pub fn attach(&mut self, part: BodyPart, primitives: Vec<Primitive>) -> bool {
        match self.find_mut(part) {
            Some(node) => {
                node.primitives.extend(primitives);
                true
            }
            None => false,
        }
    }

    /// Sets the rotation of every node bound to `joint`.
    pub fn set_joint_rotation(&mut self, joint: Joint, rotation: Vec3) {
        if self.joint == Some(joint) {
            self.rotation = rotation;
        }
        for child in &mut self.children {
            child.set_joint_rotation(joint, rotation);
        }
    }

    /// Total primitives in this subtree.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
            + self
                .children
                .iter()
                .map(Node::primitive_count)
                .sum::<usize>()
    }

    /// Visits every node depth-first with its world transform.
    pub fn walk<F: FnMut(&Node, &Transform)>(&self, f: &mut F) {
        self.walk_from(&Transform::IDENTITY, f);
    }

    fn walk_from<F: FnMut(&Node, &Transform)>(&self, parent: &Transform, f: &mut F) {
        let world = parent.then(&self.local_transform());
        f(self, &world);
        for child in &self.children {
            child.walk_from(&world, f);
        }
    }

    /// Resolves every primitive into world space, depth-first.
    pub fn flatten(&self) -> Vec<WorldPrimitive> {
        let mut out = Vec::with_capacity(self.primitive_count());
        self.walk(&mut |node, world| {
            for p in &node.primitives {
                out.push(WorldPrimitive {
                    part: node.part,
                    primitive: p.clone(),
                    transform: world.then(&p.local_transform()),
                    bounds: p.bounds_in(world),
                });
            }
        });
        out
    }

    /// World transform of a part's node origin.
    pub fn world_transform_of(&self, part: BodyPart) -> Option<Transform> {
        let mut found = None;
        self.walk(&mut |node, world| {
            if node.part == part && found.is_none() {
                found = Some(*world);
            }
        });
        found
    }

    /// World-space bounds of every primitive in the subtree.
    pub fn bounds(&self) -> Aabb {
        self.flatten()
            .iter()
            .fold(Aabb::EMPTY, |acc, p| acc.union(&p.bounds))
    }

    /// Names of primitives on one part.
    pub fn primitive_names(&self, part: BodyPart) -> Vec<&str> {
        self.find(part)
            .map(|n| n.primitives.iter().map(|p| p.name.as_str()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_tree() -> Node {
        Node::new(BodyPart::Hips, [0.0, 1.0, 0.0])
            .with_primitives(vec![Primitive::new(
                "hips",
                Shape::sphere(0.1),
                MaterialRef::Skin,
            )])
            .with_child(
                Node::new(BodyPart::LeftThigh, [0.1, 0.0, 0.0])
                    .with_joint(Joint::LeftLeg)
                    .with_primitives(vec![Primitive::new(
                        "left_thigh",
                        Shape::capsule(0.05, 0.3),
                        MaterialRef::Skin,
                    )
                    .at([0.0, -0.2, 0.0])]),
            )
    }

    #[test]
    fn test_flatten_resolves_world_positions() {
        let tree = tiny_tree();
        let flat = tree.flatten();
        assert_eq!(flat.len(), 2);
        let thigh = &flat[1];
        assert_eq!(thigh.part, BodyPart::LeftThigh);
        assert!((thigh.transform.translation[0] - 0.1).abs() < 1e-12);
        assert!((thigh.transform.translation[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_joint_rotation_moves_children() {
        let mut tree = tiny_tree();
        tree.set_joint_rotation(Joint::LeftLeg, [-std::f64::consts::FRAC_PI_2, 0.0, 0.0]);
        let thigh = &tree.flatten()[1];
        // The thigh now points forward (+Z).
        assert!((thigh.transform.translation[2] - 0.2).abs() < 1e-9);
        assert!((thigh.transform.translation[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_find_attach_and_count() {
        let mut tree = tiny_tree();
        assert!(tree.find(BodyPart::LeftThigh).is_some());
        assert!(tree.find(BodyPart::Head).is_none());
        assert!(tree.attach(
            BodyPart::LeftThigh,
            vec![Primitive::new("pad", Shape::sphere(0.02), MaterialRef::Metal)]
        ));
        assert!(!tree.attach(BodyPart::Head, Vec::new()));
        assert_eq!(tree.primitive_count(), 3);
        assert_eq!(tree.primitive_names(BodyPart::LeftThigh), vec!["left_thigh", "pad"]);
    }
}
