//! Pose presets, animation clips, and the pose state machine.
//!
//! Everything here produces a [`JointRotations`] record: one XYZ Euler triple
//! per driven joint. Arms hang along -Y at zero rotation, so a positive roll
//! (z) lifts the left arm sideways and a negative roll lifts the right one.

mod clips;
mod engine;
mod presets;

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geometry::{Joint, Node};
use crate::math::{self, Vec3};

pub use clips::ClipSampler;
pub use engine::{PoseEngine, PoseError, PoseMode};
pub use presets::PoseTable;

/// Rotation of every driven joint, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointRotations {
    pub head: Vec3,
    pub torso: Vec3,
    pub left_arm: Vec3,
    pub right_arm: Vec3,
    pub left_leg: Vec3,
    pub right_leg: Vec3,
}

impl Default for JointRotations {
    fn default() -> Self {
        Self::tpose()
    }
}

impl JointRotations {
    /// All joints at rest: arms hanging, legs straight.
    pub const REST: JointRotations = JointRotations {
        head: math::ZERO,
        torso: math::ZERO,
        left_arm: math::ZERO,
        right_arm: math::ZERO,
        left_leg: math::ZERO,
        right_leg: math::ZERO,
    };

    /// Arms horizontal, everything else at rest.
    pub fn tpose() -> Self {
        Self {
            left_arm: [0.0, 0.0, FRAC_PI_2],
            right_arm: [0.0, 0.0, -FRAC_PI_2],
            ..Self::REST
        }
    }

    pub fn get(&self, joint: Joint) -> Vec3 {
        match joint {
            Joint::Head => self.head,
            Joint::Torso => self.torso,
            Joint::LeftArm => self.left_arm,
            Joint::RightArm => self.right_arm,
            Joint::LeftLeg => self.left_leg,
            Joint::RightLeg => self.right_leg,
        }
    }

    pub fn set(&mut self, joint: Joint, rotation: Vec3) {
        let slot = match joint {
            Joint::Head => &mut self.head,
            Joint::Torso => &mut self.torso,
            Joint::LeftArm => &mut self.left_arm,
            Joint::RightArm => &mut self.right_arm,
            Joint::LeftLeg => &mut self.left_leg,
            Joint::RightLeg => &mut self.right_leg,
        };
        *slot = rotation;
    }

    /// Joints paired with their rotations, in a fixed order.
    pub fn entries(&self) -> [(Joint, Vec3); 6] {
        [
            (Joint::Head, self.head),
            (Joint::Torso, self.torso),
            (Joint::LeftArm, self.left_arm),
            (Joint::RightArm, self.right_arm),
            (Joint::LeftLeg, self.left_leg),
            (Joint::RightLeg, self.right_leg),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.entries()
            .iter()
            .all(|(_, r)| r.iter().all(|v| v.is_finite()))
    }

    /// Replaces every non-finite joint with its T-pose value.
    pub fn sanitized(self) -> Self {
        if self.is_finite() {
            return self;
        }
        let fallback = Self::tpose();
        let mut out = self;
        for (joint, rotation) in self.entries() {
            if !rotation.iter().all(|v| v.is_finite()) {
                warn!("non-finite rotation on {:?}, using T-pose value", joint);
                out.set(joint, fallback.get(joint));
            }
        }
        out
    }

    /// Writes every rotation onto the matching joint nodes of a body tree.
    pub fn apply_to(&self, root: &mut Node) {
        for (joint, rotation) in self.entries() {
            root.set_joint_rotation(joint, rotation);
        }
    }

    /// Largest absolute per-component difference to another record.
    pub fn max_difference(&self, other: &JointRotations) -> f64 {
        self.entries()
            .iter()
            .zip(other.entries().iter())
            .flat_map(|((_, a), (_, b))| (0..3).map(move |i| (a[i] - b[i]).abs()))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tpose_arms_are_horizontal() {
        let t = JointRotations::tpose();
        assert_eq!(t.left_arm, [0.0, 0.0, FRAC_PI_2]);
        assert_eq!(t.right_arm, [0.0, 0.0, -FRAC_PI_2]);
        assert_eq!(t.left_leg, math::ZERO);
        assert_eq!(t.right_leg, math::ZERO);
    }

    #[test]
    fn test_sanitized_replaces_only_bad_joints() {
        let mut r = JointRotations::REST;
        r.head = [0.1, 0.0, 0.0];
        r.left_arm = [f64::NAN, 0.0, 0.0];
        let s = r.sanitized();
        assert!(s.is_finite());
        assert_eq!(s.head, [0.1, 0.0, 0.0]);
        assert_eq!(s.left_arm, [0.0, 0.0, FRAC_PI_2]);
    }

    #[test]
    fn test_max_difference() {
        let a = JointRotations::tpose();
        let mut b = a;
        b.torso = [0.0, 0.25, 0.0];
        assert!((a.max_difference(&b) - 0.25).abs() < 1e-12);
    }
}
