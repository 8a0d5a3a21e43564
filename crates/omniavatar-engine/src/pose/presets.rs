//! Static pose lookup table.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use omniavatar_spec::PosePreset;

use super::JointRotations;

/// Fixed joint rotations for a static pose.
pub trait PoseTable {
    fn rotations(&self) -> JointRotations;
}

impl PoseTable for PosePreset {
    fn rotations(&self) -> JointRotations {
        let rest = JointRotations::REST;
        match self {
            PosePreset::Tpose => JointRotations::tpose(),
            PosePreset::Apose => JointRotations {
                left_arm: [0.0, 0.0, FRAC_PI_4],
                right_arm: [0.0, 0.0, -FRAC_PI_4],
                ..rest
            },
            PosePreset::Relaxed => JointRotations {
                head: [0.05, 0.0, 0.0],
                left_arm: [0.05, 0.0, 0.08],
                right_arm: [0.05, 0.0, -0.08],
                left_leg: [0.0, 0.0, 0.03],
                right_leg: [0.0, 0.0, -0.03],
                ..rest
            },
            PosePreset::ArmsCrossed => JointRotations {
                left_arm: [-1.3, 0.0, -0.6],
                right_arm: [-1.2, 0.0, 0.6],
                ..rest
            },
            PosePreset::HandsHips => JointRotations {
                left_arm: [0.2, 0.0, 0.6],
                right_arm: [0.2, 0.0, -0.6],
                left_leg: [0.0, 0.0, 0.08],
                right_leg: [0.0, 0.0, -0.08],
                ..rest
            },
            PosePreset::Walking => JointRotations {
                torso: [0.0, 0.05, 0.0],
                left_arm: [0.35, 0.0, 0.08],
                right_arm: [-0.35, 0.0, -0.08],
                left_leg: [-0.4, 0.0, 0.0],
                right_leg: [0.3, 0.0, 0.0],
                ..rest
            },
            PosePreset::Running => JointRotations {
                torso: [0.2, 0.0, 0.0],
                left_arm: [0.9, 0.0, 0.15],
                right_arm: [-0.9, 0.0, -0.15],
                left_leg: [-0.9, 0.0, 0.0],
                right_leg: [0.7, 0.0, 0.0],
                ..rest
            },
            PosePreset::Sitting => JointRotations {
                left_arm: [-0.3, 0.0, 0.05],
                right_arm: [-0.3, 0.0, -0.05],
                left_leg: [-FRAC_PI_2, 0.0, 0.0],
                right_leg: [-FRAC_PI_2, 0.0, 0.0],
                ..rest
            },
            PosePreset::Waving => JointRotations {
                head: [0.0, 0.0, 0.08],
                left_arm: [0.0, 0.0, 0.1],
                right_arm: [0.0, 0.0, -2.6],
                ..rest
            },
            PosePreset::Thinking => JointRotations {
                head: [0.2, 0.0, 0.1],
                left_arm: [-0.6, 0.0, -0.4],
                right_arm: [-2.3, 0.0, 0.4],
                ..rest
            },
            PosePreset::Pointing => JointRotations {
                head: [0.0, -0.1, 0.0],
                left_arm: [0.0, 0.0, 0.08],
                right_arm: [-FRAC_PI_2, 0.0, 0.0],
                ..rest
            },
            PosePreset::Presenting => JointRotations {
                torso: [0.0, 0.15, 0.0],
                left_arm: [0.0, 0.0, 0.1],
                right_arm: [-0.6, 0.0, -0.9],
                ..rest
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_is_finite() {
        for pose in PosePreset::ALL {
            assert!(pose.rotations().is_finite(), "{}", pose.id());
        }
    }

    #[test]
    fn test_sitting_legs_point_forward() {
        let r = PosePreset::Sitting.rotations();
        assert_eq!(r.left_leg[0], -FRAC_PI_2);
        assert_eq!(r.right_leg[0], -FRAC_PI_2);
    }

    #[test]
    fn test_apose_is_between_rest_and_tpose() {
        let a = PosePreset::Apose.rotations();
        let t = PosePreset::Tpose.rotations();
        assert!(a.left_arm[2] > 0.0 && a.left_arm[2] < t.left_arm[2]);
        assert!(a.right_arm[2] < 0.0 && a.right_arm[2] > t.right_arm[2]);
    }
}
