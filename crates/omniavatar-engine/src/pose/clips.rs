//! Procedural animation clips.
//!
//! A clip is a closed-form function of its phase `φ = 2π · (t mod period) /
//! period`. Every term is a sine or cosine of an integer multiple of `φ`, so
//! `sample(0) == sample(period)` up to rounding.

use std::f64::consts::{FRAC_PI_2, TAU};

use omniavatar_spec::AnimationClip;

use super::JointRotations;

/// Samples a clip at a time in seconds.
pub trait ClipSampler {
    fn sample(&self, t: f64) -> JointRotations;
}

impl ClipSampler for AnimationClip {
    fn sample(&self, t: f64) -> JointRotations {
        let t = if t.is_finite() { t } else { 0.0 };
        let phase = TAU * t.rem_euclid(self.period()) / self.period();
        sample_phase(*self, phase).sanitized()
    }
}

fn sample_phase(clip: AnimationClip, phi: f64) -> JointRotations {
    let s = |k: f64| (k * phi).sin();
    let c = |k: f64| (k * phi).cos();
    // Arms hanging slightly away from the body.
    let base = JointRotations {
        left_arm: [0.0, 0.0, 0.08],
        right_arm: [0.0, 0.0, -0.08],
        ..JointRotations::REST
    };
    match clip {
        AnimationClip::Idle => JointRotations {
            head: [0.03 * s(1.0), 0.05 * s(1.0), 0.0],
            torso: [0.02 * s(1.0), 0.0, 0.0],
            left_arm: [0.0, 0.0, 0.08 + 0.02 * s(1.0)],
            right_arm: [0.0, 0.0, -0.08 - 0.02 * s(1.0)],
            ..base
        },
        AnimationClip::Walk => JointRotations {
            head: [0.02 * s(2.0), 0.0, 0.0],
            torso: [0.0, 0.05 * s(1.0), 0.0],
            left_arm: [-0.35 * s(1.0), 0.0, 0.08],
            right_arm: [0.35 * s(1.0), 0.0, -0.08],
            left_leg: [0.45 * s(1.0), 0.0, 0.0],
            right_leg: [-0.45 * s(1.0), 0.0, 0.0],
        },
        AnimationClip::Run => JointRotations {
            head: [0.04 * s(2.0), 0.0, 0.0],
            torso: [0.2 + 0.03 * s(2.0), 0.08 * s(1.0), 0.0],
            left_arm: [-0.8 * s(1.0), 0.0, 0.15],
            right_arm: [0.8 * s(1.0), 0.0, -0.15],
            left_leg: [0.9 * s(1.0), 0.0, 0.0],
            right_leg: [-0.9 * s(1.0), 0.0, 0.0],
        },
        AnimationClip::Jump => {
            // 0 at the start of the loop, 1 at the top of the jump.
            let lift = (1.0 - c(1.0)) / 2.0;
            JointRotations {
                torso: [0.15 * (1.0 - lift), 0.0, 0.0],
                left_arm: [0.0, 0.0, 0.3 + 1.2 * lift],
                right_arm: [0.0, 0.0, -0.3 - 1.2 * lift],
                left_leg: [-0.4 * (1.0 - lift), 0.0, 0.0],
                right_leg: [-0.4 * (1.0 - lift), 0.0, 0.0],
                ..base
            }
        }
        AnimationClip::Wave => JointRotations {
            head: [0.0, 0.0, 0.05 * s(1.0)],
            right_arm: [0.0, 0.0, -2.6 + 0.35 * s(1.0)],
            ..base
        },
        AnimationClip::Dance => JointRotations {
            head: [0.0, 0.0, 0.15 * s(1.0)],
            torso: [0.0, 0.3 * s(1.0), 0.05 * s(2.0)],
            left_arm: [0.3 * s(1.0), 0.0, 0.9 + 0.4 * s(2.0)],
            right_arm: [-0.3 * s(1.0), 0.0, -0.9 - 0.4 * s(2.0)],
            left_leg: [0.25 * s(2.0), 0.0, 0.0],
            right_leg: [-0.25 * s(2.0), 0.0, 0.0],
        },
        AnimationClip::Clap => {
            // Arms forward; the roll closes the hands once per loop.
            let open = (1.0 + c(1.0)) / 2.0;
            JointRotations {
                left_arm: [-1.2, 0.0, 0.05 + 0.5 * open],
                right_arm: [-1.2, 0.0, -0.05 - 0.5 * open],
                ..base
            }
        }
        AnimationClip::Nod => JointRotations {
            head: [0.25 * s(1.0), 0.0, 0.0],
            ..base
        },
        AnimationClip::ShakeHead => JointRotations {
            head: [0.0, 0.45 * s(1.0), 0.0],
            ..base
        },
        AnimationClip::Talk => JointRotations {
            head: [0.04 * s(2.0), 0.06 * s(1.0), 0.0],
            torso: [0.0, 0.03 * s(1.0), 0.0],
            right_arm: [-0.4 - 0.2 * s(1.0), 0.0, -0.15],
            left_arm: [0.0, 0.0, 0.08 + 0.03 * s(3.0)],
            ..base
        },
    }
    .clamped()
}

impl JointRotations {
    /// Keeps every angle within one turn of zero.
    fn clamped(self) -> Self {
        let wrap = |r: [f64; 3]| r.map(|v| v.clamp(-TAU, TAU));
        JointRotations {
            head: wrap(self.head),
            torso: wrap(self.torso),
            left_arm: wrap(self.left_arm),
            right_arm: wrap(self.right_arm),
            left_leg: wrap(self.left_leg),
            right_leg: wrap(self.right_leg),
        }
    }
}
