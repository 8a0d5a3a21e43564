//! Body dimension calculation.
//!
//! Turns the normalized sliders of a profile into a metric dimension record.
//! Every slider is read through [`unit`], which maps `[0, 100]` to
//! `[-0.5, 0.5]`. Each dimension is a base value plus slider contributions,
//! and every base exceeds the sum of its coefficient magnitudes times 0.5, so
//! lengths and radii stay strictly positive for any input.

use omniavatar_spec::{AvatarProfile, MacroMorphs};
use serde::{Deserialize, Serialize};

/// Reference stature in meters; proportions are authored at this height.
pub const REFERENCE_HEIGHT: f64 = 1.70;

/// Maps a slider to `[-0.5, 0.5]`. Out-of-range values clamp, NaN reads as neutral.
#[inline]
pub fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0) / 100.0 - 0.5
    }
}

/// Maps a slider to `[0, 1]`. NaN reads as neutral.
#[inline]
fn fraction(v: f64) -> f64 {
    unit(v) + 0.5
}

/// Facial proportion factors associated with one ethnicity slider.
///
/// Factors are multiplicative around 1.0, except `eye_tilt` which is an
/// additive angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EthnicPreset {
    pub nose_width: f64,
    pub nose_length: f64,
    pub lip_fullness: f64,
    pub eye_aperture: f64,
    pub eye_tilt: f64,
    pub brow_protrusion: f64,
}

impl EthnicPreset {
    fn weighted_sum(parts: [(f64, &EthnicPreset); 3]) -> EthnicPreset {
        let mix = |f: fn(&EthnicPreset) -> f64| parts.iter().map(|(w, p)| w * f(*p)).sum::<f64>();
        EthnicPreset {
            nose_width: mix(|p| p.nose_width),
            nose_length: mix(|p| p.nose_length),
            lip_fullness: mix(|p| p.lip_fullness),
            eye_aperture: mix(|p| p.eye_aperture),
            eye_tilt: mix(|p| p.eye_tilt),
            brow_protrusion: mix(|p| p.brow_protrusion),
        }
    }
}

/// The adjustable preset table the ethnicity sliders blend between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EthnicPresets {
    pub african: EthnicPreset,
    pub asian: EthnicPreset,
    pub caucasian: EthnicPreset,
}

impl Default for EthnicPresets {
    fn default() -> Self {
        Self {
            african: EthnicPreset {
                nose_width: 1.18,
                nose_length: 0.95,
                lip_fullness: 1.25,
                eye_aperture: 1.0,
                eye_tilt: 0.0,
                brow_protrusion: 1.05,
            },
            asian: EthnicPreset {
                nose_width: 1.0,
                nose_length: 0.92,
                lip_fullness: 1.0,
                eye_aperture: 0.82,
                eye_tilt: 0.08,
                brow_protrusion: 0.9,
            },
            caucasian: EthnicPreset {
                nose_width: 0.9,
                nose_length: 1.08,
                lip_fullness: 0.88,
                eye_aperture: 1.0,
                eye_tilt: 0.0,
                brow_protrusion: 1.05,
            },
        }
    }
}

/// Normalized ethnicity weights (sum to 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EthnicityBlend {
    pub african: f64,
    pub asian: f64,
    pub caucasian: f64,
}

impl EthnicityBlend {
    /// Normalizes the three sliders. All-zero input yields equal thirds.
    pub fn from_macro(m: &MacroMorphs) -> Self {
        let african = fraction(m.african);
        let asian = fraction(m.asian);
        let caucasian = fraction(m.caucasian);
        let total = african + asian + caucasian;
        if total <= f64::EPSILON {
            let third = 1.0 / 3.0;
            return Self {
                african: third,
                asian: third,
                caucasian: third,
            };
        }
        Self {
            african: african / total,
            asian: asian / total,
            caucasian: caucasian / total,
        }
    }

    /// Linear mix of the preset table.
    pub fn mix(&self, presets: &EthnicPresets) -> EthnicPreset {
        EthnicPreset::weighted_sum([
            (self.african, &presets.african),
            (self.asian, &presets.asian),
            (self.caucasian, &presets.caucasian),
        ])
    }
}

/// Skull and jaw dimensions. `width`, `height`, `depth` are semi-axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub jaw_width: f64,
    pub jaw_height: f64,
    /// Forward tilt of the jaw in radians.
    pub jaw_angle: f64,
    pub chin_width: f64,
    pub chin_height: f64,
    pub chin_protrusion: f64,
    pub forehead_height: f64,
    pub forehead_width: f64,
    pub forehead_protrusion: f64,
    pub cheekbone_width: f64,
    pub cheekbone_height: f64,
    pub cheek_radius: f64,
}

impl HeadDimensions {
    /// Largest semi-axis.
    pub fn max_radius(&self) -> f64 {
        self.width.max(self.height).max(self.depth)
    }
}

/// Facial feature dimensions in head-local space (origin at the head center).
///
/// Fields ending in `_y` / `_z` are positions; angles are in radians; all
/// other fields are lengths or radii.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDimensions {
    pub eye_radius: f64,
    /// Vertical squash of the eye opening.
    pub eye_aperture: f64,
    /// Half the distance between eye centers.
    pub eye_spacing: f64,
    pub eye_y: f64,
    pub eye_z: f64,
    pub eye_tilt: f64,
    pub brow_y: f64,
    pub brow_protrusion: f64,
    pub brow_angle: f64,
    pub nose_width: f64,
    pub nose_length: f64,
    pub nose_protrusion: f64,
    pub nose_bridge: f64,
    pub nostril_width: f64,
    pub nostril_height: f64,
    pub nose_tip: f64,
    /// Half the mouth width.
    pub mouth_width: f64,
    pub mouth_y: f64,
    pub lip_upper: f64,
    pub lip_lower: f64,
    pub mouth_protrusion: f64,
    pub ear_size: f64,
    pub ear_angle: f64,
    pub ear_y: f64,
}

/// Neck and trunk dimensions. Widths and depths are full extents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorsoDimensions {
    pub neck_length: f64,
    pub neck_radius: f64,
    /// Hip joint to neck base.
    pub length: f64,
    pub hip_section: f64,
    pub waist_section: f64,
    pub chest_section: f64,
    pub shoulder_width: f64,
    /// Distance the shoulder joint sits below the top of the chest.
    pub shoulder_drop: f64,
    pub chest_width: f64,
    pub chest_depth: f64,
    pub bust_radius: f64,
    pub waist_width: f64,
    pub waist_depth: f64,
    pub hip_width: f64,
    pub hip_depth: f64,
    pub glute_radius: f64,
    /// Forward lean of the chest in radians.
    pub back_curvature: f64,
}

/// Per-arm dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmDimensions {
    pub upper_length: f64,
    pub forearm_length: f64,
    pub upper_radius: f64,
    pub forearm_radius: f64,
    pub wrist_radius: f64,
    pub hand_length: f64,
    pub hand_width: f64,
    pub hand_thickness: f64,
}

impl ArmDimensions {
    pub fn total_length(&self) -> f64 {
        self.upper_length + self.forearm_length
    }
}

/// Per-leg dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegDimensions {
    /// Ground to hip joint.
    pub total_length: f64,
    pub thigh_length: f64,
    pub calf_length: f64,
    pub thigh_radius: f64,
    pub knee_radius: f64,
    pub calf_radius: f64,
    pub ankle_radius: f64,
    pub foot_length: f64,
    pub foot_width: f64,
    /// Ground to ankle joint.
    pub foot_height: f64,
    /// Lateral offset of each hip joint from the midline.
    pub hip_joint_offset: f64,
}

/// Complete metric description of a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDimensions {
    /// Total stature in meters.
    pub height: f64,
    /// `height / REFERENCE_HEIGHT`.
    pub scale: f64,
    pub ethnicity: EthnicityBlend,
    pub head: HeadDimensions,
    pub face: FaceDimensions,
    pub torso: TorsoDimensions,
    pub arms: ArmDimensions,
    pub legs: LegDimensions,
}

impl BodyDimensions {
    /// Every length and radius as `(name, meters)`.
    pub fn length_entries(&self) -> Vec<(&'static str, f64)> {
        let h = &self.head;
        let f = &self.face;
        let t = &self.torso;
        let a = &self.arms;
        let l = &self.legs;
        vec![
            ("height", self.height),
            ("head.width", h.width),
            ("head.height", h.height),
            ("head.depth", h.depth),
            ("head.jaw_width", h.jaw_width),
            ("head.jaw_height", h.jaw_height),
            ("head.chin_width", h.chin_width),
            ("head.chin_height", h.chin_height),
            ("head.chin_protrusion", h.chin_protrusion),
            ("head.forehead_height", h.forehead_height),
            ("head.forehead_width", h.forehead_width),
            ("head.forehead_protrusion", h.forehead_protrusion),
            ("head.cheekbone_width", h.cheekbone_width),
            ("head.cheekbone_height", h.cheekbone_height),
            ("head.cheek_radius", h.cheek_radius),
            ("face.eye_radius", f.eye_radius),
            ("face.eye_aperture", f.eye_aperture),
            ("face.eye_spacing", f.eye_spacing),
            ("face.brow_protrusion", f.brow_protrusion),
            ("face.nose_width", f.nose_width),
            ("face.nose_length", f.nose_length),
            ("face.nose_protrusion", f.nose_protrusion),
            ("face.nose_bridge", f.nose_bridge),
            ("face.nostril_width", f.nostril_width),
            ("face.nostril_height", f.nostril_height),
            ("face.nose_tip", f.nose_tip),
            ("face.mouth_width", f.mouth_width),
            ("face.lip_upper", f.lip_upper),
            ("face.lip_lower", f.lip_lower),
            ("face.mouth_protrusion", f.mouth_protrusion),
            ("face.ear_size", f.ear_size),
            ("torso.neck_length", t.neck_length),
            ("torso.neck_radius", t.neck_radius),
            ("torso.length", t.length),
            ("torso.hip_section", t.hip_section),
            ("torso.waist_section", t.waist_section),
            ("torso.chest_section", t.chest_section),
            ("torso.shoulder_width", t.shoulder_width),
            ("torso.shoulder_drop", t.shoulder_drop),
            ("torso.chest_width", t.chest_width),
            ("torso.chest_depth", t.chest_depth),
            ("torso.bust_radius", t.bust_radius),
            ("torso.waist_width", t.waist_width),
            ("torso.waist_depth", t.waist_depth),
            ("torso.hip_width", t.hip_width),
            ("torso.hip_depth", t.hip_depth),
            ("torso.glute_radius", t.glute_radius),
            ("arms.upper_length", a.upper_length),
            ("arms.forearm_length", a.forearm_length),
            ("arms.upper_radius", a.upper_radius),
            ("arms.forearm_radius", a.forearm_radius),
            ("arms.wrist_radius", a.wrist_radius),
            ("arms.hand_length", a.hand_length),
            ("arms.hand_width", a.hand_width),
            ("arms.hand_thickness", a.hand_thickness),
            ("legs.total_length", l.total_length),
            ("legs.thigh_length", l.thigh_length),
            ("legs.calf_length", l.calf_length),
            ("legs.thigh_radius", l.thigh_radius),
            ("legs.knee_radius", l.knee_radius),
            ("legs.calf_radius", l.calf_radius),
            ("legs.ankle_radius", l.ankle_radius),
            ("legs.foot_length", l.foot_length),
            ("legs.foot_width", l.foot_width),
            ("legs.foot_height", l.foot_height),
            ("legs.hip_joint_offset", l.hip_joint_offset),
        ]
    }

    /// Height of the hip joint above the ground.
    pub fn hip_joint_y(&self) -> f64 {
        self.legs.total_length
    }

    /// Height of the head center above the ground.
    pub fn head_center_y(&self) -> f64 {
        self.legs.total_length + self.torso.length + self.torso.neck_length + self.head.height
    }
}

/// Computes dimensions with the default ethnicity presets.
pub fn compute_dimensions(profile: &AvatarProfile) -> BodyDimensions {
    compute_dimensions_with(profile, &EthnicPresets::default())
}

/// Computes dimensions with a custom ethnicity preset table.
pub fn compute_dimensions_with(profile: &AvatarProfile, presets: &EthnicPresets) -> BodyDimensions {
    let m = &profile.macro_morphs;
    let male = fraction(m.gender);
    let fem = 1.0 - male;
    let age = fraction(m.age);
    let youth = (0.25 - age).max(0.0);
    let elder = (age - 0.75).max(0.0);
    let weight = unit(m.weight);
    let muscle = unit(m.muscle);
    let proportions = unit(m.proportions);

    let height = REFERENCE_HEIGHT + unit(m.height) * 0.50 + (male - 0.5) * 0.10
        - youth * 0.4
        - elder * 0.12
        + proportions * 0.04;
    let scale = height / REFERENCE_HEIGHT;
    let frame = scale.sqrt();

    let ethnicity = EthnicityBlend::from_macro(m);
    let ethnic = ethnicity.mix(presets);

    let head = head_dimensions(profile, scale, male);
    let face = face_dimensions(profile, &head, &ethnic);

    let legs_total = height * (0.47 + unit(profile.legs.leg_length) * 0.06 + proportions * 0.02);
    let neck_length = height * 0.052 * (1.0 + unit(profile.face.neck_length) * 0.4);
    let torso = torso_dimensions(
        profile,
        TorsoInputs {
            length: height - legs_total - neck_length - 2.0 * head.height,
            neck_length,
            frame,
            male,
            weight,
            muscle,
        },
    );

    let a = &profile.arms;
    let arm_total = height * (0.36 + unit(a.arm_length) * 0.05);
    let hand_length =
        height * (0.105 + unit(a.hand_size) * 0.02) * (1.0 + unit(a.finger_length) * 0.1);
    let arms = ArmDimensions {
        upper_length: arm_total * 0.54,
        forearm_length: arm_total * 0.46,
        upper_radius: 0.042
            * frame
            * (1.0
                + unit(a.upper_arm_width) * 0.3
                + unit(a.bicep_size) * 0.2
                + unit(a.tricep_size) * 0.1
                + muscle * 0.25
                + weight * 0.25
                + (male - 0.5) * 0.1),
        forearm_radius: 0.034
            * frame
            * (1.0 + unit(a.forearm_width) * 0.3 + muscle * 0.2 + weight * 0.2 + (male - 0.5) * 0.1),
        wrist_radius: 0.026 * frame * (1.0 + unit(a.wrist_width) * 0.3 + (male - 0.5) * 0.1),
        hand_length,
        hand_width: hand_length * 0.48,
        hand_thickness: hand_length * 0.16,
    };

    let l = &profile.legs;
    let foot_height = height * 0.04;
    let shank = legs_total - foot_height;
    let thigh_radius = 0.075
        * frame
        * (1.0 + unit(l.upper_leg_width) * 0.3 + weight * 0.3 + muscle * 0.2 + (fem - 0.5) * 0.1);
    let calf_radius = 0.052
        * frame
        * (1.0 + unit(l.lower_leg_width) * 0.3 + unit(l.calf_size) * 0.2 + weight * 0.2 + muscle * 0.15);
    let foot_length =
        height * (0.15 + unit(l.foot_size) * 0.03) * (1.0 + unit(l.toe_length) * 0.06);
    let legs = LegDimensions {
        total_length: legs_total,
        thigh_length: shank * 0.52,
        calf_length: shank * 0.48,
        thigh_radius,
        knee_radius: calf_radius * 1.05,
        calf_radius,
        ankle_radius: 0.032 * frame * (1.0 + unit(l.ankle_width) * 0.3 + weight * 0.1),
        foot_length,
        foot_width: foot_length * 0.38,
        foot_height,
        hip_joint_offset: torso.hip_width * (0.22 + unit(l.thigh_gap) * 0.08),
    };

    BodyDimensions {
        height,
        scale,
        ethnicity,
        head,
        face,
        torso,
        arms,
        legs,
    }
}

fn head_dimensions(profile: &AvatarProfile, scale: f64, male: f64) -> HeadDimensions {
    let f = &profile.face;
    let head_scale = 0.6 + 0.4 * scale;
    let width = 0.075 * head_scale * (1.0 + unit(f.head_width) * 0.2);
    let height = 0.115 * head_scale * (1.0 + unit(f.head_height) * 0.2);
    let depth = 0.095 * head_scale * (1.0 + unit(f.head_depth) * 0.2);
    let jaw_width = width * (0.82 + unit(f.jaw_width) * 0.2 + (male - 0.5) * 0.08);
    let weight = unit(profile.macro_morphs.weight);
    HeadDimensions {
        width,
        height,
        depth,
        jaw_width,
        jaw_height: height * (0.45 + unit(f.jaw_height) * 0.12),
        jaw_angle: unit(f.jaw_angle) * 0.2,
        chin_width: jaw_width * (0.45 + unit(f.chin_width) * 0.2),
        chin_height: height * (0.12 + unit(f.chin_height) * 0.06),
        chin_protrusion: depth * (0.05 + unit(f.chin_protrusion) * 0.06),
        forehead_height: height * (0.35 + unit(f.forehead_height) * 0.1),
        forehead_width: width * (0.9 + unit(f.forehead_width) * 0.1),
        forehead_protrusion: depth * (0.02 + unit(f.forehead_protrusion) * 0.03),
        cheekbone_width: width * (0.92 + unit(f.cheekbone_width) * 0.1),
        cheekbone_height: height * (0.05 + unit(f.cheekbone_height) * 0.06),
        cheek_radius: width * (0.22 + unit(f.cheek_fullness) * 0.1 + weight * 0.06),
    }
}

fn face_dimensions(
    profile: &AvatarProfile,
    head: &HeadDimensions,
    ethnic: &EthnicPreset,
) -> FaceDimensions {
    let f = &profile.face;
    let eye_radius = head.width * 0.16 * (1.0 + unit(f.eye_size) * 0.3);
    let eye_y = head.height * (0.05 + unit(f.eye_height) * 0.1);
    let nose_width = head.width * 0.14 * (1.0 + unit(f.nose_width) * 0.4) * ethnic.nose_width;
    let nose_length = head.height * 0.32 * (1.0 + unit(f.nose_length) * 0.3) * ethnic.nose_length;
    FaceDimensions {
        eye_radius,
        eye_aperture: ethnic.eye_aperture,
        eye_spacing: head.width * (0.40 + unit(f.eye_spacing) * 0.1),
        eye_y,
        eye_z: head.depth * (0.80 - unit(f.eye_depth) * 0.1),
        eye_tilt: unit(f.eye_angle) * 0.3 + ethnic.eye_tilt,
        brow_y: eye_y + eye_radius * (1.6 + unit(f.brow_height) * 0.6),
        brow_protrusion: head.depth
            * 0.04
            * (1.0 + unit(f.brow_protrusion) * 0.5)
            * ethnic.brow_protrusion,
        brow_angle: unit(f.brow_angle) * 0.4,
        nose_width,
        nose_length,
        nose_protrusion: head.depth * 0.20 * (1.0 + unit(f.nose_protrusion) * 0.4),
        nose_bridge: nose_width * (0.45 + unit(f.nose_bridge) * 0.3),
        nostril_width: nose_width * (0.5 + unit(f.nostril_width) * 0.3),
        nostril_height: nose_length * (0.1 + unit(f.nostril_height) * 0.08),
        nose_tip: nose_width * (0.45 + unit(f.nose_tip) * 0.3),
        mouth_width: head.width * (0.38 + unit(f.mouth_width) * 0.12),
        mouth_y: -head.height * (0.45 + unit(f.mouth_height) * 0.1),
        lip_upper: head.height * 0.035 * (1.0 + unit(f.lip_upper_fullness) * 0.6) * ethnic.lip_fullness,
        lip_lower: head.height * 0.042 * (1.0 + unit(f.lip_lower_fullness) * 0.6) * ethnic.lip_fullness,
        mouth_protrusion: head.depth * (0.02 + unit(f.mouth_protrusion) * 0.03),
        ear_size: head.height * 0.16 * (1.0 + unit(f.ear_size) * 0.4),
        ear_angle: unit(f.ear_angle) * 0.5,
        ear_y: head.height * unit(f.ear_height) * 0.15,
    }
}

struct TorsoInputs {
    length: f64,
    neck_length: f64,
    frame: f64,
    male: f64,
    weight: f64,
    muscle: f64,
}

fn torso_dimensions(profile: &AvatarProfile, inputs: TorsoInputs) -> TorsoDimensions {
    let t = &profile.torso;
    let TorsoInputs {
        length,
        neck_length,
        frame,
        male,
        weight,
        muscle,
    } = inputs;
    let fem = 1.0 - male;

    let hip_fraction = 0.28 + unit(t.hip_height) * 0.04;
    let waist_fraction = 0.27 + unit(t.waist_height) * 0.04;
    let chest_fraction = 1.0 - hip_fraction - waist_fraction;
    let chest_section = length * chest_fraction;

    TorsoDimensions {
        neck_length,
        neck_radius: 0.055
            * frame
            * (1.0
                + unit(profile.face.neck_width) * 0.3
                + (male - 0.5) * 0.15
                + weight * 0.1
                + muscle * 0.1),
        length,
        hip_section: length * hip_fraction,
        waist_section: length * waist_fraction,
        chest_section,
        shoulder_width: (0.40
            + unit(t.shoulder_width) * 0.08
            + (male - 0.5) * 0.06
            + muscle * 0.04
            + unit(profile.arms.shoulder_muscle) * 0.02)
            * frame,
        shoulder_drop: chest_section * (0.12 - unit(t.shoulder_height) * 0.08),
        chest_width: (0.32
            + unit(t.chest_width) * 0.08
            + (male - 0.5) * 0.04
            + weight * 0.06
            + muscle * 0.04)
            * frame,
        chest_depth: (0.20 + unit(t.chest_depth) * 0.06 + weight * 0.06 + muscle * 0.02) * frame,
        bust_radius: (0.05 + fem * (0.035 + unit(t.bust_size) * 0.05) + weight * 0.01) * frame,
        waist_width: (0.28
            + unit(t.waist_width) * 0.10
            + weight * 0.14
            + unit(t.stomach_size) * 0.04
            + (male - 0.5) * 0.02
            - muscle * 0.02)
            * frame,
        waist_depth: (0.18 + weight * 0.10 + unit(t.stomach_size) * 0.08) * frame,
        hip_width: (0.34 + unit(t.hip_width) * 0.10 + (fem - 0.5) * 0.08 + weight * 0.10) * frame,
        hip_depth: (0.20 + weight * 0.06 + unit(t.buttock_protrusion) * 0.04) * frame,
        glute_radius: (0.09
            + unit(profile.legs.glute_size) * 0.04
            + unit(t.buttock_size) * 0.03
            + (fem - 0.5) * 0.02
            + weight * 0.03)
            * frame,
        back_curvature: unit(t.back_curvature) * 0.2,
    }
}

/// Human-readable body measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub chest_cm: f64,
    pub waist_cm: f64,
    pub hip_cm: f64,
    pub arm_length_cm: f64,
    pub inseam_cm: f64,
}

impl Measurements {
    /// Derives measurements from a profile and its dimensions.
    pub fn from_profile(profile: &AvatarProfile, dims: &BodyDimensions) -> Self {
        let bmi = 18.0 + fraction(profile.macro_morphs.weight) * 15.0
            + fraction(profile.macro_morphs.muscle) * 2.0;
        let t = &dims.torso;
        Self {
            height_cm: dims.height * 100.0,
            weight_kg: bmi * dims.height * dims.height,
            bmi,
            chest_cm: ellipse_perimeter(t.chest_width / 2.0, t.chest_depth / 2.0) * 100.0,
            waist_cm: ellipse_perimeter(t.waist_width / 2.0, t.waist_depth / 2.0) * 100.0,
            hip_cm: ellipse_perimeter(t.hip_width / 2.0, t.hip_depth / 2.0) * 100.0,
            arm_length_cm: (dims.arms.total_length() + dims.arms.hand_length) * 100.0,
            inseam_cm: (dims.legs.total_length - dims.legs.thigh_radius) * 100.0,
        }
    }
}

/// Ramanujan's approximation of an ellipse perimeter.
fn ellipse_perimeter(a: f64, b: f64) -> f64 {
    let h = ((a - b) / (a + b)).powi(2);
    std::f64::consts::PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use omniavatar_spec::MorphGroup;

    fn profile_with(group: MorphGroup, name: &str, value: f64) -> AvatarProfile {
        let mut p = AvatarProfile::default();
        p.set_morph(group, name, value).unwrap();
        p
    }

    #[test]
    fn test_unit_mapping() {
        assert_eq!(unit(0.0), -0.5);
        assert_eq!(unit(50.0), 0.0);
        assert_eq!(unit(100.0), 0.5);
        assert_eq!(unit(250.0), 0.5);
        assert_eq!(unit(f64::NAN), 0.0);
    }

    #[test]
    fn test_neutral_profile_has_reference_height() {
        let dims = compute_dimensions(&AvatarProfile::default());
        assert!((dims.height - REFERENCE_HEIGHT).abs() < 1e-12);
        assert!((dims.scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_budget_sums_to_height() {
        for height in [0.0, 50.0, 100.0] {
            let dims = compute_dimensions(&profile_with(MorphGroup::Macro, "height", height));
            let sum = dims.legs.total_length
                + dims.torso.length
                + dims.torso.neck_length
                + 2.0 * dims.head.height;
            assert!((sum - dims.height).abs() < 1e-12);
            let sections =
                dims.torso.hip_section + dims.torso.waist_section + dims.torso.chest_section;
            assert!((sections - dims.torso.length).abs() < 1e-12);
            let leg = dims.legs.foot_height + dims.legs.calf_length + dims.legs.thigh_length;
            assert!((leg - dims.legs.total_length).abs() < 1e-12);
        }
    }

    #[test]
    fn test_extremes_stay_positive() {
        for value in [0.0, 100.0] {
            let mut profile = AvatarProfile::default();
            for (group, name, _) in AvatarProfile::default().all_morphs() {
                profile.set_morph(group, name, value).unwrap();
            }
            let dims = compute_dimensions(&profile);
            for (name, v) in dims.length_entries() {
                assert!(v > 0.0, "{} = {} at slider {}", name, v, value);
            }
        }
    }

    #[test]
    fn test_height_slider_is_monotonic() {
        let short = compute_dimensions(&profile_with(MorphGroup::Macro, "height", 10.0));
        let tall = compute_dimensions(&profile_with(MorphGroup::Macro, "height", 90.0));
        assert!(tall.height > short.height);
        assert!(tall.legs.total_length > short.legs.total_length);
        assert!(tall.arms.upper_length > short.arms.upper_length);
    }

    #[test]
    fn test_ethnicity_blend_normalizes() {
        let mut m = MacroMorphs::default();
        m.african = 0.0;
        m.asian = 0.0;
        m.caucasian = 0.0;
        let blend = EthnicityBlend::from_macro(&m);
        assert!((blend.african - 1.0 / 3.0).abs() < 1e-12);

        m.african = 100.0;
        let blend = EthnicityBlend::from_macro(&m);
        assert_eq!(blend.african, 1.0);
        assert_eq!(blend.asian, 0.0);
    }

    #[test]
    fn test_ethnicity_mix_is_continuous_and_monotonic() {
        let presets = EthnicPresets::default();
        let mut previous: Option<f64> = None;
        for step in 0..=20 {
            let mut profile = AvatarProfile::default();
            profile.macro_morphs.african = step as f64 * 5.0;
            let lip = compute_dimensions_with(&profile, &presets).face.lip_upper;
            if let Some(prev) = previous {
                assert!(lip >= prev, "lip fullness must not decrease");
                assert!(lip - prev < 0.002, "lip fullness must change smoothly");
            }
            previous = Some(lip);
        }
    }

    #[test]
    fn test_custom_presets_are_applied() {
        let mut presets = EthnicPresets::default();
        presets.caucasian.nose_width = 2.0;
        let mut profile = AvatarProfile::default();
        profile.macro_morphs.african = 0.0;
        profile.macro_morphs.asian = 0.0;
        profile.macro_morphs.caucasian = 100.0;
        let base = compute_dimensions(&profile).face.nose_width;
        let custom = compute_dimensions_with(&profile, &presets).face.nose_width;
        assert!((custom / base - 2.0 / 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_measurements() {
        let profile = AvatarProfile::default();
        let dims = compute_dimensions(&profile);
        let m = Measurements::from_profile(&profile, &dims);
        assert!((m.height_cm - 170.0).abs() < 1e-9);
        assert!((m.bmi - 26.5).abs() < 1e-9);
        assert!(m.waist_cm < m.hip_cm);
        assert!((m.weight_kg - 26.5 * 1.7 * 1.7).abs() < 1e-9);
    }
}
