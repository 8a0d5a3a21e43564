//! Morph slider groups.
//!
//! Every slider is a normalized value in `[0, 100]` with 50 as the neutral
//! midpoint. Groups are declared through `morph_group!` so that each one gets
//! the same name-based accessors used by validation, the randomizer, and the
//! CLI `set` path.

use serde::{Deserialize, Serialize};

/// Lower bound of every morph slider.
pub const SLIDER_MIN: f64 = 0.0;
/// Upper bound of every morph slider.
pub const SLIDER_MAX: f64 = 100.0;
/// Neutral slider value.
pub const SLIDER_NEUTRAL: f64 = 50.0;

macro_rules! morph_group {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$fmeta:meta])* $field:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: f64, )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self { $( $field: SLIDER_NEUTRAL, )* }
            }
        }

        impl $name {
            /// Slider names in declaration order.
            pub const NAMES: &'static [&'static str] = &[ $( stringify!($field), )* ];

            /// Returns `(name, value)` pairs in declaration order.
            pub fn entries(&self) -> Vec<(&'static str, f64)> {
                vec![ $( (stringify!($field), self.$field), )* ]
            }

            /// Looks up a slider by name.
            pub fn get(&self, name: &str) -> Option<f64> {
                match name {
                    $( stringify!($field) => Some(self.$field), )*
                    _ => None,
                }
            }

            /// Sets a slider by name. Returns false for unknown names.
            pub fn set(&mut self, name: &str, value: f64) -> bool {
                match name {
                    $( stringify!($field) => {
                        self.$field = value;
                        true
                    } )*
                    _ => false,
                }
            }
        }
    };
}

morph_group! {
    /// High-level body parameters.
    MacroMorphs {
        /// 0 = female, 100 = male.
        gender,
        age,
        muscle,
        weight,
        height,
        proportions,
        african,
        asian,
        caucasian,
    }
}

morph_group! {
    /// Head and face sliders.
    FaceMorphs {
        head_width,
        head_height,
        head_depth,
        forehead_height,
        forehead_width,
        forehead_protrusion,
        eye_size,
        eye_spacing,
        eye_height,
        eye_depth,
        eye_angle,
        brow_height,
        brow_protrusion,
        brow_angle,
        nose_width,
        nose_length,
        nose_bridge,
        nose_protrusion,
        nostril_width,
        nostril_height,
        nose_tip,
        mouth_width,
        mouth_height,
        lip_upper_fullness,
        lip_lower_fullness,
        mouth_protrusion,
        cheekbone_width,
        cheekbone_height,
        cheek_fullness,
        jaw_width,
        jaw_height,
        jaw_angle,
        chin_width,
        chin_height,
        chin_protrusion,
        ear_size,
        ear_angle,
        ear_height,
        neck_width,
        neck_length,
    }
}

morph_group! {
    /// Torso sliders.
    TorsoMorphs {
        shoulder_width,
        shoulder_height,
        chest_width,
        chest_depth,
        chest_height,
        bust_size,
        waist_width,
        waist_height,
        hip_width,
        hip_height,
        buttock_size,
        buttock_protrusion,
        stomach_size,
        back_curvature,
    }
}

morph_group! {
    /// Arm and hand sliders.
    ArmMorphs {
        arm_length,
        upper_arm_width,
        forearm_width,
        wrist_width,
        hand_size,
        finger_length,
        shoulder_muscle,
        bicep_size,
        tricep_size,
    }
}

morph_group! {
    /// Leg and foot sliders.
    LegMorphs {
        leg_length,
        upper_leg_width,
        lower_leg_width,
        ankle_width,
        foot_size,
        toe_length,
        thigh_gap,
        calf_size,
        glute_size,
    }
}

/// Identifies one of the morph groups of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphGroup {
    Macro,
    Face,
    Torso,
    Arms,
    Legs,
}

impl MorphGroup {
    /// All groups in profile order.
    pub const ALL: [MorphGroup; 5] = [
        MorphGroup::Macro,
        MorphGroup::Face,
        MorphGroup::Torso,
        MorphGroup::Arms,
        MorphGroup::Legs,
    ];

    /// JSON field name of the group inside a profile.
    pub fn field_name(&self) -> &'static str {
        match self {
            MorphGroup::Macro => "macro_morphs",
            MorphGroup::Face => "face",
            MorphGroup::Torso => "torso",
            MorphGroup::Arms => "arms",
            MorphGroup::Legs => "legs",
        }
    }
}

impl std::str::FromStr for MorphGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "macro" | "macro_morphs" => Ok(MorphGroup::Macro),
            "face" => Ok(MorphGroup::Face),
            "torso" => Ok(MorphGroup::Torso),
            "arms" => Ok(MorphGroup::Arms),
            "legs" => Ok(MorphGroup::Legs),
            other => Err(format!("unknown morph group: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_neutral() {
        let face = FaceMorphs::default();
        assert!(face.entries().iter().all(|(_, v)| *v == SLIDER_NEUTRAL));
        assert_eq!(FaceMorphs::NAMES.len(), 40);
        assert_eq!(TorsoMorphs::NAMES.len(), 14);
    }

    #[test]
    fn test_get_and_set_by_name() {
        let mut legs = LegMorphs::default();
        assert!(legs.set("thigh_gap", 80.0));
        assert_eq!(legs.get("thigh_gap"), Some(80.0));
        assert_eq!(legs.thigh_gap, 80.0);
        assert!(!legs.set("tail_length", 10.0));
        assert_eq!(legs.get("tail_length"), None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let arms: ArmMorphs = serde_json::from_str(r#"{"arm_length": 12.5}"#).unwrap();
        assert_eq!(arms.arm_length, 12.5);
        assert_eq!(arms.hand_size, SLIDER_NEUTRAL);
    }

    #[test]
    fn test_morph_group_parse() {
        assert_eq!("macro".parse::<MorphGroup>(), Ok(MorphGroup::Macro));
        assert_eq!("legs".parse::<MorphGroup>(), Ok(MorphGroup::Legs));
        assert!("tail".parse::<MorphGroup>().is_err());
    }
}
