//! Discrete face-feature variants.

use serde::{Deserialize, Serialize};

/// Eye shape variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeType {
    #[default]
    Round,
    Almond,
    Hooded,
    Monolid,
}

/// Teeth variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeethType {
    None,
    #[default]
    White,
    Gold,
    Vampire,
    Braces,
}

/// Eyebrow variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyebrowType {
    None,
    Thin,
    #[default]
    Thick,
    Arched,
}

/// Eyelash variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyelashType {
    None,
    #[default]
    Short,
    Long,
    Dramatic,
}

impl EyeType {
    pub const ALL: [EyeType; 4] = [
        EyeType::Round,
        EyeType::Almond,
        EyeType::Hooded,
        EyeType::Monolid,
    ];
}

impl TeethType {
    pub const ALL: [TeethType; 5] = [
        TeethType::None,
        TeethType::White,
        TeethType::Gold,
        TeethType::Vampire,
        TeethType::Braces,
    ];
}

impl EyebrowType {
    pub const ALL: [EyebrowType; 4] = [
        EyebrowType::None,
        EyebrowType::Thin,
        EyebrowType::Thick,
        EyebrowType::Arched,
    ];
}

impl EyelashType {
    pub const ALL: [EyelashType; 4] = [
        EyelashType::None,
        EyelashType::Short,
        EyelashType::Long,
        EyelashType::Dramatic,
    ];
}

/// Face-feature variant selection of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceFeatures {
    pub eye: EyeType,
    pub teeth: TeethType,
    pub eyebrow: EyebrowType,
    pub eyelash: EyelashType,
}
