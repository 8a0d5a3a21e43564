//! Facial hair catalog.

use serde::{Deserialize, Serialize};

/// A facial hair style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacialHairStyle {
    #[default]
    None,
    Stubble,
    Mustache,
    Goatee,
    FullBeard,
}

impl FacialHairStyle {
    pub const ALL: [FacialHairStyle; 5] = [
        FacialHairStyle::None,
        FacialHairStyle::Stubble,
        FacialHairStyle::Mustache,
        FacialHairStyle::Goatee,
        FacialHairStyle::FullBeard,
    ];

    /// Returns the stable catalog id.
    pub fn catalog_id(&self) -> &'static str {
        match self {
            FacialHairStyle::None => "none",
            FacialHairStyle::Stubble => "stubble",
            FacialHairStyle::Mustache => "mustache",
            FacialHairStyle::Goatee => "goatee",
            FacialHairStyle::FullBeard => "full_beard",
        }
    }

    /// Parses a catalog id, accepting legacy aliases.
    pub fn from_catalog_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "none" | "clean" => Some(FacialHairStyle::None),
            "stubble" => Some(FacialHairStyle::Stubble),
            "mustache" | "handlebar" => Some(FacialHairStyle::Mustache),
            "goatee" => Some(FacialHairStyle::Goatee),
            "full_beard" | "beard" | "medium_beard" => Some(FacialHairStyle::FullBeard),
            _ => None,
        }
    }

    /// Whether the style covers the upper lip.
    pub fn covers_upper_lip(&self) -> bool {
        matches!(
            self,
            FacialHairStyle::Mustache | FacialHairStyle::Goatee | FacialHairStyle::FullBeard
        )
    }
}
