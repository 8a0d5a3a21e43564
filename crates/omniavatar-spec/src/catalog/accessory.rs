//! Accessory catalog: eyewear and wrist watches.

use serde::{Deserialize, Serialize};

/// An eyewear style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glasses {
    None,
    #[default]
    Reading,
    Round,
    Square,
    /// A single lens over the right eye.
    Monocle,
}

impl Glasses {
    pub const ALL: [Glasses; 5] = [
        Glasses::None,
        Glasses::Reading,
        Glasses::Round,
        Glasses::Square,
        Glasses::Monocle,
    ];

    /// Returns the stable catalog id.
    pub fn catalog_id(&self) -> &'static str {
        match self {
            Glasses::None => "none",
            Glasses::Reading => "reading",
            Glasses::Round => "round",
            Glasses::Square => "square",
            Glasses::Monocle => "monocle",
        }
    }

    /// Parses a catalog id. Frame shapes without geometry of their own map to
    /// the closest drawn style.
    pub fn from_catalog_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Glasses::None),
            "reading" | "wire_frame" | "rimless" => Some(Glasses::Reading),
            "round" | "aviator" => Some(Glasses::Round),
            "square" | "wayfarer" | "oversized" => Some(Glasses::Square),
            "monocle" => Some(Glasses::Monocle),
            _ => None,
        }
    }
}

/// A wrist watch finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Watch {
    None,
    #[default]
    Silver,
    Gold,
}

impl Watch {
    pub const ALL: [Watch; 3] = [Watch::None, Watch::Silver, Watch::Gold];

    /// Returns the stable catalog id.
    pub fn catalog_id(&self) -> &'static str {
        match self {
            Watch::None => "none",
            Watch::Silver => "silver",
            Watch::Gold => "gold",
        }
    }

    pub fn from_catalog_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Watch::None),
            "silver" | "smart" | "sport" => Some(Watch::Silver),
            "gold" | "rose_gold" => Some(Watch::Gold),
            _ => None,
        }
    }
}

/// Accessories worn by a profile. A fresh profile wears reading glasses and
/// a silver watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Accessories {
    pub glasses: Glasses,
    pub watch: Watch,
}

impl Accessories {
    /// No accessories at all.
    pub fn none() -> Self {
        Self {
            glasses: Glasses::None,
            watch: Watch::None,
        }
    }
}
