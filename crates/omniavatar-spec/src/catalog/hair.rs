//! Hair style catalog.

use serde::{Deserialize, Serialize};

/// Catalog id that explicitly selects no hair.
pub const BALD_ID: &str = "bald";

/// A hair style from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HairStyle {
    Bald,
    Buzz,
    Crew,
    LowFade,
    HighFade,
    Afro,
    DreadsShort,
    DreadsLong,
    BoxBraids,
    Cornrows,
    Twists,
    Ponytail,
    Bun,
    LongStraight,
    Bob,
    Mohawk,
}

/// How strands of a strand style are laid out on the scalp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrandArrangement {
    /// Strands spread around the crown and hang outward.
    Radial,
    /// Strands run front to back in parallel rows.
    Rows,
}

/// Strand parameters relative to the head.
///
/// `length` and `radius` are fractions of the head height; the resolver scales
/// them by the actual head dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrandLayout {
    /// Number of strands.
    pub count: u32,
    /// Strand length as a fraction of head height.
    pub length: f64,
    /// Strand radius as a fraction of head height.
    pub radius: f64,
    /// Outward tilt from vertical in radians.
    pub tilt: f64,
    pub arrangement: StrandArrangement,
}

impl HairStyle {
    /// Every style in catalog order.
    pub const ALL: [HairStyle; 16] = [
        HairStyle::Bald,
        HairStyle::Buzz,
        HairStyle::Crew,
        HairStyle::LowFade,
        HairStyle::HighFade,
        HairStyle::Afro,
        HairStyle::DreadsShort,
        HairStyle::DreadsLong,
        HairStyle::BoxBraids,
        HairStyle::Cornrows,
        HairStyle::Twists,
        HairStyle::Ponytail,
        HairStyle::Bun,
        HairStyle::LongStraight,
        HairStyle::Bob,
        HairStyle::Mohawk,
    ];

    /// Returns the stable catalog id.
    pub fn catalog_id(&self) -> &'static str {
        match self {
            HairStyle::Bald => BALD_ID,
            HairStyle::Buzz => "buzz",
            HairStyle::Crew => "crew",
            HairStyle::LowFade => "lowfade",
            HairStyle::HighFade => "highfade",
            HairStyle::Afro => "afro",
            HairStyle::DreadsShort => "dreadsshort",
            HairStyle::DreadsLong => "dreadslong",
            HairStyle::BoxBraids => "boxbraids",
            HairStyle::Cornrows => "cornrows",
            HairStyle::Twists => "twists",
            HairStyle::Ponytail => "ponytail",
            HairStyle::Bun => "bun",
            HairStyle::LongStraight => "longstraight",
            HairStyle::Bob => "bob",
            HairStyle::Mohawk => "mohawk",
        }
    }

    /// Display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            HairStyle::Bald => "Bald",
            HairStyle::Buzz => "Buzz Cut",
            HairStyle::Crew => "Crew Cut",
            HairStyle::LowFade => "Low Fade",
            HairStyle::HighFade => "High Fade",
            HairStyle::Afro => "Afro",
            HairStyle::DreadsShort => "Short Dreadlocks",
            HairStyle::DreadsLong => "Long Dreadlocks",
            HairStyle::BoxBraids => "Box Braids",
            HairStyle::Cornrows => "Cornrows",
            HairStyle::Twists => "Twists",
            HairStyle::Ponytail => "Ponytail",
            HairStyle::Bun => "Bun",
            HairStyle::LongStraight => "Long Straight",
            HairStyle::Bob => "Bob",
            HairStyle::Mohawk => "Mohawk",
        }
    }

    /// Parses a catalog id, accepting legacy aliases.
    pub fn from_catalog_id(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        let style = match id.as_str() {
            "bald" | "none" => HairStyle::Bald,
            "buzz" => HairStyle::Buzz,
            "crew" | "short" => HairStyle::Crew,
            "lowfade" | "fade" | "low_fade" => HairStyle::LowFade,
            "highfade" | "high_fade" => HairStyle::HighFade,
            "afro" => HairStyle::Afro,
            "dreadsshort" | "dreads_short" => HairStyle::DreadsShort,
            "dreadslong" | "dreads_long" | "dreadlocks" => HairStyle::DreadsLong,
            "boxbraids" | "box_braids" | "braids" => HairStyle::BoxBraids,
            "cornrows" => HairStyle::Cornrows,
            "twists" => HairStyle::Twists,
            "ponytail" => HairStyle::Ponytail,
            "bun" | "man_bun" => HairStyle::Bun,
            "longstraight" | "long_straight" | "long" => HairStyle::LongStraight,
            "bob" => HairStyle::Bob,
            "mohawk" => HairStyle::Mohawk,
            _ => return None,
        };
        Some(style)
    }

    /// Returns true for the explicit no-hair style.
    pub fn is_bald(&self) -> bool {
        matches!(self, HairStyle::Bald)
    }

    /// Strand layout of strand-based styles, `None` for caps and domes.
    pub fn strand_layout(&self) -> Option<StrandLayout> {
        let layout = match self {
            HairStyle::DreadsShort => StrandLayout {
                count: 24,
                length: 0.45,
                radius: 0.035,
                tilt: 0.55,
                arrangement: StrandArrangement::Radial,
            },
            HairStyle::DreadsLong => StrandLayout {
                count: 28,
                length: 1.45,
                radius: 0.035,
                tilt: 0.2,
                arrangement: StrandArrangement::Radial,
            },
            HairStyle::BoxBraids => StrandLayout {
                count: 36,
                length: 1.6,
                radius: 0.022,
                tilt: 0.15,
                arrangement: StrandArrangement::Radial,
            },
            HairStyle::Twists => StrandLayout {
                count: 30,
                length: 0.6,
                radius: 0.03,
                tilt: 0.45,
                arrangement: StrandArrangement::Radial,
            },
            HairStyle::Cornrows => StrandLayout {
                count: 7,
                length: 1.1,
                radius: 0.028,
                tilt: 0.0,
                arrangement: StrandArrangement::Rows,
            },
            _ => return None,
        };
        Some(layout)
    }
}

impl std::fmt::Display for HairStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.catalog_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_round_trip() {
        for style in HairStyle::ALL {
            assert_eq!(HairStyle::from_catalog_id(style.catalog_id()), Some(style));
        }
    }

    #[test]
    fn test_serde_uses_catalog_id() {
        for style in HairStyle::ALL {
            let json = serde_json::to_value(style).unwrap();
            assert_eq!(json, style.catalog_id());
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(HairStyle::from_catalog_id("fade"), Some(HairStyle::LowFade));
        assert_eq!(
            HairStyle::from_catalog_id("dreadlocks"),
            Some(HairStyle::DreadsLong)
        );
        assert_eq!(HairStyle::from_catalog_id("Long_Straight"), Some(HairStyle::LongStraight));
        assert_eq!(HairStyle::from_catalog_id("mullet"), None);
    }

    #[test]
    fn test_short_dreads_are_shorter_than_long() {
        let short = HairStyle::DreadsShort.strand_layout().unwrap();
        let long = HairStyle::DreadsLong.strand_layout().unwrap();
        assert!(short.length < long.length);
        assert!(HairStyle::Afro.strand_layout().is_none());
    }
}
