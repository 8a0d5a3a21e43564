//! Outfit presets: fixed clothing combinations.

use serde::{Deserialize, Serialize};

use super::clothing::ClothingItem;

/// A named clothing combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutfitPreset {
    Business,
    Casual,
    Streetwear,
    Formal,
    Worker,
}

impl OutfitPreset {
    pub const ALL: [OutfitPreset; 5] = [
        OutfitPreset::Business,
        OutfitPreset::Casual,
        OutfitPreset::Streetwear,
        OutfitPreset::Formal,
        OutfitPreset::Worker,
    ];

    /// Returns the preset id.
    pub fn id(&self) -> &'static str {
        match self {
            OutfitPreset::Business => "business",
            OutfitPreset::Casual => "casual",
            OutfitPreset::Streetwear => "streetwear",
            OutfitPreset::Formal => "formal",
            OutfitPreset::Worker => "worker",
        }
    }

    /// Parses a preset id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(id.trim()))
    }

    /// Items the preset equips. Never contains two items of one slot.
    pub fn items(&self) -> &'static [ClothingItem] {
        match self {
            OutfitPreset::Business => &[
                ClothingItem::Jacket,
                ClothingItem::SuitPants,
                ClothingItem::DressShoes,
            ],
            OutfitPreset::Casual => &[
                ClothingItem::Shirt,
                ClothingItem::Jeans,
                ClothingItem::Sneakers,
            ],
            OutfitPreset::Streetwear => &[
                ClothingItem::Hoodie,
                ClothingItem::Jeans,
                ClothingItem::Sneakers,
            ],
            OutfitPreset::Formal => &[
                ClothingItem::Suit,
                ClothingItem::SuitPants,
                ClothingItem::DressShoes,
            ],
            OutfitPreset::Worker => &[ClothingItem::Worksuit, ClothingItem::Boots],
        }
    }
}

impl std::str::FromStr for OutfitPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| format!("unknown outfit preset: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_have_no_slot_conflicts() {
        for preset in OutfitPreset::ALL {
            let items = preset.items();
            for (i, a) in items.iter().enumerate() {
                for b in &items[i + 1..] {
                    assert!(
                        !a.slot().conflicts_with(b.slot()),
                        "{} has conflicting {} and {}",
                        preset.id(),
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("Formal".parse::<OutfitPreset>(), Ok(OutfitPreset::Formal));
        assert!("pajamas".parse::<OutfitPreset>().is_err());
    }
}
