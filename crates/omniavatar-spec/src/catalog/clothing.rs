//! Clothing catalog, slots, and layering priority.

use serde::{Deserialize, Serialize};

/// Body region a garment occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClothingSlot {
    Upper,
    Lower,
    /// Covers both upper and lower slots.
    FullBody,
    Footwear,
}

impl ClothingSlot {
    /// Returns true if garments in the two slots cannot be worn together.
    pub fn conflicts_with(&self, other: ClothingSlot) -> bool {
        use ClothingSlot::*;
        match (self, other) {
            (Footwear, Footwear) => true,
            (Footwear, _) | (_, Footwear) => false,
            (FullBody, _) | (_, FullBody) => true,
            (a, b) => *a == b,
        }
    }
}

/// Shape family a garment is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GarmentKind {
    /// Short-sleeved top.
    TShirt,
    /// Long-sleeved top with a hood.
    Hoodie,
    /// Long-sleeved open jacket.
    Jacket,
    /// Suit jacket with lapels.
    SuitJacket,
    /// Full-length trousers.
    Trousers,
    /// Knee-length trousers.
    Shorts,
    /// One-piece coverall.
    Coverall,
    /// Low shoe.
    Shoe,
    /// Shoe with a shaft over the ankle.
    Boot,
}

/// A garment from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClothingItem {
    #[serde(rename = "shirt01")]
    Shirt,
    #[serde(rename = "hoodie01")]
    Hoodie,
    #[serde(rename = "jacket01")]
    Jacket,
    #[serde(rename = "suit01")]
    Suit,
    #[serde(rename = "jeans01")]
    Jeans,
    #[serde(rename = "shorts01")]
    Shorts,
    #[serde(rename = "suitpants01")]
    SuitPants,
    #[serde(rename = "worksuit01")]
    Worksuit,
    #[serde(rename = "sneakers01")]
    Sneakers,
    #[serde(rename = "boots01")]
    Boots,
    #[serde(rename = "dressshoes01")]
    DressShoes,
}

impl ClothingItem {
    /// Every item in catalog order.
    pub const ALL: [ClothingItem; 11] = [
        ClothingItem::Shirt,
        ClothingItem::Hoodie,
        ClothingItem::Jacket,
        ClothingItem::Suit,
        ClothingItem::Jeans,
        ClothingItem::Shorts,
        ClothingItem::SuitPants,
        ClothingItem::Worksuit,
        ClothingItem::Sneakers,
        ClothingItem::Boots,
        ClothingItem::DressShoes,
    ];

    /// Returns the stable catalog id.
    pub fn catalog_id(&self) -> &'static str {
        match self {
            ClothingItem::Shirt => "shirt01",
            ClothingItem::Hoodie => "hoodie01",
            ClothingItem::Jacket => "jacket01",
            ClothingItem::Suit => "suit01",
            ClothingItem::Jeans => "jeans01",
            ClothingItem::Shorts => "shorts01",
            ClothingItem::SuitPants => "suitpants01",
            ClothingItem::Worksuit => "worksuit01",
            ClothingItem::Sneakers => "sneakers01",
            ClothingItem::Boots => "boots01",
            ClothingItem::DressShoes => "dressshoes01",
        }
    }

    /// Parses a catalog id, accepting legacy aliases.
    pub fn from_catalog_id(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        let item = match id.as_str() {
            "shirt01" | "shirt" | "t_shirt" | "tshirt" => ClothingItem::Shirt,
            "hoodie01" | "hoodie" => ClothingItem::Hoodie,
            "jacket01" | "jacket" | "bomber" | "leather" => ClothingItem::Jacket,
            "suit01" | "suit" | "blazer" => ClothingItem::Suit,
            "jeans01" | "jeans" => ClothingItem::Jeans,
            "shorts01" | "shorts" => ClothingItem::Shorts,
            "suitpants01" | "suit_pants" | "dress_pants" => ClothingItem::SuitPants,
            "worksuit01" | "worksuit" | "coveralls" => ClothingItem::Worksuit,
            "sneakers01" | "sneakers" => ClothingItem::Sneakers,
            "boots01" | "boots" => ClothingItem::Boots,
            "dressshoes01" | "dress_shoes" | "oxford" => ClothingItem::DressShoes,
            _ => return None,
        };
        Some(item)
    }

    /// Slot the item occupies.
    pub fn slot(&self) -> ClothingSlot {
        match self {
            ClothingItem::Shirt
            | ClothingItem::Hoodie
            | ClothingItem::Jacket
            | ClothingItem::Suit => ClothingSlot::Upper,
            ClothingItem::Jeans | ClothingItem::Shorts | ClothingItem::SuitPants => {
                ClothingSlot::Lower
            }
            ClothingItem::Worksuit => ClothingSlot::FullBody,
            ClothingItem::Sneakers | ClothingItem::Boots | ClothingItem::DressShoes => {
                ClothingSlot::Footwear
            }
        }
    }

    /// Layering priority within the slot; the highest equipped item renders.
    pub fn priority(&self) -> u8 {
        match self {
            ClothingItem::Shirt => 1,
            ClothingItem::Hoodie => 2,
            ClothingItem::Jacket => 3,
            ClothingItem::Suit => 4,
            ClothingItem::Shorts => 1,
            ClothingItem::Jeans => 2,
            ClothingItem::SuitPants => 3,
            ClothingItem::Worksuit => 1,
            ClothingItem::Sneakers => 1,
            ClothingItem::DressShoes => 2,
            ClothingItem::Boots => 3,
        }
    }

    /// Shape family used to build the garment.
    pub fn kind(&self) -> GarmentKind {
        match self {
            ClothingItem::Shirt => GarmentKind::TShirt,
            ClothingItem::Hoodie => GarmentKind::Hoodie,
            ClothingItem::Jacket => GarmentKind::Jacket,
            ClothingItem::Suit => GarmentKind::SuitJacket,
            ClothingItem::Jeans | ClothingItem::SuitPants => GarmentKind::Trousers,
            ClothingItem::Shorts => GarmentKind::Shorts,
            ClothingItem::Worksuit => GarmentKind::Coverall,
            ClothingItem::Sneakers | ClothingItem::DressShoes => GarmentKind::Shoe,
            ClothingItem::Boots => GarmentKind::Boot,
        }
    }

    /// Base fabric color as `#RRGGBB`.
    pub fn base_color(&self) -> &'static str {
        match self {
            ClothingItem::Shirt => "#F2F2F2",
            ClothingItem::Hoodie => "#5A6770",
            ClothingItem::Jacket => "#2F2A26",
            ClothingItem::Suit => "#1F2433",
            ClothingItem::Jeans => "#2E4A7A",
            ClothingItem::Shorts => "#7A6A52",
            ClothingItem::SuitPants => "#1F2433",
            ClothingItem::Worksuit => "#D9822B",
            ClothingItem::Sneakers => "#E8E8E8",
            ClothingItem::Boots => "#4A3526",
            ClothingItem::DressShoes => "#140F0C",
        }
    }
}

impl std::fmt::Display for ClothingItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.catalog_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_round_trip() {
        for item in ClothingItem::ALL {
            assert_eq!(ClothingItem::from_catalog_id(item.catalog_id()), Some(item));
            assert_eq!(serde_json::to_value(item).unwrap(), item.catalog_id());
        }
    }

    #[test]
    fn test_upper_priority_order() {
        let order = [
            ClothingItem::Shirt,
            ClothingItem::Hoodie,
            ClothingItem::Jacket,
            ClothingItem::Suit,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].priority() < pair[1].priority());
        }
    }

    #[test]
    fn test_slot_conflicts() {
        use ClothingSlot::*;
        assert!(Upper.conflicts_with(Upper));
        assert!(!Upper.conflicts_with(Lower));
        assert!(FullBody.conflicts_with(Upper));
        assert!(Lower.conflicts_with(FullBody));
        assert!(!FullBody.conflicts_with(Footwear));
        assert!(Footwear.conflicts_with(Footwear));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(ClothingItem::from_catalog_id("t_shirt"), Some(ClothingItem::Shirt));
        assert_eq!(ClothingItem::from_catalog_id("oxford"), Some(ClothingItem::DressShoes));
        assert_eq!(ClothingItem::from_catalog_id("nonexistent_item"), None);
    }
}
