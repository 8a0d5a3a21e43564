//! Fixed registries of selectable styles, items and accessories.
//!
//! Catalog ids arrive as plain strings and may be stale, so every catalog
//! exposes `from_catalog_id` returning `Option` rather than an error.

pub mod accessory;
pub mod clothing;
pub mod facial_hair;
pub mod hair;
pub mod outfit;

pub use accessory::{Accessories, Glasses, Watch};
pub use clothing::{ClothingItem, ClothingSlot, GarmentKind};
pub use facial_hair::FacialHairStyle;
pub use hair::{HairStyle, StrandArrangement, StrandLayout, BALD_ID};
pub use outfit::OutfitPreset;
