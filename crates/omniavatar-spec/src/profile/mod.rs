//! Avatar profile: the full set of user-controlled parameters.

pub mod features;
pub mod materials;
pub mod morphs;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Accessories, ClothingItem, FacialHairStyle, HairStyle, OutfitPreset};
use crate::error::ProfileError;

pub use features::{EyeType, EyebrowType, EyelashType, FaceFeatures, TeethType};
pub use materials::{Materials, Rgb, TextureStyle};
pub use morphs::{
    ArmMorphs, FaceMorphs, LegMorphs, MacroMorphs, MorphGroup, TorsoMorphs, SLIDER_MAX,
    SLIDER_MIN, SLIDER_NEUTRAL,
};

/// Id given to profiles created without an explicit id.
pub const DEFAULT_PROFILE_ID: &str = "default";
/// Hair style of a freshly created profile.
pub const DEFAULT_HAIR_ID: &str = "crew";

/// A complete avatar description.
///
/// Every morph slider is a normalized value in `[0, 100]`. Clothing is kept as
/// an ordered set of catalog id strings; ids that are not in the catalog are
/// stored verbatim and ignored when the avatar is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarProfile {
    /// Profile id (lowercase letters, digits, `_` and `-`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Macro morphs (gender, age, build, ethnicity blend).
    pub macro_morphs: MacroMorphs,
    pub face: FaceMorphs,
    pub torso: TorsoMorphs,
    pub arms: ArmMorphs,
    pub legs: LegMorphs,
    pub materials: Materials,
    /// Equipped clothing catalog ids.
    pub clothing: BTreeSet<String>,
    /// Hair catalog id; `None` means bald.
    pub hair: Option<String>,
    pub facial_hair: FacialHairStyle,
    pub features: FaceFeatures,
    pub accessories: Accessories,
}

impl Default for AvatarProfile {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_ID, "New Avatar")
    }
}

impl AvatarProfile {
    /// Creates a profile with neutral sliders and default styling.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            macro_morphs: MacroMorphs::default(),
            face: FaceMorphs::default(),
            torso: TorsoMorphs::default(),
            arms: ArmMorphs::default(),
            legs: LegMorphs::default(),
            materials: Materials::default(),
            clothing: BTreeSet::new(),
            hair: Some(DEFAULT_HAIR_ID.to_string()),
            facial_hair: FacialHairStyle::None,
            features: FaceFeatures::default(),
            accessories: Accessories::default(),
        }
    }

    /// Parses a profile from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the profile to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes the profile to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, ProfileError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Resets every parameter to its default, keeping id and name.
    pub fn reset(&mut self) {
        let fresh = Self::new(std::mem::take(&mut self.id), std::mem::take(&mut self.name));
        *self = fresh;
    }

    /// Equips a clothing id.
    ///
    /// Catalog items replace whatever occupies a conflicting slot and are stored
    /// under their canonical id. Unknown ids are stored verbatim. Returns the ids
    /// that were removed.
    pub fn equip(&mut self, id: &str) -> Vec<String> {
        let id = id.trim();
        if id.is_empty() {
            return Vec::new();
        }
        let Some(item) = ClothingItem::from_catalog_id(id) else {
            self.clothing.insert(id.to_string());
            return Vec::new();
        };

        let removed: Vec<String> = self
            .clothing
            .iter()
            .filter(|existing| {
                ClothingItem::from_catalog_id(existing)
                    .map(|other| other != item && other.slot().conflicts_with(item.slot()))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        for old in &removed {
            self.clothing.remove(old);
        }
        self.clothing.insert(item.catalog_id().to_string());
        removed
    }

    /// Removes a clothing id (verbatim or via its canonical catalog id).
    pub fn unequip(&mut self, id: &str) -> bool {
        let id = id.trim();
        if self.clothing.remove(id) {
            return true;
        }
        match ClothingItem::from_catalog_id(id) {
            Some(item) => {
                let canonical = item.catalog_id();
                let aliased: Vec<String> = self
                    .clothing
                    .iter()
                    .filter(|c| ClothingItem::from_catalog_id(c) == Some(item))
                    .cloned()
                    .collect();
                let mut removed = self.clothing.remove(canonical);
                for alias in aliased {
                    removed |= self.clothing.remove(&alias);
                }
                removed
            }
            None => false,
        }
    }

    /// Replaces all equipped clothing with an outfit preset.
    pub fn apply_outfit(&mut self, preset: OutfitPreset) {
        self.clothing.clear();
        for item in preset.items() {
            self.equip(item.catalog_id());
        }
    }

    /// Equipped items that exist in the catalog.
    pub fn equipped_items(&self) -> Vec<ClothingItem> {
        self.clothing
            .iter()
            .filter_map(|id| ClothingItem::from_catalog_id(id))
            .collect()
    }

    /// Selects a hair style by catalog id; `None` clears it.
    pub fn set_hair(&mut self, id: Option<&str>) {
        self.hair = id.map(|s| s.trim().to_string());
    }

    /// Hair style if the id is set and known.
    pub fn hair_style(&self) -> Option<HairStyle> {
        self.hair.as_deref().and_then(HairStyle::from_catalog_id)
    }

    /// Reads a slider by group and name.
    pub fn morph(&self, group: MorphGroup, name: &str) -> Option<f64> {
        match group {
            MorphGroup::Macro => self.macro_morphs.get(name),
            MorphGroup::Face => self.face.get(name),
            MorphGroup::Torso => self.torso.get(name),
            MorphGroup::Arms => self.arms.get(name),
            MorphGroup::Legs => self.legs.get(name),
        }
    }

    /// Sets a slider by group and name.
    pub fn set_morph(
        &mut self,
        group: MorphGroup,
        name: &str,
        value: f64,
    ) -> Result<(), ProfileError> {
        let known = match group {
            MorphGroup::Macro => self.macro_morphs.set(name, value),
            MorphGroup::Face => self.face.set(name, value),
            MorphGroup::Torso => self.torso.set(name, value),
            MorphGroup::Arms => self.arms.set(name, value),
            MorphGroup::Legs => self.legs.set(name, value),
        };
        if known {
            Ok(())
        } else {
            Err(ProfileError::UnknownMorph(format!(
                "{}.{}",
                group.field_name(),
                name
            )))
        }
    }

    /// `(name, value)` pairs of one group in declaration order.
    pub fn morph_entries(&self, group: MorphGroup) -> Vec<(&'static str, f64)> {
        match group {
            MorphGroup::Macro => self.macro_morphs.entries(),
            MorphGroup::Face => self.face.entries(),
            MorphGroup::Torso => self.torso.entries(),
            MorphGroup::Arms => self.arms.entries(),
            MorphGroup::Legs => self.legs.entries(),
        }
    }

    /// Every slider as `(group, name, value)`.
    pub fn all_morphs(&self) -> Vec<(MorphGroup, &'static str, f64)> {
        MorphGroup::ALL
            .iter()
            .flat_map(|group| {
                self.morph_entries(*group)
                    .into_iter()
                    .map(move |(name, value)| (*group, name, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_equip_replaces_same_slot() {
        let mut profile = AvatarProfile::default();
        profile.equip("shirt01");
        let removed = profile.equip("hoodie01");
        assert_eq!(removed, vec!["shirt01".to_string()]);
        assert!(profile.clothing.contains("hoodie01"));
        assert!(!profile.clothing.contains("shirt01"));
    }

    #[test]
    fn test_equip_full_body_clears_upper_and_lower() {
        let mut profile = AvatarProfile::default();
        profile.apply_outfit(OutfitPreset::Casual);
        profile.equip("worksuit01");
        let ids: Vec<&str> = profile.clothing.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["sneakers01", "worksuit01"]);
    }

    #[test]
    fn test_equip_alias_stores_canonical_id() {
        let mut profile = AvatarProfile::default();
        profile.equip("t_shirt");
        assert!(profile.clothing.contains("shirt01"));
        assert!(profile.unequip("shirt"));
        assert!(profile.clothing.is_empty());
    }

    #[test]
    fn test_unknown_clothing_is_kept_verbatim() {
        let mut profile = AvatarProfile::default();
        profile.equip("nonexistent_item");
        assert!(profile.clothing.contains("nonexistent_item"));
        assert!(profile.equipped_items().is_empty());
    }

    #[test]
    fn test_set_morph() {
        let mut profile = AvatarProfile::default();
        profile.set_morph(MorphGroup::Torso, "hip_width", 70.0).unwrap();
        assert_eq!(profile.torso.hip_width, 70.0);
        assert_eq!(profile.morph(MorphGroup::Torso, "hip_width"), Some(70.0));
        assert!(matches!(
            profile.set_morph(MorphGroup::Face, "tail", 1.0),
            Err(ProfileError::UnknownMorph(_))
        ));
    }

    #[test]
    fn test_reset_keeps_identity() {
        let mut profile = AvatarProfile::new("hero", "Hero");
        profile.macro_morphs.height = 90.0;
        profile.equip("boots01");
        profile.set_hair(None);
        profile.reset();
        assert_eq!(profile, AvatarProfile::new("hero", "Hero"));
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        let mut profile = AvatarProfile::new("hero", "Hero");
        profile.face.nose_width = 12.345;
        profile.apply_outfit(OutfitPreset::Formal);
        profile.features.teeth = TeethType::Gold;
        let json = profile.to_json_pretty().unwrap();
        assert_eq!(AvatarProfile::from_json(&json).unwrap(), profile);
    }

    #[test]
    fn test_null_hair_is_bald() {
        let profile = AvatarProfile::from_json(r#"{"id":"x1","hair":null}"#).unwrap();
        assert_eq!(profile.hair, None);
        let profile = AvatarProfile::from_json(r#"{"id":"x1"}"#).unwrap();
        assert_eq!(profile.hair.as_deref(), Some(DEFAULT_HAIR_ID));
    }

    #[test]
    fn test_missing_accessories_take_defaults() {
        let profile = AvatarProfile::from_json(r#"{"id":"x1"}"#).unwrap();
        assert_eq!(profile.accessories, Accessories::default());
        let profile =
            AvatarProfile::from_json(r#"{"id":"x1","accessories":{"glasses":"none"}}"#).unwrap();
        assert_eq!(profile.accessories.glasses, crate::catalog::Glasses::None);
        assert_eq!(profile.accessories.watch, crate::catalog::Watch::Silver);
    }

    #[test]
    fn test_all_morphs_covers_every_group() {
        let profile = AvatarProfile::default();
        assert_eq!(profile.all_morphs().len(), 9 + 40 + 14 + 9 + 9);
    }
}
