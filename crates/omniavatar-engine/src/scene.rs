//! Scene composition and the handle shared between renderer and exporter.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use omniavatar_spec::{
    canonical_profile_hash, AvatarProfile, ClothingItem, HairStyle, Materials, ProfileError, Rgb,
    TextureStyle,
};
use serde::Serialize;
use tracing::debug;

use crate::accessories::resolve_accessories;
use crate::clothing::{fit_clothing, select_layers, LayerSelection};
use crate::config::EngineConfig;
use crate::dimensions::{compute_dimensions, BodyDimensions};
use crate::geometry::{assemble_body, BodyPart, MaterialRef, Node, WorldPrimitive};
use crate::hair::{resolve_facial_hair, resolve_hair};
use crate::math::Aabb;
use crate::pose::JointRotations;

/// Surface description for one material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaletteEntry {
    pub color: Rgb,
    pub roughness: f64,
    pub metallic: f64,
}

/// A posed, dressed avatar ready to draw or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub root: Node,
    /// Keyed by [`MaterialRef::key`]; only materials in use appear.
    pub palette: BTreeMap<String, PaletteEntry>,
    pub dimensions: BodyDimensions,
    pub rotations: JointRotations,
    pub layers: LayerSelection,
    /// Hair style actually drawn, after fallback.
    pub hair_style: Option<HairStyle>,
}

/// Builds the scene for a profile in a given pose.
///
/// The scene depends only on what is drawn: clothing ids outside the catalog
/// leave it unchanged.
pub fn compose_scene(
    profile: &AvatarProfile,
    rotations: &JointRotations,
    config: &EngineConfig,
) -> Scene {
    let dimensions = compute_dimensions(profile);
    let mut root = assemble_body(&dimensions, &profile.features);

    let fallback = config.hair.fallback_style;
    let hair_style = match profile.hair.as_deref() {
        None => None,
        Some(id) => Some(HairStyle::from_catalog_id(id).unwrap_or(fallback)).filter(|s| !s.is_bald()),
    };
    let mut head_extras = resolve_hair(profile.hair.as_deref(), &dimensions.head, fallback);
    head_extras.extend(resolve_facial_hair(
        profile.facial_hair,
        &dimensions.head,
        &dimensions.face,
    ));
    root.attach(BodyPart::Head, head_extras);

    for (part, primitives) in resolve_accessories(
        &profile.accessories,
        &dimensions.head,
        &dimensions.face,
        &dimensions.arms,
    ) {
        root.attach(part, primitives);
    }

    let layers = select_layers(&profile.clothing);
    for garment in fit_clothing(&profile.clothing, &dimensions, config.clothing.clearance) {
        for piece in garment.pieces {
            root.attach(piece.part, piece.primitives);
        }
    }

    let rotations = rotations.sanitized();
    rotations.apply_to(&mut root);

    let palette = build_palette(&root, &profile.materials);
    debug!(
        "composed scene for '{}' with {} primitives",
        profile.id,
        root.primitive_count()
    );

    Scene {
        root,
        palette,
        dimensions,
        rotations,
        layers,
        hair_style,
    }
}

fn build_palette(root: &Node, materials: &Materials) -> BTreeMap<String, PaletteEntry> {
    let roughness = match materials.texture_style {
        TextureStyle::Realistic | TextureStyle::Stylized => materials.roughness_factor(),
        // Flat-shaded styles ignore the slider.
        TextureStyle::Anime | TextureStyle::Cartoon => 1.0,
    };
    let mut palette = BTreeMap::new();
    for p in root.flatten() {
        let material = p.primitive.material;
        palette
            .entry(material.key())
            .or_insert_with(|| palette_entry(material, materials, roughness));
    }
    palette
}

fn palette_entry(material: MaterialRef, materials: &Materials, roughness: f64) -> PaletteEntry {
    let fixed = |hex: &str| Rgb::from_hex_or(hex, Rgb::new(0.5, 0.5, 0.5));
    let (color, roughness, metallic) = match material {
        MaterialRef::Skin => (materials.skin_rgb(), roughness, 0.0),
        MaterialRef::Hair => (materials.hair_rgb(), roughness.max(0.4), 0.0),
        MaterialRef::EyeWhite => (fixed("#F5F5F0"), 0.2, 0.0),
        MaterialRef::Iris => (materials.eye_rgb(), 0.2, 0.0),
        MaterialRef::Pupil => (fixed("#0A0A0A"), 0.1, 0.0),
        MaterialRef::Lip => (materials.skin_rgb().scaled(0.8), roughness * 0.8, 0.0),
        MaterialRef::Tooth => (fixed("#F0EDE4"), 0.3, 0.0),
        MaterialRef::Gold => (fixed("#D4AF37"), 0.25, 1.0),
        MaterialRef::Metal => (fixed("#A8A9AD"), 0.3, 1.0),
        MaterialRef::Garment(item) => (fixed(item.base_color()), 0.8, 0.0),
    };
    PaletteEntry {
        color,
        roughness,
        metallic,
    }
}

/// Counts and bounds describing a scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub profile_id: String,
    pub profile_hash: String,
    pub primitive_count: usize,
    pub bounds: Aabb,
    pub hair_style: Option<HairStyle>,
    pub garments: Vec<ClothingItem>,
    /// Primitive count per body part.
    pub parts: BTreeMap<String, usize>,
}

impl Scene {
    pub fn flatten(&self) -> Vec<WorldPrimitive> {
        self.root.flatten()
    }

    pub fn bounds(&self) -> Aabb {
        self.root.bounds()
    }

    pub fn primitive_count(&self) -> usize {
        self.root.primitive_count()
    }

    /// Summarizes the scene composed from `profile`.
    pub fn summary(&self, profile: &AvatarProfile) -> Result<SceneSummary, ProfileError> {
        let mut parts = BTreeMap::new();
        self.root.walk(&mut |node, _| {
            parts.insert(node.part.name().to_string(), node.primitives.len());
        });
        Ok(SceneSummary {
            profile_id: profile.id.clone(),
            profile_hash: canonical_profile_hash(profile)?,
            primitive_count: self.primitive_count(),
            bounds: self.bounds(),
            hair_style: self.hair_style,
            garments: self.layers.items(),
            parts,
        })
    }
}

/// Handle through which a renderer publishes the live scene and an exporter
/// reads it. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct SceneHandle {
    slot: Arc<RwLock<Option<Arc<Scene>>>>,
}

impl SceneHandle {
    /// A handle with no scene published yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A handle already holding `scene`.
    pub fn with_scene(scene: Scene) -> Self {
        let handle = Self::empty();
        handle.publish(scene);
        handle
    }

    /// Replaces the published scene.
    pub fn publish(&self, scene: Scene) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::new(scene));
    }

    /// The published scene, if any.
    pub fn get(&self) -> Option<Arc<Scene>> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    pub fn is_ready(&self) -> bool {
        self.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scene_for(profile: &AvatarProfile) -> Scene {
        compose_scene(profile, &JointRotations::tpose(), &EngineConfig::default())
    }

    #[test]
    fn test_hair_and_garments_attach_to_parts() {
        let mut profile = AvatarProfile::default();
        profile.set_hair(Some("afro"));
        profile.equip("hoodie01");
        let scene = scene_for(&profile);
        let head = scene.root.primitive_names(BodyPart::Head);
        assert!(head.contains(&"afro"));
        let chest = scene.root.primitive_names(BodyPart::Chest);
        assert!(chest.contains(&"hoodie01_hood"));
        assert!(scene.palette.contains_key("garment_hoodie01"));
        assert_eq!(scene.hair_style, Some(HairStyle::Afro));
    }

    #[test]
    fn test_bald_scene_has_no_hair_material() {
        let mut profile = AvatarProfile::default();
        profile.set_hair(None);
        profile.features.eyebrow = omniavatar_spec::EyebrowType::None;
        profile.features.eyelash = omniavatar_spec::EyelashType::None;
        let scene = scene_for(&profile);
        assert!(!scene.palette.contains_key("hair"));
        assert_eq!(scene.hair_style, None);
    }

    #[test]
    fn test_rotations_reach_joint_nodes() {
        let profile = AvatarProfile::default();
        let scene = scene_for(&profile);
        let arm = scene.root.find(BodyPart::LeftUpperArm).unwrap();
        assert_eq!(arm.rotation, [0.0, 0.0, std::f64::consts::FRAC_PI_2]);
    }

    #[test]
    fn test_handle_publish_and_clear() {
        let handle = SceneHandle::empty();
        assert!(!handle.is_ready());
        let shared = handle.clone();
        shared.publish(scene_for(&AvatarProfile::default()));
        assert!(handle.is_ready());
        handle.clear();
        assert!(shared.get().is_none());
    }

    #[test]
    fn test_summary_counts_every_primitive() {
        let profile = AvatarProfile::default();
        let summary = scene_for(&profile).summary(&profile).unwrap();
        assert_eq!(summary.parts.values().sum::<usize>(), summary.primitive_count);
        assert_eq!(summary.parts.len(), 17);
        assert_eq!(summary.profile_hash, canonical_profile_hash(&profile).unwrap());
    }

    #[test]
    fn test_unknown_clothing_id_leaves_scene_equal() {
        let profile = AvatarProfile::default();
        let mut stale = profile.clone();
        stale.equip("retired_jacket");
        assert_eq!(scene_for(&profile), scene_for(&stale));
        let summary = scene_for(&stale).summary(&stale).unwrap();
        assert_ne!(summary.profile_hash, canonical_profile_hash(&profile).unwrap());
    }

    #[test]
    fn test_accessories_attach_to_head_and_wrist() {
        let mut profile = AvatarProfile::default();
        let scene = scene_for(&profile);
        assert!(scene.root.primitive_names(BodyPart::Head).contains(&"glasses_bridge"));
        assert!(scene
            .root
            .primitive_names(BodyPart::LeftForearm)
            .contains(&"watch_band"));
        assert!(scene.palette.contains_key("metal"));

        profile.accessories = omniavatar_spec::Accessories::none();
        let bare = scene_for(&profile);
        assert!(!bare.palette.contains_key("metal"));
        let names: Vec<String> = bare.flatten().into_iter().map(|p| p.primitive.name).collect();
        assert!(!names.iter().any(|n| n.starts_with("glasses") || n.starts_with("watch")));
    }
}
