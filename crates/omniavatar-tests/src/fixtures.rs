//! Profile fixtures and pipeline shortcuts shared by the integration tests.

use omniavatar_engine::{
    compose_scene, EngineConfig, ExportFormat, Exporter, JointRotations, PoseEngine, Scene,
    SceneHandle,
};
use omniavatar_spec::{AvatarProfile, MorphGroup, OutfitPreset};

/// Neutral profile with a fixed id.
pub fn neutral() -> AvatarProfile {
    AvatarProfile::new("fixture", "Fixture")
}

/// Profile with every slider set to `value`.
pub fn uniform(value: f64) -> AvatarProfile {
    let mut profile = neutral();
    let names: Vec<(MorphGroup, &'static str)> = profile
        .all_morphs()
        .into_iter()
        .map(|(group, name, _)| (group, name))
        .collect();
    for (group, name) in names {
        // Names come from the profile itself.
        let _ = profile.set_morph(group, name, value);
    }
    profile
}

/// Profile wearing an outfit preset.
pub fn dressed(preset: OutfitPreset) -> AvatarProfile {
    let mut profile = neutral();
    profile.apply_outfit(preset);
    profile
}

/// Profile with the given hair id.
pub fn with_hair(hair: Option<&str>) -> AvatarProfile {
    let mut profile = neutral();
    profile.set_hair(hair);
    profile
}

/// Profile with the given macro gender and weight.
pub fn body_shape(gender: f64, weight: f64) -> AvatarProfile {
    let mut profile = neutral();
    profile.macro_morphs.gender = gender;
    profile.macro_morphs.weight = weight;
    profile
}

/// Composes a scene with default configuration.
pub fn build_scene(profile: &AvatarProfile, rotations: &JointRotations) -> Scene {
    compose_scene(profile, rotations, &EngineConfig::default())
}

/// Composes a T-pose scene and exports it.
pub fn export_bytes(profile: &AvatarProfile, format: ExportFormat) -> Vec<u8> {
    export_posed(profile, &PoseEngine::new().rotations(), format)
}

/// Composes a scene in the given pose and exports it with a small render size.
pub fn export_posed(
    profile: &AvatarProfile,
    rotations: &JointRotations,
    format: ExportFormat,
) -> Vec<u8> {
    let mut config = EngineConfig::default();
    config.render.width = 48;
    config.render.height = 96;
    let scene = compose_scene(profile, rotations, &config);
    Exporter::new(config)
        .export(&SceneHandle::with_scene(scene), profile, format)
        .unwrap_or_else(|e| panic!("{} export failed: {}", format, e))
}
