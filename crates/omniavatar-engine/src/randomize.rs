//! Seeded random avatars.
//!
//! Each concern (sliders, materials, styles, accessories) draws from its own PCG32
//! sub-stream so adding a draw to one concern leaves the others unchanged.

use omniavatar_spec::{
    derive_variant_seed, AvatarProfile, EyeType, EyebrowType, EyelashType, FacialHairStyle,
    Glasses, HairStyle, MorphGroup, OutfitPreset, TeethType, TextureStyle, Watch,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use tracing::debug;

/// Sliders are drawn from this range so random avatars stay away from extremes.
pub const RANDOM_SLIDER_RANGE: (f64, f64) = (10.0, 90.0);

const SKIN_TONES: [&str; 8] = [
    "#FFDBAC", "#F1C27D", "#E0AC69", "#C68642", "#8D5524", "#6B4423", "#4A2C17", "#3B2219",
];
const HAIR_COLORS: [&str; 7] = [
    "#1A1A1A", "#3B2314", "#6A4E42", "#B89778", "#E6CEA8", "#A52A2A", "#9E9E9E",
];
const EYE_COLORS: [&str; 5] = ["#3D2314", "#634E34", "#2E536F", "#3D671D", "#7A7A7A"];

/// PCG32 wrapper with a fixed seed expansion.
#[derive(Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// The 32-bit seed is duplicated into both halves of the 64-bit state seed.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// An independent generator for a named sub-stream.
    pub fn stream(base_seed: u32, name: &str) -> Self {
        Self::new(derive_variant_seed(base_seed, name))
    }

    #[inline]
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.inner.gen_range(0..items.len())]
    }
}

/// Builds a random but reproducible profile.
pub fn randomize_profile(seed: u32) -> AvatarProfile {
    let mut profile = AvatarProfile::new(format!("random-{seed}"), format!("Random {seed}"));

    let mut sliders = DeterministicRng::stream(seed, "morphs");
    let (lo, hi) = RANDOM_SLIDER_RANGE;
    for (group, name, _) in profile.all_morphs() {
        let value = sliders.gen_range(lo..=hi);
        // Names come from the profile itself, so the lookup cannot miss.
        let _ = profile.set_morph(group, name, value);
    }
    // Ethnicity weights get their own draw so a blend is always present.
    let mut ethnicity = DeterministicRng::stream(seed, "ethnicity");
    for name in ["african", "asian", "caucasian"] {
        let _ = profile.set_morph(MorphGroup::Macro, name, ethnicity.gen_range(lo..=hi));
    }

    let mut materials = DeterministicRng::stream(seed, "materials");
    profile.materials.skin_tone = materials.pick(&SKIN_TONES).to_string();
    profile.materials.hair_color = materials.pick(&HAIR_COLORS).to_string();
    profile.materials.eye_color = materials.pick(&EYE_COLORS).to_string();
    profile.materials.texture_style = *materials.pick(&[
        TextureStyle::Realistic,
        TextureStyle::Stylized,
        TextureStyle::Anime,
        TextureStyle::Cartoon,
    ]);
    profile.materials.roughness = materials.gen_range(lo..=hi);

    let mut style = DeterministicRng::stream(seed, "style");
    let haired: Vec<HairStyle> = HairStyle::ALL
        .into_iter()
        .filter(|h| !h.is_bald())
        .collect();
    let hair = *style.pick(&haired);
    profile.set_hair(Some(hair.catalog_id()));
    profile.apply_outfit(*style.pick(&OutfitPreset::ALL));
    profile.facial_hair = *style.pick(&FacialHairStyle::ALL);

    let mut face = DeterministicRng::stream(seed, "features");
    profile.features.eye = *face.pick(&EyeType::ALL);
    profile.features.teeth = *face.pick(&TeethType::ALL);
    profile.features.eyebrow = *face.pick(&EyebrowType::ALL);
    profile.features.eyelash = *face.pick(&EyelashType::ALL);

    let mut accessories = DeterministicRng::stream(seed, "accessories");
    profile.accessories.glasses = *accessories.pick(&Glasses::ALL);
    profile.accessories.watch = *accessories.pick(&Watch::ALL);

    debug!("randomized profile from seed {} with hair '{}'", seed, hair);
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use omniavatar_spec::validate_profile;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_same_seed_same_profile() {
        assert_eq!(randomize_profile(7), randomize_profile(7));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(
            randomize_profile(1).all_morphs(),
            randomize_profile(2).all_morphs()
        );
    }

    #[test]
    fn test_sliders_within_random_range() {
        for seed in 0..20 {
            let profile = randomize_profile(seed);
            for (group, name, value) in profile.all_morphs() {
                assert!(
                    (10.0..=90.0).contains(&value),
                    "{:?}.{} = {} for seed {}",
                    group,
                    name,
                    value,
                    seed
                );
            }
        }
    }

    #[test]
    fn test_random_profiles_validate_and_have_hair() {
        for seed in 0..20 {
            let profile = randomize_profile(seed);
            assert!(validate_profile(&profile).is_ok(), "seed {}", seed);
            let hair = profile.hair_style().unwrap();
            assert!(!hair.is_bald());
            assert!(!profile.equipped_items().is_empty());
        }
    }

    #[test]
    fn test_random_accessories_cover_the_catalog() {
        let glasses: std::collections::HashSet<Glasses> =
            (0..64).map(|seed| randomize_profile(seed).accessories.glasses).collect();
        assert!(glasses.len() > 1);
        assert!(glasses.iter().all(|g| Glasses::ALL.contains(g)));
    }

    #[test]
    fn test_streams_are_independent() {
        let mut a = DeterministicRng::stream(42, "morphs");
        let mut b = DeterministicRng::stream(42, "style");
        let xs: Vec<f64> = (0..4).map(|_| a.gen_f64()).collect();
        let ys: Vec<f64> = (0..4).map(|_| b.gen_f64()).collect();
        assert_ne!(xs, ys);
    }
}
