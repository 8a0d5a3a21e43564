//! Profile validation.
//!
//! Validation never fails outright: it collects every problem into a
//! [`ValidationResult`] so callers can report all of them at once.

use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::{ClothingItem, HairStyle};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::pose::PoseState;
use crate::profile::{AvatarProfile, Rgb, SLIDER_MAX, SLIDER_MIN};

/// Regex pattern for valid profile ids.
/// Format: starts with a lowercase letter or digit, followed by up to 63 lowercase
/// letters, digits, underscores, or hyphens.
const PROFILE_ID_PATTERN: &str = r"^[a-z0-9][a-z0-9_-]{0,63}$";

static PROFILE_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn profile_id_regex() -> &'static Regex {
    PROFILE_ID_REGEX.get_or_init(|| Regex::new(PROFILE_ID_PATTERN).expect("invalid regex pattern"))
}

/// Returns true if `id` is a valid profile id.
pub fn is_valid_profile_id(id: &str) -> bool {
    profile_id_regex().is_match(id)
}

/// Validates a profile and returns a validation result.
///
/// # Example
/// ```
/// use omniavatar_spec::{AvatarProfile, validation::validate_profile};
///
/// let profile = AvatarProfile::new("hero-01", "Hero");
/// assert!(validate_profile(&profile).is_ok());
/// ```
pub fn validate_profile(profile: &AvatarProfile) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_id(profile, &mut result);
    validate_sliders(profile, &mut result);
    validate_colors(profile, &mut result);
    validate_clothing(profile, &mut result);

    check_warnings(profile, &mut result);

    result
}

/// Validates a pose state snapshot.
pub fn validate_pose_state(state: &PoseState) -> ValidationResult {
    let mut result = ValidationResult::default();
    if !state.playback_speed.is_finite() || state.playback_speed < 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidPlaybackSpeed,
            format!(
                "playback_speed must be a finite non-negative number, got {}",
                state.playback_speed
            ),
            "playback_speed",
        ));
    }
    if !state.elapsed_time.is_finite() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NonFiniteElapsedTime,
            "elapsed_time must be finite",
            "elapsed_time",
        ));
    }
    result
}

fn validate_id(profile: &AvatarProfile, result: &mut ValidationResult) {
    if !is_valid_profile_id(&profile.id) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidProfileId,
            format!(
                "id must match pattern '{}', got '{}'",
                PROFILE_ID_PATTERN, profile.id
            ),
            "id",
        ));
    }
}

fn validate_sliders(profile: &AvatarProfile, result: &mut ValidationResult) {
    for (group, name, value) in profile.all_morphs() {
        let path = format!("{}.{}", group.field_name(), name);
        if !value.is_finite() {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteSlider,
                format!("slider value {} is not finite", value),
                path,
            ));
        } else if !(SLIDER_MIN..=SLIDER_MAX).contains(&value) {
            result.add_error(ValidationError::with_path(
                ErrorCode::SliderOutOfRange,
                format!(
                    "value {} is outside [{}, {}]",
                    value, SLIDER_MIN, SLIDER_MAX
                ),
                path,
            ));
        }
    }

    let roughness = profile.materials.roughness;
    if !roughness.is_finite() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NonFiniteSlider,
            format!("slider value {} is not finite", roughness),
            "materials.roughness",
        ));
    } else if !(SLIDER_MIN..=SLIDER_MAX).contains(&roughness) {
        result.add_error(ValidationError::with_path(
            ErrorCode::SliderOutOfRange,
            format!(
                "value {} is outside [{}, {}]",
                roughness, SLIDER_MIN, SLIDER_MAX
            ),
            "materials.roughness",
        ));
    }
}

fn validate_colors(profile: &AvatarProfile, result: &mut ValidationResult) {
    for (field, value) in profile.materials.color_fields() {
        if Rgb::from_hex(value).is_none() {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidColor,
                format!("'{}' is not a #RRGGBB or #RGB color", value),
                format!("materials.{}", field),
            ));
        }
    }
}

fn validate_clothing(profile: &AvatarProfile, result: &mut ValidationResult) {
    let items = profile.equipped_items();
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            if a.slot().conflicts_with(b.slot()) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::ClothingSlotConflict,
                    format!("'{}' and '{}' occupy conflicting slots", a, b),
                    "clothing",
                ));
            }
        }
    }
}

fn check_warnings(profile: &AvatarProfile, result: &mut ValidationResult) {
    if let Some(ref hair) = profile.hair {
        if HairStyle::from_catalog_id(hair).is_none() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::UnknownHairId,
                format!("hair id '{}' is not in the catalog; the default style is used", hair),
                "hair",
            ));
        }
    }

    for id in &profile.clothing {
        if ClothingItem::from_catalog_id(id).is_none() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::UnknownClothingId,
                format!("clothing id '{}' is not in the catalog and is ignored", id),
                "clothing",
            ));
        }
    }

    if profile.name.trim().is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptyName,
            "profile name is empty",
            "name",
        ));
    }

    let m = &profile.macro_morphs;
    if m.african == 0.0 && m.asian == 0.0 && m.caucasian == 0.0 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::ZeroEthnicityBlend,
            "all ethnicity sliders are zero; an even blend is used",
            "macro_morphs",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        let result = validate_profile(&AvatarProfile::default());
        assert!(result.is_ok(), "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_out_of_range_slider() {
        let mut profile = AvatarProfile::default();
        profile.macro_morphs.height = 120.0;
        profile.face.eye_size = -1.0;
        let result = validate_profile(&profile);
        assert_eq!(result.errors.len(), 2);
        assert!(result.has_error(ErrorCode::SliderOutOfRange));
        assert_eq!(result.errors[0].path.as_deref(), Some("macro_morphs.height"));
    }

    #[test]
    fn test_non_finite_slider() {
        let mut profile = AvatarProfile::default();
        profile.legs.calf_size = f64::NAN;
        let result = validate_profile(&profile);
        assert!(result.has_error(ErrorCode::NonFiniteSlider));
    }

    #[test]
    fn test_slot_conflict_from_raw_json() {
        let profile =
            AvatarProfile::from_json(r#"{"id":"a1","clothing":["suit01","shirt01"]}"#).unwrap();
        let result = validate_profile(&profile);
        assert!(result.has_error(ErrorCode::ClothingSlotConflict));
    }

    #[test]
    fn test_invalid_id_and_color() {
        let mut profile = AvatarProfile::new("Bad Id", "x");
        profile.materials.eye_color = "blue".to_string();
        let result = validate_profile(&profile);
        assert!(result.has_error(ErrorCode::InvalidProfileId));
        assert!(result.has_error(ErrorCode::InvalidColor));
    }

    #[test]
    fn test_warnings() {
        let mut profile = AvatarProfile::new("a1", " ");
        profile.hair = Some("mullet".to_string());
        profile.equip("nonexistent_item");
        profile.macro_morphs.african = 0.0;
        profile.macro_morphs.asian = 0.0;
        profile.macro_morphs.caucasian = 0.0;
        let result = validate_profile(&profile);
        assert!(result.is_ok());
        assert!(result.has_warning(WarningCode::UnknownHairId));
        assert!(result.has_warning(WarningCode::UnknownClothingId));
        assert!(result.has_warning(WarningCode::EmptyName));
        assert!(result.has_warning(WarningCode::ZeroEthnicityBlend));
    }

    #[test]
    fn test_pose_state_speed() {
        let state = PoseState {
            playback_speed: -1.0,
            ..PoseState::default()
        };
        assert!(validate_pose_state(&state).has_error(ErrorCode::InvalidPlaybackSpeed));
        assert!(validate_pose_state(&PoseState::default()).is_ok());
    }

    #[test]
    fn test_pose_state_elapsed_time() {
        let state = PoseState {
            elapsed_time: f64::INFINITY,
            ..PoseState::default()
        };
        let result = validate_pose_state(&state);
        assert!(result.has_error(ErrorCode::NonFiniteElapsedTime));
        assert!(!result.has_error(ErrorCode::NonFiniteSlider));
    }
}
