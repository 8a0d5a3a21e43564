//! OmniAvatar Profile Library
//!
//! This crate provides the data model of an OmniAvatar avatar: the
//! [`AvatarProfile`] with its normalized morph sliders, materials, clothing,
//! hair and face-feature selections, along with the style catalogs, profile
//! validation, canonical hashing, and saved-avatar persistence.
//!
//! Geometry lives in `omniavatar-engine`; nothing here depends on it.
//!
//! # Example
//!
//! ```
//! use omniavatar_spec::{AvatarProfile, MorphGroup, OutfitPreset};
//! use omniavatar_spec::validation::validate_profile;
//! use omniavatar_spec::hash::canonical_profile_hash;
//!
//! let mut profile = AvatarProfile::new("runner-01", "Runner");
//! profile.set_morph(MorphGroup::Macro, "muscle", 80.0).unwrap();
//! profile.apply_outfit(OutfitPreset::Streetwear);
//! profile.set_hair(Some("twists"));
//!
//! assert!(validate_profile(&profile).is_ok());
//! let hash = canonical_profile_hash(&profile).unwrap();
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`profile`]: The avatar profile and its morph groups
//! - [`catalog`]: Hair, clothing, facial hair, accessory, and outfit registries
//! - [`pose`]: Pose preset and animation clip ids
//! - [`validation`]: Profile validation functions
//! - [`hash`]: Canonical hashing and seed derivation
//! - [`store`]: Saved-avatar persistence

pub mod catalog;
pub mod error;
pub mod hash;
pub mod pose;
pub mod profile;
pub mod store;
pub mod validation;

// Re-export commonly used types at the crate root
pub use catalog::{
    Accessories, ClothingItem, ClothingSlot, FacialHairStyle, GarmentKind, Glasses, HairStyle,
    OutfitPreset, StrandArrangement, StrandLayout, Watch,
};
pub use error::{
    BackendError, ErrorCode, ProfileError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use hash::{canonical_profile_hash, canonical_value_hash, derive_variant_seed};
pub use pose::{AnimationClip, PosePreset, PoseState, PoseStateMode};
pub use profile::{
    ArmMorphs, AvatarProfile, EyeType, EyebrowType, EyelashType, FaceFeatures, FaceMorphs,
    LegMorphs, MacroMorphs, Materials, MorphGroup, Rgb, TeethType, TextureStyle, TorsoMorphs,
};
pub use store::{
    JsonFileProfileStore, MemoryProfileStore, ProfileStore, SavedAvatar, SavedAvatarRecord,
    SavedAvatarSummary, StoreError,
};
pub use validation::{is_valid_profile_id, validate_pose_state, validate_profile};
