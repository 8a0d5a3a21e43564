//! Loading profiles, configuration, and the store location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use omniavatar_engine::EngineConfig;
use omniavatar_spec::AvatarProfile;
use tracing::debug;

/// Reads a profile JSON file.
pub fn load_profile(path: &Path) -> Result<AvatarProfile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile: {}", path.display()))?;
    let profile = AvatarProfile::from_json(&text)
        .with_context(|| format!("Failed to parse profile: {}", path.display()))?;
    debug!("loaded profile '{}' from {}", profile.id, path.display());
    Ok(profile)
}

/// Writes a profile as pretty JSON, creating parent directories.
pub fn write_profile(profile: &AvatarProfile, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let json = profile.to_json_pretty()?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write profile: {}", path.display()))
}

/// Loads the engine config from `--config`, or defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Default location of the saved-avatar file.
pub fn default_store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("omniavatar").join("avatars.json"))
}

/// Resolves `--store`, falling back to [`default_store_path`].
pub fn store_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_store_path().context("Failed to determine data directory; pass --store"),
    }
}
