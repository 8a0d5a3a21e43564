//! Engine configuration.

use std::path::Path;

use omniavatar_spec::HairStyle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Main engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub clothing: ClothingConfig,
    pub tessellation: TessellationConfig,
    pub render: RenderConfig,
    pub hair: HairConfig,
}

/// Garment fitting settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothingConfig {
    /// Distance garments sit outside the skin, in meters.
    pub clearance: f64,
}

impl Default for ClothingConfig {
    fn default() -> Self {
        Self { clearance: 0.008 }
    }
}

/// Mesh tessellation used by the OBJ/GLTF/GLB exporters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TessellationConfig {
    /// Latitude rings per sphere / cap.
    pub rings: u32,
    /// Segments around every round primitive.
    pub segments: u32,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            rings: 12,
            segments: 16,
        }
    }
}

/// PNG screenshot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Background color as `#RRGGBB`.
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 512,
            background: "#20232A".to_string(),
        }
    }
}

/// Hair resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HairConfig {
    /// Style used when a profile names an unknown hair id.
    pub fallback_style: HairStyle,
}

impl Default for HairConfig {
    fn default() -> Self {
        Self {
            fallback_style: HairStyle::Crew,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!("loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from a JSON string and validates it.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let clearance = self.clothing.clearance;
        if !clearance.is_finite() || !(0.0..=0.05).contains(&clearance) {
            return Err(invalid(
                "clothing.clearance",
                format!("clearance must be between 0 and 0.05 m, got {}", clearance),
            ));
        }
        if self.tessellation.rings < 3 {
            return Err(invalid("tessellation.rings", "rings must be at least 3"));
        }
        if self.tessellation.segments < 3 {
            return Err(invalid("tessellation.segments", "segments must be at least 3"));
        }
        for (field, value) in [
            ("render.width", self.render.width),
            ("render.height", self.render.height),
        ] {
            if !(16..=4096).contains(&value) {
                return Err(invalid(
                    field,
                    format!("render size must be between 16 and 4096, got {}", value),
                ));
            }
        }
        if omniavatar_spec::Rgb::from_hex(&self.render.background).is_none() {
            return Err(invalid(
                "render.background",
                format!("'{}' is not a hex color", self.render.background),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}
