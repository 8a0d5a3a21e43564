//! Material colors and surface settings.

use serde::{Deserialize, Serialize};

/// Default skin tone.
pub const DEFAULT_SKIN_TONE: &str = "#8D5524";
/// Default hair color.
pub const DEFAULT_HAIR_COLOR: &str = "#1A1A1A";
/// Default iris color.
pub const DEFAULT_EYE_COLOR: &str = "#3D2314";

/// Linear RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Creates a color from components in [0, 1].
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `#RGB` (leading `#` optional, case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f64 / 255.0);
        match digits.len() {
            6 => Some(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |c: &str| channel(&c.repeat(2));
                Some(Self::new(
                    expand(&digits[0..1])?,
                    expand(&digits[1..2])?,
                    expand(&digits[2..3])?,
                ))
            }
            _ => None,
        }
    }

    /// Parses a hex color, falling back to `default` (which must be valid).
    pub fn from_hex_or(hex: &str, default: Rgb) -> Self {
        Self::from_hex(hex).unwrap_or(default)
    }

    /// Formats as `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Returns the color as an `[r, g, b]` array.
    pub fn to_array(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Scales every channel by `factor`, clamping to [0, 1].
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            (self.r * factor).clamp(0.0, 1.0),
            (self.g * factor).clamp(0.0, 1.0),
            (self.b * factor).clamp(0.0, 1.0),
        )
    }
}

/// Overall shading style of the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureStyle {
    #[default]
    Realistic,
    Stylized,
    Anime,
    Cartoon,
}

/// Material settings of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Materials {
    /// Skin tone as a hex color.
    pub skin_tone: String,
    /// Hair color as a hex color.
    pub hair_color: String,
    /// Iris color as a hex color.
    pub eye_color: String,
    /// Shading style.
    pub texture_style: TextureStyle,
    /// Surface roughness slider (0-100).
    pub roughness: f64,
}

impl Default for Materials {
    fn default() -> Self {
        Self {
            skin_tone: DEFAULT_SKIN_TONE.to_string(),
            hair_color: DEFAULT_HAIR_COLOR.to_string(),
            eye_color: DEFAULT_EYE_COLOR.to_string(),
            texture_style: TextureStyle::Realistic,
            roughness: 60.0,
        }
    }
}

impl Materials {
    /// Resolved skin color.
    pub fn skin_rgb(&self) -> Rgb {
        resolve(&self.skin_tone, DEFAULT_SKIN_TONE)
    }

    /// Resolved hair color.
    pub fn hair_rgb(&self) -> Rgb {
        resolve(&self.hair_color, DEFAULT_HAIR_COLOR)
    }

    /// Resolved iris color.
    pub fn eye_rgb(&self) -> Rgb {
        resolve(&self.eye_color, DEFAULT_EYE_COLOR)
    }

    /// Roughness mapped to [0, 1].
    pub fn roughness_factor(&self) -> f64 {
        if self.roughness.is_finite() {
            self.roughness.clamp(0.0, 100.0) / 100.0
        } else {
            0.6
        }
    }

    /// Returns `(field, value)` pairs for every color field.
    pub fn color_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("skin_tone", self.skin_tone.as_str()),
            ("hair_color", self.hair_color.as_str()),
            ("eye_color", self.eye_color.as_str()),
        ]
    }
}

fn resolve(hex: &str, fallback: &str) -> Rgb {
    Rgb::from_hex(hex)
        .or_else(|| Rgb::from_hex(fallback))
        .unwrap_or(Rgb::new(0.5, 0.5, 0.5))
}
