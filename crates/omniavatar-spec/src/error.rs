//! Error types for profile validation and processing.

use thiserror::Error;

/// Error codes for profile validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Slider value outside [0, 100]
    SliderOutOfRange,
    /// E002: Slider value is NaN or infinite
    NonFiniteSlider,
    /// E003: Two equipped garments occupy the same slot
    ClothingSlotConflict,
    /// E004: Color string is not a valid hex color
    InvalidColor,
    /// E005: Profile id has an invalid format
    InvalidProfileId,
    /// E006: Playback speed is negative or non-finite
    InvalidPlaybackSpeed,
    /// E007: Animation elapsed time is NaN or infinite
    NonFiniteElapsedTime,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::SliderOutOfRange => "E001",
            ErrorCode::NonFiniteSlider => "E002",
            ErrorCode::ClothingSlotConflict => "E003",
            ErrorCode::InvalidColor => "E004",
            ErrorCode::InvalidProfileId => "E005",
            ErrorCode::InvalidPlaybackSpeed => "E006",
            ErrorCode::NonFiniteElapsedTime => "E007",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for profile validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Hair id is not in the catalog (falls back to the default style)
    UnknownHairId,
    /// W002: Clothing id is not in the catalog (ignored)
    UnknownClothingId,
    /// W003: Profile name is empty
    EmptyName,
    /// W004: All ethnicity sliders are zero (treated as an even blend)
    ZeroEthnicityBlend,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::UnknownHairId => "W001",
            WarningCode::UnknownClothingId => "W002",
            WarningCode::EmptyName => "W003",
            WarningCode::ZeroEthnicityBlend => "W004",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "face.eye_size").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Profile validation failed with one or more errors.
    #[error("profile validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Unknown morph group or slider name.
    #[error("unknown morph slider: {0}")]
    UnknownMorph(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of profile validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns true if any error carries the given code.
    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Returns true if any warning carries the given code.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for errors crossing the exporter and persistence boundaries.
///
/// Each collaborator error type implements this trait so callers can report
/// failures with a stable code and group them by category.
///
/// # Example
///
/// ```ignore
/// use omniavatar_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Stable error code such as "EXPORT_001" or "STORE_002".
    fn code(&self) -> &'static str;

    /// Human-readable message; defaults to the `Display` output.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category such as "export" or "store".
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ErrorCode::SliderOutOfRange.code(), "E001");
        assert_eq!(ErrorCode::ClothingSlotConflict.code(), "E003");
        assert_eq!(ErrorCode::InvalidPlaybackSpeed.to_string(), "E006");
        assert_eq!(ErrorCode::NonFiniteElapsedTime.code(), "E007");
        assert_eq!(WarningCode::UnknownClothingId.code(), "W002");
    }

    #[test]
    fn test_validation_error_display_includes_path() {
        let err = ValidationError::with_path(
            ErrorCode::SliderOutOfRange,
            "value 120 is outside [0, 100]",
            "macro_morphs.height",
        );
        assert_eq!(
            err.to_string(),
            "E001: value 120 is outside [0, 100] (at macro_morphs.height)"
        );
    }

    #[test]
    fn test_validation_result_tracks_ok_flag() {
        let mut result = ValidationResult::success();
        result.add_warning(ValidationWarning::new(WarningCode::EmptyName, "empty"));
        assert!(result.is_ok());

        result.add_error(ValidationError::new(ErrorCode::InvalidColor, "bad"));
        assert!(!result.is_ok());
        assert!(result.has_error(ErrorCode::InvalidColor));
        assert!(result.has_warning(WarningCode::EmptyName));
        assert!(result.into_result().is_err());
    }
}
