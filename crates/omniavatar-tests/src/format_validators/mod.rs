//! Format validators for exported avatars.
//!
//! These parse exported bytes without going through the engine, so a test
//! that passes here proves the output is readable by other tools too.

mod gltf;
mod obj;
mod png;

use std::fmt;

use omniavatar_engine::ExportFormat;

pub use self::gltf::{validate_glb, validate_gltf, GlbInfo, GltfInfo};
pub use self::obj::{validate_obj, ObjInfo};
pub use self::png::{validate_png, PngInfo};

/// Where in an exported file a problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Byte offset into a binary export (GLB, PNG).
    Byte(usize),
    /// One-based line of a text export (OBJ).
    Line(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Byte(offset) => write!(f, "byte {}", offset),
            Location::Line(line) => write!(f, "line {}", line),
        }
    }
}

/// An exported avatar file that another tool would refuse to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub format: ExportFormat,
    pub message: String,
    pub location: Option<Location>,
}

impl FormatError {
    pub fn new(format: ExportFormat, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
            location: None,
        }
    }

    pub fn at_byte(format: ExportFormat, message: impl Into<String>, offset: usize) -> Self {
        Self {
            location: Some(Location::Byte(offset)),
            ..Self::new(format, message)
        }
    }

    pub fn at_line(format: ExportFormat, message: impl Into<String>, line: usize) -> Self {
        Self {
            location: Some(Location::Line(line)),
            ..Self::new(format, message)
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) => {
                write!(f, "bad {} export at {}: {}", self.format, location, self.message)
            }
            None => write!(f, "bad {} export: {}", self.format, self.message),
        }
    }
}

impl std::error::Error for FormatError {}
