//! Exporting a published scene to files.
//!
//! Every format reads the scene through a [`SceneHandle`]; an empty handle
//! fails with [`ExportError::SceneNotReady`] for every format, JSON included,
//! so a caller cannot save a profile the viewer never finished building.

mod gltf;
pub mod mesh;
mod obj;
mod png;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use omniavatar_spec::{AvatarProfile, BackendError};
use thiserror::Error;
use tracing::debug;

use crate::config::EngineConfig;
use crate::scene::SceneHandle;

pub use self::gltf::{build_document, write_glb, write_gltf, GltfDocument};
pub use self::mesh::{tessellate, tessellate_world, SceneMesh, TriMesh};
pub use self::obj::write_obj;
pub use self::png::{encode_png, render, Framebuffer};

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Glb,
    Gltf,
    Obj,
    Json,
    Png,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Glb,
        ExportFormat::Gltf,
        ExportFormat::Obj,
        ExportFormat::Json,
        ExportFormat::Png,
    ];

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Glb => "glb",
            ExportFormat::Gltf => "gltf",
            ExportFormat::Obj => "obj",
            ExportFormat::Json => "json",
            ExportFormat::Png => "png",
        }
    }

    /// Looks up a format by extension, case-insensitive, with or without dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    /// Format implied by a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No scene has been published to the handle.
    #[error("scene is not ready: nothing has been published to the scene handle")]
    SceneNotReady,

    /// Unknown output format.
    #[error("unsupported export format: '{0}'")]
    UnsupportedFormat(String),

    /// Encoder failure.
    #[error("failed to encode {format}: {message}")]
    Encode {
        format: ExportFormat,
        message: String,
    },

    /// Writing the output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    fn encode(format: ExportFormat, err: impl fmt::Display) -> Self {
        Self::Encode {
            format,
            message: err.to_string(),
        }
    }
}

impl BackendError for ExportError {
    fn code(&self) -> &'static str {
        match self {
            ExportError::SceneNotReady => "EXPORT_001",
            ExportError::UnsupportedFormat(_) => "EXPORT_002",
            ExportError::Encode { .. } => "EXPORT_003",
            ExportError::Io { .. } => "EXPORT_004",
        }
    }

    fn category(&self) -> &'static str {
        "export"
    }
}

/// Turns the published scene into file bytes.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: EngineConfig,
}

impl Exporter {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Encodes the scene held by `handle` in `format`.
    ///
    /// `profile` is only read: JSON output is its pretty dump, and the mesh
    /// formats use its id as the object name.
    pub fn export(
        &self,
        handle: &SceneHandle,
        profile: &AvatarProfile,
        format: ExportFormat,
    ) -> Result<Vec<u8>, ExportError> {
        let scene = handle.get().ok_or(ExportError::SceneNotReady)?;

        let name = if profile.id.is_empty() {
            "avatar"
        } else {
            profile.id.as_str()
        };
        let bytes = match format {
            ExportFormat::Json => profile
                .to_json_pretty()
                .map_err(|e| ExportError::encode(format, e))?
                .into_bytes(),
            ExportFormat::Obj => {
                let mesh = SceneMesh::from_scene(&scene, &self.config.tessellation);
                write_obj(&mesh, name).into_bytes()
            }
            ExportFormat::Gltf | ExportFormat::Glb => {
                let mesh = SceneMesh::from_scene(&scene, &self.config.tessellation);
                let doc = build_document(&mesh, &scene.palette, name);
                let written = if format == ExportFormat::Glb {
                    write_glb(doc)
                } else {
                    write_gltf(doc)
                };
                written.map_err(|e| ExportError::encode(format, e))?
            }
            ExportFormat::Png => {
                let mesh = SceneMesh::from_scene(&scene, &self.config.tessellation);
                let frame = render(&mesh, &scene.palette, &self.config.render);
                encode_png(&frame).map_err(|e| ExportError::encode(format, e))?
            }
        };
        debug!("exported '{}' as {} ({} bytes)", profile.id, format, bytes.len());
        Ok(bytes)
    }

    /// Exports and writes to `path`, returning the byte count.
    pub fn export_to_path(
        &self,
        handle: &SceneHandle,
        profile: &AvatarProfile,
        format: ExportFormat,
        path: &Path,
    ) -> Result<usize, ExportError> {
        let bytes = self.export(handle, profile, format)?;
        std::fs::write(path, &bytes).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::JointRotations;
    use crate::scene::compose_scene;
    use pretty_assertions::assert_eq;

    fn ready(profile: &AvatarProfile) -> SceneHandle {
        let scene = compose_scene(profile, &JointRotations::tpose(), &EngineConfig::default());
        SceneHandle::with_scene(scene)
    }

    #[test]
    fn test_format_lookup() {
        assert_eq!(ExportFormat::from_extension(".GLB"), Some(ExportFormat::Glb));
        assert_eq!(ExportFormat::from_extension("fbx"), None);
        assert_eq!(
            ExportFormat::from_path(Path::new("out/avatar.png")),
            Some(ExportFormat::Png)
        );
        assert!("stl".parse::<ExportFormat>().is_err());
        for format in ExportFormat::ALL {
            assert_eq!(format.extension().parse::<ExportFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_empty_handle_is_not_ready_for_any_format() {
        let exporter = Exporter::default();
        let profile = AvatarProfile::default();
        for format in ExportFormat::ALL {
            let err = exporter
                .export(&SceneHandle::empty(), &profile, format)
                .unwrap_err();
            assert!(matches!(err, ExportError::SceneNotReady));
            assert_eq!(err.code(), "EXPORT_001");
        }
    }

    #[test]
    fn test_json_export_reloads_exactly() {
        let mut profile = AvatarProfile::default();
        profile.equip("shirt01");
        let bytes = Exporter::default()
            .export(&ready(&profile), &profile, ExportFormat::Json)
            .unwrap();
        let reloaded = AvatarProfile::from_json(std::str::from_utf8(&bytes).unwrap()).unwrap();
        assert_eq!(reloaded, profile);
    }

    #[test]
    fn test_export_leaves_profile_untouched() {
        let profile = AvatarProfile::default();
        let before = profile.clone();
        let handle = ready(&profile);
        for format in ExportFormat::ALL {
            Exporter::default().export(&handle, &profile, format).unwrap();
        }
        assert_eq!(profile, before);
    }

    #[test]
    fn test_export_to_path_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.obj");
        let profile = AvatarProfile::default();
        let written = Exporter::default()
            .export_to_path(&ready(&profile), &profile, ExportFormat::Obj, &path)
            .unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, written);
    }

    #[test]
    fn test_io_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("avatar.glb");
        let profile = AvatarProfile::default();
        let err = Exporter::default()
            .export_to_path(&ready(&profile), &profile, ExportFormat::Glb, &path)
            .unwrap_err();
        assert_eq!(err.code(), "EXPORT_004");
        assert_eq!(err.category(), "export");
    }
}
