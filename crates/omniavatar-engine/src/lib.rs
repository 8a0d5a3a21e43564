//! OmniAvatar Engine
//!
//! This crate turns an [`omniavatar_spec::AvatarProfile`] into a posed,
//! dressed humanoid made of parametric primitives, and exports it.
//!
//! # Pipeline
//!
//! 1. [`dimensions::compute_dimensions`] maps normalized sliders to meters
//! 2. [`geometry::assemble_body`] builds the part hierarchy with joints
//! 3. [`hair`], [`accessories`] and [`clothing`] attach primitives to body parts
//! 4. [`pose::PoseEngine`] yields joint rotations for presets and clips
//! 5. [`scene::compose_scene`] combines all of the above into a [`Scene`]
//! 6. [`export::Exporter`] writes GLB, glTF, OBJ, JSON or PNG
//!
//! # Example
//!
//! ```
//! use omniavatar_engine::{compose_scene, EngineConfig, ExportFormat, Exporter, PoseEngine, SceneHandle};
//! use omniavatar_spec::AvatarProfile;
//!
//! let profile = AvatarProfile::default();
//! let mut pose = PoseEngine::new();
//! pose.select_animation("wave");
//! pose.advance(0.25);
//!
//! let config = EngineConfig::default();
//! let scene = compose_scene(&profile, &pose.rotations(), &config);
//! let handle = SceneHandle::with_scene(scene);
//!
//! let glb = Exporter::new(config)
//!     .export(&handle, &profile, ExportFormat::Glb)
//!     .unwrap();
//! assert_eq!(&glb[0..4], b"glTF");
//! ```
//!
//! # Determinism
//!
//! Identical profiles and rotations give identical scenes and byte-identical
//! exports. Seeded randomization goes through PCG32 sub-streams.

pub mod accessories;
pub mod clothing;
pub mod config;
pub mod dimensions;
pub mod export;
pub mod geometry;
pub mod hair;
pub mod math;
pub mod pose;
pub mod randomize;
pub mod scene;

pub use accessories::resolve_accessories;
pub use clothing::{fit_clothing, select_layers, Garment, LayerSelection};
pub use config::{ConfigError, EngineConfig};
pub use dimensions::{compute_dimensions, BodyDimensions, Measurements};
pub use export::{ExportError, ExportFormat, Exporter};
pub use geometry::{assemble_body, BodyPart, Joint, Node};
pub use hair::{resolve_facial_hair, resolve_hair};
pub use pose::{ClipSampler, JointRotations, PoseEngine, PoseError, PoseMode, PoseTable};
pub use randomize::randomize_profile;
pub use scene::{compose_scene, Scene, SceneHandle, SceneSummary};
