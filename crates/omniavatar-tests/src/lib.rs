//! OmniAvatar End-to-End Test Infrastructure
//!
//! Integration tests that cross `omniavatar-spec`, `omniavatar-engine` and
//! `omniavatar-cli`:
//!
//! - Body properties: dimensions and primitives stay valid for any sliders
//! - Scenarios: hair, clothing layering, and pose behavior on whole scenes
//! - **Determinism**: identical profiles give byte-identical exports
//! - Export: every format parses with an independent reader
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p omniavatar-tests
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use omniavatar_tests::determinism::verify_determinism;
//!
//! let result = verify_determinism(|| export_glb(&profile), 3);
//! assert!(result.is_deterministic);
//! ```

pub mod determinism;
pub mod fixtures;
pub mod format_validators;

pub use determinism::{verify_determinism, DeterminismResult};
pub use fixtures::{build_scene, export_bytes};
pub use format_validators::{FormatError, Location};
