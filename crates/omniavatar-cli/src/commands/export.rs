//! Export command implementation
//!
//! Assembles a profile, publishes it to a scene handle, and writes the
//! requested format.

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use omniavatar_engine::{EngineConfig, ExportFormat, Exporter, SceneHandle};
use omniavatar_spec::BackendError;
use std::path::Path;
use std::process::ExitCode;

use super::assemble::build_scene;
use super::pose::PoseArgs;

/// Run the export command
///
/// # Arguments
/// * `format` - Output format; inferred from `out` when omitted
pub fn run(
    profile_path: &str,
    format: Option<&str>,
    out: &str,
    pose: &PoseArgs,
    config: &EngineConfig,
) -> Result<ExitCode> {
    let out_path = Path::new(out);
    let format = resolve_format(format, out_path)?;

    let (profile, scene) = build_scene(profile_path, pose, config)?;
    let handle = SceneHandle::with_scene(scene);

    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let exporter = Exporter::new(config.clone());
    let written = exporter
        .export_to_path(&handle, &profile, format, out_path)
        .map_err(|e| anyhow!("[{}] {}", e.code(), e))?;

    println!(
        "{} {} -> {} ({} bytes)",
        "Exported".green().bold(),
        profile.id,
        out,
        written
    );
    Ok(ExitCode::SUCCESS)
}

fn resolve_format(explicit: Option<&str>, out: &Path) -> Result<ExportFormat> {
    match explicit {
        Some(name) => name
            .parse::<ExportFormat>()
            .map_err(|e| anyhow!("[{}] {}", e.code(), e)),
        None => ExportFormat::from_path(out).ok_or_else(|| {
            anyhow!(
                "cannot infer export format from '{}'; pass --format",
                out.display()
            )
        }),
    }
}
