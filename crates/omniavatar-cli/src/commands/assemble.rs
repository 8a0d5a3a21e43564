//! Assemble command implementation
//!
//! Builds the scene for a profile and prints its summary.

use anyhow::{Context, Result};
use colored::Colorize;
use omniavatar_engine::{compose_scene, EngineConfig, Scene};
use omniavatar_spec::{validate_profile, AvatarProfile};
use std::path::Path;
use std::process::ExitCode;

use super::pose::PoseArgs;
use super::print_json;
use crate::input::load_profile;

/// Loads a profile and composes its scene in the requested pose.
///
/// Validation problems are logged; the scene is still built.
pub(crate) fn build_scene(
    profile_path: &str,
    pose: &PoseArgs,
    config: &EngineConfig,
) -> Result<(AvatarProfile, Scene)> {
    let profile = load_profile(Path::new(profile_path))?;
    let validation = validate_profile(&profile);
    for warning in &validation.warnings {
        tracing::info!("{}", warning);
    }
    for error in &validation.errors {
        tracing::warn!("{}", error);
    }
    let rotations = pose.engine()?.rotations();
    let scene = compose_scene(&profile, &rotations, config);
    Ok((profile, scene))
}

/// Run the assemble command
pub fn run(
    profile_path: &str,
    pose: &PoseArgs,
    config: &EngineConfig,
    json_output: bool,
) -> Result<ExitCode> {
    let (profile, scene) = build_scene(profile_path, pose, config)?;
    let summary = scene
        .summary(&profile)
        .with_context(|| format!("Failed to summarize '{}'", profile.id))?;

    if json_output {
        print_json(&summary)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Assembled:".cyan().bold(), profile.id);
    println!("{} {}", "Hash:".dimmed(), &summary.profile_hash[..16]);
    println!("  {:<12} {}", "Primitives", summary.primitive_count);
    let size = summary.bounds.size();
    println!(
        "  {:<12} {:.3} x {:.3} x {:.3} m",
        "Bounds", size[0], size[1], size[2]
    );
    let hair = summary
        .hair_style
        .map(|h| h.to_string())
        .unwrap_or_else(|| "none".to_string());
    println!("  {:<12} {}", "Hair", hair);
    let garments: Vec<&str> = summary.garments.iter().map(|g| g.catalog_id()).collect();
    println!(
        "  {:<12} {}",
        "Clothing",
        if garments.is_empty() {
            "none".to_string()
        } else {
            garments.join(", ")
        }
    );
    println!("\n{}", "Parts:".cyan().bold());
    for (part, count) in &summary.parts {
        println!("  {:<16} {}", part, count);
    }
    Ok(ExitCode::SUCCESS)
}
