//! Measure command implementation
//!
//! Prints body measurements and metric dimensions derived from a profile.

use anyhow::Result;
use colored::Colorize;
use omniavatar_engine::{compute_dimensions, BodyDimensions, Measurements};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::print_json;
use crate::input::load_profile;

#[derive(Debug, Serialize)]
struct MeasureOutput<'a> {
    profile_id: &'a str,
    measurements: &'a Measurements,
    dimensions: &'a BodyDimensions,
}

/// Run the measure command
///
/// `all` also lists every dimension entry in meters.
pub fn run(profile_path: &str, all: bool, json_output: bool) -> Result<ExitCode> {
    let profile = load_profile(Path::new(profile_path))?;
    let dims = compute_dimensions(&profile);
    let measurements = Measurements::from_profile(&profile, &dims);

    if json_output {
        print_json(&MeasureOutput {
            profile_id: &profile.id,
            measurements: &measurements,
            dimensions: &dims,
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Measurements:".cyan().bold(), profile.id);
    let rows = [
        ("Height", measurements.height_cm, "cm"),
        ("Weight", measurements.weight_kg, "kg"),
        ("BMI", measurements.bmi, ""),
        ("Chest", measurements.chest_cm, "cm"),
        ("Waist", measurements.waist_cm, "cm"),
        ("Hips", measurements.hip_cm, "cm"),
        ("Arm length", measurements.arm_length_cm, "cm"),
        ("Inseam", measurements.inseam_cm, "cm"),
    ];
    for (label, value, unit) in rows {
        println!("  {:<12} {:>8.1} {}", label, value, unit.dimmed());
    }

    let blend = &dims.ethnicity;
    println!(
        "  {:<12} african {:.2}, asian {:.2}, caucasian {:.2}",
        "Ethnicity", blend.african, blend.asian, blend.caucasian
    );

    if all {
        println!("\n{}", "Dimensions (m):".cyan().bold());
        for (name, meters) in dims.length_entries() {
            println!("  {:<28} {:.4}", name, meters);
        }
    }
    Ok(ExitCode::SUCCESS)
}
