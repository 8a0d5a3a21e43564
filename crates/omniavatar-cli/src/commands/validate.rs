//! Validate command implementation
//!
//! Validates a profile file and prints its errors and warnings.

use anyhow::Result;
use colored::Colorize;
use omniavatar_spec::{canonical_profile_hash, validate_profile, ValidationResult};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::print_json;
use crate::input::load_profile;

#[derive(Debug, Serialize)]
struct JsonIssue {
    code: String,
    message: String,
    path: Option<String>,
}

#[derive(Debug, Serialize)]
struct ValidateOutput {
    ok: bool,
    profile_id: String,
    profile_hash: Option<String>,
    errors: Vec<JsonIssue>,
    warnings: Vec<JsonIssue>,
}

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(profile_path: &str, json_output: bool) -> Result<ExitCode> {
    let profile = load_profile(Path::new(profile_path))?;
    let result = validate_profile(&profile);
    let hash = canonical_profile_hash(&profile).ok();

    if json_output {
        print_json(&ValidateOutput {
            ok: result.is_ok(),
            profile_id: profile.id.clone(),
            profile_hash: hash,
            errors: result
                .errors
                .iter()
                .map(|e| JsonIssue {
                    code: e.code.to_string(),
                    message: e.message.clone(),
                    path: e.path.clone(),
                })
                .collect(),
            warnings: result
                .warnings
                .iter()
                .map(|w| JsonIssue {
                    code: w.code.to_string(),
                    message: w.message.clone(),
                    path: w.path.clone(),
                })
                .collect(),
        })?;
    } else {
        println!("{} {}", "Validating:".cyan().bold(), profile_path);
        if let Some(hash) = &hash {
            println!("{} {}", "Hash:".dimmed(), &hash[..16]);
        }
        print_validation_results(&result);
    }

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_validation_results(result: &ValidationResult) {
    for error in &result.errors {
        println!("  {} {}", "x".red(), error);
    }
    for warning in &result.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
    if result.is_ok() {
        println!("\n{} Profile is valid", "SUCCESS".green().bold());
    } else {
        println!(
            "\n{} {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::write_profile;
    use omniavatar_spec::AvatarProfile;

    #[test]
    fn test_valid_profile_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.json");
        write_profile(&AvatarProfile::default(), &path).unwrap();
        assert_eq!(run(path.to_str().unwrap(), true).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_out_of_range_slider_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let mut profile = AvatarProfile::default();
        profile.macro_morphs.height = 140.0;
        write_profile(&profile, &path).unwrap();
        assert_eq!(run(path.to_str().unwrap(), false).unwrap(), ExitCode::from(1));
    }
}
