//! New command implementation
//!
//! Writes a fresh profile with neutral sliders.

use anyhow::{bail, Result};
use colored::Colorize;
use omniavatar_spec::{is_valid_profile_id, AvatarProfile, OutfitPreset};
use std::path::Path;
use std::process::ExitCode;

use crate::input::write_profile;

/// Run the new command
///
/// # Arguments
/// * `name` - Display name of the avatar
/// * `id` - Profile id; derived from the name when omitted
/// * `outfit` - Optional outfit preset id
/// * `out` - Output profile path
pub fn run(name: &str, id: Option<&str>, outfit: Option<&str>, out: &str) -> Result<ExitCode> {
    let id = match id {
        Some(id) => id.to_string(),
        None => slugify(name),
    };
    if !is_valid_profile_id(&id) {
        bail!(
            "invalid profile id '{}' (use lowercase letters, digits, '_' and '-')",
            id
        );
    }

    let mut profile = AvatarProfile::new(id, name);
    if let Some(outfit) = outfit {
        let Some(preset) = OutfitPreset::from_id(outfit) else {
            let known: Vec<&str> = OutfitPreset::ALL.iter().map(|p| p.id()).collect();
            bail!("unknown outfit '{}' (expected one of: {})", outfit, known.join(", "));
        };
        profile.apply_outfit(preset);
    }

    write_profile(&profile, Path::new(out))?;
    println!("{} {} -> {}", "Created".green().bold(), profile.id, out);
    Ok(ExitCode::SUCCESS)
}

/// Lowercases and replaces runs of other characters with `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "avatar".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::load_profile;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Ada Lovelace"), "ada-lovelace");
        assert_eq!(slugify("  R2 -- D2!  "), "r2-d2");
        assert_eq!(slugify("???"), "avatar");
    }

    #[test]
    fn test_new_writes_outfit() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ada.json");
        let code = run("Ada", None, Some("business"), out.to_str().unwrap()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        let profile = load_profile(&out).unwrap();
        assert_eq!(profile.id, "ada");
        assert!(profile.clothing.contains("jacket01"));
    }

    #[test]
    fn test_new_rejects_bad_id() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("x.json");
        assert!(run("X", Some("Bad Id"), None, out.to_str().unwrap()).is_err());
    }
}
