//! Store command implementation
//!
//! Saves, lists, loads, and deletes avatars in the saved-avatar file.

use anyhow::{anyhow, Result};
use colored::Colorize;
use omniavatar_spec::{BackendError, JsonFileProfileStore, ProfileStore, StoreError};
use std::path::Path;
use std::process::ExitCode;

use super::print_json;
use crate::input::{load_profile, write_profile};

fn store_error(e: StoreError) -> anyhow::Error {
    anyhow!("[{}] {}", e.code(), e)
}

/// Saves a profile file into the store, replacing any entry with its id.
pub fn save(store_path: &Path, profile_path: &str) -> Result<ExitCode> {
    let profile = load_profile(Path::new(profile_path))?;
    let mut store = JsonFileProfileStore::new(store_path);
    let saved_at = chrono::Utc::now().to_rfc3339();
    store.save(&profile, &saved_at).map_err(store_error)?;
    println!(
        "{} {} -> {}",
        "Saved".green().bold(),
        profile.id,
        store_path.display()
    );
    Ok(ExitCode::SUCCESS)
}

/// Lists saved avatars in save order.
pub fn list(store_path: &Path, json_output: bool) -> Result<ExitCode> {
    let store = JsonFileProfileStore::new(store_path);
    let summaries = store.list().map_err(store_error)?;
    if json_output {
        print_json(&summaries)?;
        return Ok(ExitCode::SUCCESS);
    }
    if summaries.is_empty() {
        println!("{}", "No saved avatars".dimmed());
        return Ok(ExitCode::SUCCESS);
    }
    for summary in summaries {
        println!(
            "  {:<24} {:<24} {}",
            summary.id.bold(),
            summary.name,
            summary.saved_at.dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Writes a saved avatar back to a profile file.
pub fn load(store_path: &Path, id: &str, out: &str) -> Result<ExitCode> {
    let store = JsonFileProfileStore::new(store_path);
    let profile = store.load(id).map_err(store_error)?;
    write_profile(&profile, Path::new(out))?;
    println!("{} {} -> {}", "Loaded".green().bold(), id, out);
    Ok(ExitCode::SUCCESS)
}

/// Removes a saved avatar.
pub fn delete(store_path: &Path, id: &str) -> Result<ExitCode> {
    let mut store = JsonFileProfileStore::new(store_path);
    store.delete(id).map_err(store_error)?;
    println!("{} {}", "Deleted".green().bold(), id);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use omniavatar_spec::AvatarProfile;

    #[test]
    fn test_save_load_delete_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("avatars.json");
        let profile_path = dir.path().join("me.json");
        let profile = AvatarProfile::new("me", "Me");
        write_profile(&profile, &profile_path).unwrap();

        save(&store_path, profile_path.to_str().unwrap()).unwrap();
        let listed = JsonFileProfileStore::new(&store_path).list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "me");

        let out = dir.path().join("back.json");
        load(&store_path, "me", out.to_str().unwrap()).unwrap();
        assert_eq!(load_profile(&out).unwrap(), profile);

        delete(&store_path, "me").unwrap();
        let err = load(&store_path, "me", out.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("STORE_001"));
    }
}
