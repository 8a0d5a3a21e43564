//! Saved-avatar persistence.
//!
//! A [`SavedAvatarRecord`] is an ordered list of named profile snapshots keyed
//! by profile id. [`ProfileStore`] is the persistence boundary; the storage
//! medium is up to the implementation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::BackendError;
use crate::profile::AvatarProfile;
use crate::validation::validate_profile;

/// Errors from profile persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No profile with the given id is stored.
    #[error("no saved avatar with id '{id}'")]
    NotFound { id: String },

    /// The profile failed validation and was not saved.
    #[error("profile '{id}' is invalid: {message}")]
    Invalid { id: String, message: String },

    /// Failed to read or write the backing file.
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a valid record.
    #[error("store file {path} is corrupt: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl BackendError for StoreError {
    fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "STORE_001",
            StoreError::Invalid { .. } => "STORE_002",
            StoreError::Io { .. } => "STORE_003",
            StoreError::Json { .. } => "STORE_004",
        }
    }

    fn category(&self) -> &'static str {
        "store"
    }
}

/// A stored profile snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAvatar {
    pub profile: AvatarProfile,
    /// RFC 3339 timestamp of the last save.
    pub saved_at: String,
}

/// The persisted collection of saved avatars, in order of first save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedAvatarRecord {
    #[serde(default)]
    pub avatars: Vec<SavedAvatar>,
}

/// Listing entry for a saved avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAvatarSummary {
    pub id: String,
    pub name: String,
    pub saved_at: String,
}

impl SavedAvatarRecord {
    /// Inserts a snapshot, replacing an existing one with the same id in place.
    pub fn upsert(&mut self, profile: &AvatarProfile, saved_at: &str) {
        let entry = SavedAvatar {
            profile: profile.clone(),
            saved_at: saved_at.to_string(),
        };
        match self.avatars.iter_mut().find(|a| a.profile.id == profile.id) {
            Some(existing) => *existing = entry,
            None => self.avatars.push(entry),
        }
    }

    /// Looks up a snapshot by id.
    pub fn get(&self, id: &str) -> Option<&SavedAvatar> {
        self.avatars.iter().find(|a| a.profile.id == id)
    }

    /// Removes a snapshot. Returns false if the id was not stored.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.avatars.len();
        self.avatars.retain(|a| a.profile.id != id);
        self.avatars.len() != before
    }

    /// Summaries in record order.
    pub fn summaries(&self) -> Vec<SavedAvatarSummary> {
        self.avatars
            .iter()
            .map(|a| SavedAvatarSummary {
                id: a.profile.id.clone(),
                name: a.profile.name.clone(),
                saved_at: a.saved_at.clone(),
            })
            .collect()
    }
}

/// Persistence boundary for saved avatars.
pub trait ProfileStore {
    /// Creates or replaces the snapshot of `profile`. Invalid profiles are rejected.
    fn save(&mut self, profile: &AvatarProfile, saved_at: &str) -> Result<(), StoreError>;

    /// Lists stored avatars in order of first save.
    fn list(&self) -> Result<Vec<SavedAvatarSummary>, StoreError>;

    /// Loads a stored profile by id.
    fn load(&self, id: &str) -> Result<AvatarProfile, StoreError>;

    /// Deletes a stored profile by id.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

fn check_saveable(profile: &AvatarProfile) -> Result<(), StoreError> {
    let result = validate_profile(profile);
    if result.is_ok() {
        return Ok(());
    }
    let message = result
        .errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(StoreError::Invalid {
        id: profile.id.clone(),
        message,
    })
}

/// In-memory store, mainly for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    record: SavedAvatarRecord,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying record.
    pub fn record(&self) -> &SavedAvatarRecord {
        &self.record
    }
}

impl ProfileStore for MemoryProfileStore {
    fn save(&mut self, profile: &AvatarProfile, saved_at: &str) -> Result<(), StoreError> {
        check_saveable(profile)?;
        self.record.upsert(profile, saved_at);
        Ok(())
    }

    fn list(&self) -> Result<Vec<SavedAvatarSummary>, StoreError> {
        Ok(self.record.summaries())
    }

    fn load(&self, id: &str) -> Result<AvatarProfile, StoreError> {
        self.record
            .get(id)
            .map(|a| a.profile.clone())
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        if self.record.remove(id) {
            Ok(())
        } else {
            Err(StoreError::NotFound { id: id.to_string() })
        }
    }
}

/// Store backed by a single JSON file.
///
/// Every mutation rewrites the whole file through a sibling temp file and a
/// rename, so readers never observe a half-written record. A missing file
/// reads as an empty record.
#[derive(Debug, Clone)]
pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole record from disk.
    pub fn read_record(&self) -> Result<SavedAvatarRecord, StoreError> {
        if !self.path.exists() {
            return Ok(SavedAvatarRecord::default());
        }
        let text = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        if text.trim().is_empty() {
            return Ok(SavedAvatarRecord::default());
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn write_record(&self, record: &SavedAvatarRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(record).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        debug!(path = %self.path.display(), count = record.avatars.len(), "wrote avatar store");
        Ok(())
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn save(&mut self, profile: &AvatarProfile, saved_at: &str) -> Result<(), StoreError> {
        check_saveable(profile)?;
        let mut record = self.read_record()?;
        record.upsert(profile, saved_at);
        self.write_record(&record)
    }

    fn list(&self) -> Result<Vec<SavedAvatarSummary>, StoreError> {
        Ok(self.read_record()?.summaries())
    }

    fn load(&self, id: &str) -> Result<AvatarProfile, StoreError> {
        let record = self.read_record()?;
        record
            .get(id)
            .map(|a| a.profile.clone())
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let mut record = self.read_record()?;
        if !record.remove(id) {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        self.write_record(&record)
    }
}
