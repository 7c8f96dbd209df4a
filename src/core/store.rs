//! Character repository over per-character JSON files.
//!
//! One file per character, `<name>.json`, in the `characters/` directory
//! under the app data dir. Writes are whole-file overwrites with no
//! locking; concurrent multi-process access is unsupported.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::character::CharacterRecord;

/// Unified error type for repository operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the requested character.
    #[error("No character named \"{0}\"")]
    NotFound(String),

    /// A character with this name already exists.
    #[error("Character \"{0}\" already exists")]
    AlreadyExists(String),

    /// The name cannot be used as a file name.
    #[error("Invalid character name: {0}")]
    InvalidName(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error for file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// File-backed character repository.
#[derive(Debug, Clone)]
pub struct CharacterStore {
    dir: PathBuf,
}

impl CharacterStore {
    /// Open (and create if needed) the repository under `data_dir/characters`.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let dir = data_dir.join("characters");
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Load a character record by name.
    pub fn load(&self, name: &str) -> StoreResult<CharacterRecord> {
        validate_name(name)?;
        let path = self.path_for(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    /// Persist a record, overwriting any previous file.
    pub fn save(&self, record: &CharacterRecord) -> StoreResult<()> {
        validate_name(&record.character)?;
        let path = self.path_for(&record.character);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;
        log::debug!("Saved character {} to {}", record.character, path.display());
        Ok(())
    }

    /// Create a new character with one empty version.
    ///
    /// Refuses to overwrite an existing record — re-creating a character
    /// would silently destroy its history.
    pub fn create(&self, name: &str) -> StoreResult<CharacterRecord> {
        validate_name(name)?;
        if self.path_for(name).exists() {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        let record = CharacterRecord::new(name);
        self.save(&record)?;
        log::info!("Created character {name}");
        Ok(record)
    }

    /// All character names, sorted.
    pub fn list(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete a character's file.
    pub fn delete(&self, name: &str) -> StoreResult<()> {
        validate_name(name)?;
        let path = self.path_for(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Deleted character {name}");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

/// Reject names that would escape the repository directory or produce
/// unusable file names.
fn validate_name(name: &str) -> StoreResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidName("name is empty".to_string()));
    }
    if trimmed.starts_with('.') {
        return Err(StoreError::InvalidName(format!(
            "\"{trimmed}\" starts with a dot"
        )));
    }
    if trimmed.contains(['/', '\\', '\0']) {
        return Err(StoreError::InvalidName(format!(
            "\"{trimmed}\" contains a path separator"
        )));
    }
    Ok(())
}
