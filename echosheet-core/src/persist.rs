//! Character persistence.
//!
//! A character is saved as a versioned JSON envelope with named keys. Loading
//! rejects any other version rather than guessing at a migration.

use crate::character::{Character, CharacterId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current character save version.
pub const SAVE_VERSION: u32 = 1;

/// A saved character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCharacter {
    /// Save format version for compatibility checking.
    pub version: u32,

    /// RFC 3339 timestamp of the save.
    pub saved_at: String,

    pub character: Character,

    /// Quick-access summary for listings.
    pub metadata: CharacterMetadata,
}

/// Summary of a saved character for quick display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMetadata {
    pub id: CharacterId,
    pub name: String,
    pub race: String,
    pub class: String,
    pub level: u8,
    pub has_backstory: bool,
}

impl SavedCharacter {
    /// Wrap a character for saving, assigning it an id if it has none.
    pub fn new(mut character: Character) -> Self {
        let id = character.ensure_id();
        let metadata = CharacterMetadata {
            id,
            name: character.name.clone(),
            race: character.race.clone(),
            class: character.char_class.clone(),
            level: character.level,
            has_backstory: !character.background_story.is_empty(),
        };

        Self {
            version: SAVE_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            character,
            metadata,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a save document, checking its version.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let saved: Self = serde_json::from_str(json)?;
        check_version(saved.version)?;
        Ok(saved)
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).await?;
        debug!(path = %path.display(), character = %self.metadata.name, "Saved character");
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    /// Read only the metadata of a save file.
    pub async fn peek_metadata(path: impl AsRef<Path>) -> Result<CharacterMetadata, PersistError> {
        let content = fs::read_to_string(path).await?;

        #[derive(Deserialize)]
        struct Partial {
            version: u32,
            metadata: CharacterMetadata,
        }

        let partial: Partial = serde_json::from_str(&content)?;
        check_version(partial.version)?;
        Ok(partial.metadata)
    }

    /// Unwrap the stored character.
    pub fn into_character(self) -> Character {
        self.character
    }
}

fn check_version(found: u32) -> Result<(), PersistError> {
    if found != SAVE_VERSION {
        return Err(PersistError::VersionMismatch {
            expected: SAVE_VERSION,
            found,
        });
    }
    Ok(())
}

/// A save file found on disk.
#[derive(Debug, Clone)]
pub struct CharacterSaveInfo {
    pub path: PathBuf,
    pub metadata: CharacterMetadata,
}

/// List readable character saves in a directory, sorted by name.
///
/// A missing directory is created and reported as empty. Files that fail to
/// parse are skipped.
pub async fn list_character_saves(
    dir: impl AsRef<Path>,
) -> Result<Vec<CharacterSaveInfo>, PersistError> {
    let mut saves = Vec::new();

    let dir = dir.as_ref();
    if !fs::try_exists(dir).await? {
        fs::create_dir_all(dir).await?;
        return Ok(saves);
    }

    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "json") {
            if let Ok(metadata) = SavedCharacter::peek_metadata(&path).await {
                saves.push(CharacterSaveInfo { path, metadata });
            }
        }
    }

    saves.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
    Ok(saves)
}

/// Save path for a character: non-alphanumerics become underscores.
pub fn character_save_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
    let sanitized = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>();
    dir.as_ref().join(format!("{sanitized}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Character {
        let mut c = Character::new("Thorin Ironfist", "Dwarf", "Fighter", "Soldier");
        c.skills = vec!["Athletics".to_string(), "Intimidation".to_string()];
        c.background_story = "Exiled from the mountain.".to_string();
        c
    }

    #[test]
    fn test_saved_character_creation() {
        let saved = SavedCharacter::new(sample());
        assert_eq!(saved.version, SAVE_VERSION);
        assert_eq!(saved.metadata.name, "Thorin Ironfist");
        assert_eq!(saved.metadata.class, "Fighter");
        assert!(saved.metadata.has_backstory);
        assert_eq!(saved.character.id, Some(saved.metadata.id));
    }

    #[test]
    fn test_existing_id_is_kept() {
        let mut c = sample();
        let id = c.ensure_id();
        let saved = SavedCharacter::new(c);
        assert_eq!(saved.metadata.id, id);
    }

    #[test]
    fn test_json_uses_named_keys() {
        let json = SavedCharacter::new(sample()).to_json().unwrap();
        assert!(json.contains("\"version\": 1"));
        assert!(json.contains("\"char_class\": \"Fighter\""));
        assert!(json.contains("\"saved_at\""));
    }

    #[test]
    fn test_from_json_rejects_other_versions() {
        let mut saved = SavedCharacter::new(sample());
        saved.version = 2;
        let json = serde_json::to_string(&saved).unwrap();
        match SavedCharacter::from_json(&json) {
            Err(PersistError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, 1);
                assert_eq!(found, 2);
            }
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            SavedCharacter::from_json("not json"),
            Err(PersistError::Json(_))
        ));
    }

    #[test]
    fn test_character_save_path() {
        let path = character_save_path("/saves", "Thorin Ironfist!");
        assert!(path.to_string_lossy().ends_with("Thorin_Ironfist_.json"));
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thorin.json");
        let saved = SavedCharacter::new(sample());
        saved.save_json(&path).await.unwrap();

        let loaded = SavedCharacter::load_json(&path).await.unwrap();
        assert_eq!(loaded, saved);

        let meta = SavedCharacter::peek_metadata(&path).await.unwrap();
        assert_eq!(meta.name, "Thorin Ironfist");
    }

    #[tokio::test]
    async fn test_list_character_saves() {
        let dir = tempfile::tempdir().unwrap();
        let saves_dir = dir.path().join("characters");

        // Missing directory is created
        assert!(list_character_saves(&saves_dir).await.unwrap().is_empty());

        let mut zed = sample();
        zed.name = "Zed".to_string();
        SavedCharacter::new(zed)
            .save_json(character_save_path(&saves_dir, "Zed"))
            .await
            .unwrap();
        SavedCharacter::new(sample())
            .save_json(character_save_path(&saves_dir, "Thorin"))
            .await
            .unwrap();
        tokio::fs::write(saves_dir.join("broken.json"), "{")
            .await
            .unwrap();

        let saves = list_character_saves(&saves_dir).await.unwrap();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].metadata.name, "Thorin Ironfist");
        assert_eq!(saves[1].metadata.name, "Zed");
    }
}
