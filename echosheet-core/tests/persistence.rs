//! Save/load tests for versioned character files.
//!
//! Each test works in its own temporary directory.

use echosheet_core::persist::{character_save_path, list_character_saves, SAVE_VERSION};
use echosheet_core::{CharacterBuilder, PersistError, SavedCharacter, SheetEngine};
use tempfile::TempDir;

fn built(name: &str, class: &str) -> echosheet_core::Character {
    CharacterBuilder::new()
        .name(name)
        .race("Human")
        .class(class)
        .background("Acolyte")
        .backstory("Raised in a mountain monastery.")
        .build(&SheetEngine::default())
        .unwrap()
}

// =============================================================================
// Round trips
// =============================================================================

#[tokio::test]
async fn test_filled_character_survives_round_trip() {
    let engine = SheetEngine::default();
    let temp = TempDir::new().unwrap();
    let path = character_save_path(temp.path(), "Brother Aldric");

    let mut character = built("Brother Aldric", "Cleric");
    engine.apply_equipment_pack(&mut character, "Priest's Pack");
    engine.chat_with(&mut character, "Tell me about your faith");

    let saved = SavedCharacter::new(character);
    saved.save_json(&path).await.unwrap();

    let loaded = SavedCharacter::load_json(&path).await.unwrap();
    assert_eq!(loaded.version, SAVE_VERSION);
    assert!(loaded.metadata.has_backstory);

    let restored = loaded.into_character();
    assert_eq!(restored, saved.character);
    assert_eq!(restored.items.len(), 10);
    assert_eq!(restored.chat_history.len(), 1);
    assert!(restored.id.is_some());
}

#[tokio::test]
async fn test_older_documents_fill_missing_fields_with_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sparse.json");
    let json = format!(
        r#"{{
            "version": {SAVE_VERSION},
            "saved_at": "2024-01-01T00:00:00+00:00",
            "character": {{ "name": "Nim", "race": "Gnome", "char_class": "Wizard" }},
            "metadata": {{
                "id": "00000000-0000-0000-0000-000000000000",
                "name": "Nim", "race": "Gnome", "class": "Wizard",
                "level": 1, "has_backstory": false
            }}
        }}"#
    );
    tokio::fs::write(&path, json).await.unwrap();

    let character = SavedCharacter::load_json(&path).await.unwrap().into_character();
    assert_eq!(character.name, "Nim");
    assert_eq!(character.level, 1);
    assert!(character.attributes.is_none());
    assert!(character.items.is_empty());
}

#[tokio::test]
async fn test_version_mismatch_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("future.json");

    let mut saved = SavedCharacter::new(built("Ysolde", "Paladin"));
    saved.version = SAVE_VERSION + 1;
    tokio::fs::write(&path, serde_json::to_string(&saved).unwrap())
        .await
        .unwrap();

    let result = SavedCharacter::load_json(&path).await;
    assert!(matches!(result, Err(PersistError::VersionMismatch { .. })));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let result = SavedCharacter::load_json(temp.path().join("nobody.json")).await;
    assert!(matches!(result, Err(PersistError::Io(_))));
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_saves_reports_metadata() {
    let temp = TempDir::new().unwrap();
    for (name, class) in [("Corwin", "Fighter"), ("Amara", "Cleric")] {
        SavedCharacter::new(built(name, class))
            .save_json(character_save_path(temp.path(), name))
            .await
            .unwrap();
    }

    let saves = list_character_saves(temp.path()).await.unwrap();
    let names: Vec<_> = saves.iter().map(|s| s.metadata.name.as_str()).collect();
    assert_eq!(names, ["Amara", "Corwin"]);
    assert_eq!(saves[1].metadata.class, "Fighter");
}
