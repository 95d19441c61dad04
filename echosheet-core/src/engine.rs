//! The engine facade.
//!
//! `SheetEngine` owns the rule tables and spell catalog for the life of the
//! process and hands out borrowing views (`SpellManager`, `Autofill`) over
//! them. Everything an outer layer needs goes through here.

use crate::abilities::{validate_attributes, AbilityScores, AttributeValidation};
use crate::autofill::{Autofill, FillReport, SuggestionBundle};
use crate::character::{Character, LevelUpError};
use crate::chat::ChatEngine;
use crate::config::SheetConfig;
use crate::equipment::{find_pack, PackApplication};
use crate::recommender::{RecommendationBundle, Recommender};
use crate::rules::RuleTables;
use crate::spell_manager::{SpellManager, SpellValidation};
use crate::spells::SpellCatalog;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SheetEngine {
    rules: RuleTables,
    catalog: SpellCatalog,
    recommender: Recommender,
    chat: ChatEngine,
}

impl Default for SheetEngine {
    fn default() -> Self {
        Self::new(&SheetConfig::default())
    }
}

impl SheetEngine {
    /// Build the engine, loading the configured spell catalog once.
    ///
    /// A catalog that cannot be read leaves the engine with an empty catalog;
    /// every class then reads as a non-caster.
    pub fn new(config: &SheetConfig) -> Self {
        let catalog = match &config.spell_catalog_path {
            Some(path) => SpellCatalog::load(path),
            None => SpellCatalog::builtin(),
        };
        info!(
            classes = catalog.spellcasting_rules.len(),
            "Spell catalog ready"
        );
        Self::from_parts(RuleTables::standard(), catalog)
    }

    pub fn from_parts(rules: RuleTables, catalog: SpellCatalog) -> Self {
        Self {
            rules,
            catalog,
            recommender: Recommender::new(),
            chat: ChatEngine::new(),
        }
    }

    pub fn rules(&self) -> &RuleTables {
        &self.rules
    }

    pub fn catalog(&self) -> &SpellCatalog {
        &self.catalog
    }

    pub fn spell_manager(&self) -> SpellManager<'_> {
        SpellManager::new(&self.catalog)
    }

    pub fn autofill(&self) -> Autofill<'_> {
        Autofill::new(&self.rules, &self.catalog)
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    pub fn chat(&self) -> &ChatEngine {
        &self.chat
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Generate every unset field of `character`.
    pub fn fill_character(&self, character: &mut Character) -> FillReport {
        self.autofill().fill_character(character)
    }

    pub fn suggestions(
        &self,
        class: &str,
        background: &str,
        race: &str,
        playstyle: Option<&str>,
    ) -> SuggestionBundle {
        self.autofill()
            .suggestions(class, background, race, playstyle)
    }

    pub fn validate_attributes(&self, attributes: &AbilityScores) -> AttributeValidation {
        validate_attributes(attributes)
    }

    pub fn validate_spell_selection(
        &self,
        class: &str,
        cantrips: &[String],
        spells: &[String],
    ) -> SpellValidation {
        self.spell_manager()
            .validate_selection(class, cantrips, spells)
    }

    pub fn recommendations(&self, character: &Character) -> RecommendationBundle {
        self.recommender.recommendations(character)
    }

    /// Merge a standard pack into the character's inventory. `None` if no
    /// pack has that name.
    pub fn apply_equipment_pack(
        &self,
        character: &mut Character,
        pack_name: &str,
    ) -> Option<PackApplication> {
        let Some(pack) = find_pack(pack_name) else {
            warn!(pack = pack_name, "Unknown equipment pack");
            return None;
        };
        Some(character.apply_equipment_pack(&pack))
    }

    pub fn level_up(&self, character: &mut Character) -> Result<u8, LevelUpError> {
        character.level_up(&self.rules)
    }

    /// Answer a chat message in character and record the exchange.
    pub fn chat_with(&self, character: &mut Character, message: &str) -> String {
        self.chat.chat(character, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_has_builtin_catalog() {
        let engine = SheetEngine::default();
        assert!(!engine.catalog().is_empty());
        assert!(engine.spell_manager().can_cast("Wizard"));
    }

    #[test]
    fn test_missing_catalog_file_is_not_fatal() {
        let config = SheetConfig::new().with_spell_catalog("/nonexistent/spells.json");
        let engine = SheetEngine::new(&config);
        assert!(engine.catalog().is_empty());

        let mut c = Character::new("Mira", "Human", "Wizard", "Sage");
        let report = engine.fill_character(&mut c);
        assert!(report.attributes);
        assert!(c.cantrips.is_empty());
    }

    #[test]
    fn test_validate_spell_selection() {
        let engine = SheetEngine::default();
        let result = engine.validate_spell_selection(
            "Wizard",
            &["Fire Bolt".to_string(), "Fire Bolt".to_string()],
            &[],
        );
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("Duplicate cantrips")));
    }

    #[test]
    fn test_unknown_pack() {
        let engine = SheetEngine::default();
        let mut c = Character::new("Mira", "Human", "Wizard", "Sage");
        assert!(engine.apply_equipment_pack(&mut c, "Bag of Holding").is_none());
        assert!(c.items.is_empty());
        assert!(engine.apply_equipment_pack(&mut c, "Scholar's Pack").is_some());
        assert_eq!(c.items.len(), 7);
    }

    #[test]
    fn test_level_up_through_engine() {
        let engine = SheetEngine::default();
        let mut c = Character::new("Mira", "Human", "Wizard", "Sage");
        assert!(engine.level_up(&mut c).is_err());
        c.experience_points = 300;
        assert_eq!(engine.level_up(&mut c), Ok(2));
    }

    #[test]
    fn test_chat_with_records() {
        let engine = SheetEngine::default();
        let mut c = Character::new("Mira", "Human", "Wizard", "Sage");
        engine.chat_with(&mut c, "hello");
        assert_eq!(c.chat_history.len(), 1);
    }
}
