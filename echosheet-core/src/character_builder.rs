//! Step-by-step character creation.
//!
//! Supplied values are validated and kept; anything left out is generated.

use crate::abilities::{AbilityScores, Skill};
use crate::character::Character;
use crate::engine::SheetEngine;
use crate::rules::{RuleTables, MAX_LEVEL};
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Error from character building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid attributes: {}", .0.join("; "))]
    InvalidAttributes(Vec<String>),

    #[error("Expected {expected} skills, got {got}")]
    InvalidSkillCount { expected: usize, got: usize },

    #[error("Invalid skills: {}", .0.join("; "))]
    InvalidSkills(Vec<String>),

    #[error("Invalid spell selection: {}", .0.join("; "))]
    InvalidSpells(Vec<String>),
}

/// Builder for new characters.
#[derive(Debug, Clone, Default)]
pub struct CharacterBuilder {
    name: Option<String>,
    race: Option<String>,
    class: Option<String>,
    background: Option<String>,
    level: Option<u32>,
    alignment: Option<String>,
    /// Point-buy scores before racial bonuses.
    attributes: Option<AbilityScores>,
    skills: Option<Vec<String>>,
    spells: Option<(Vec<String>, Vec<String>)>,
    playstyle: Option<String>,
    backstory: Option<String>,
}

impl CharacterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn race(mut self, race: impl Into<String>) -> Self {
        self.race = Some(race.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Starting level, clamped to 1..=20.
    pub fn level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn alignment(mut self, alignment: impl Into<String>) -> Self {
        self.alignment = Some(alignment.into());
        self
    }

    /// Point-buy scores. Racial bonuses are added on build.
    pub fn attributes(mut self, scores: AbilityScores) -> Self {
        self.attributes = Some(scores);
        self
    }

    pub fn skills(mut self, skills: Vec<String>) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn spells(mut self, cantrips: Vec<String>, spells_known: Vec<String>) -> Self {
        self.spells = Some((cantrips, spells_known));
        self
    }

    /// Use a named preset for whatever is generated.
    pub fn playstyle(mut self, playstyle: impl Into<String>) -> Self {
        self.playstyle = Some(playstyle.into());
        self
    }

    pub fn backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = Some(backstory.into());
        self
    }

    pub fn build(self, engine: &SheetEngine) -> Result<Character, BuilderError> {
        self.build_with_rng(engine, &mut rand::thread_rng())
    }

    pub fn build_with_rng<R: Rng + ?Sized>(
        self,
        engine: &SheetEngine,
        rng: &mut R,
    ) -> Result<Character, BuilderError> {
        let name = required(self.name, "name")?;
        let race = required(self.race, "race")?;
        let class = required(self.class, "class")?;
        let background = required(self.background, "background")?;

        let autofill = engine.autofill();
        let mut character = Character::new(name, race, class, background);
        character.level = self.level.unwrap_or(1).clamp(1, MAX_LEVEL as u32) as u8;
        character.alignment = self.alignment.unwrap_or_default();
        character.background_story = self.backstory.unwrap_or_default();

        if let Some(scores) = self.attributes {
            let check = engine.validate_attributes(&scores);
            if !check.valid {
                return Err(BuilderError::InvalidAttributes(check.errors));
            }
            character.attributes = Some(autofill.apply_racial_bonus(scores, &character.race));
        }

        if let Some(skills) = self.skills {
            let errors = skill_errors(
                engine.rules(),
                &character.char_class,
                &character.background,
                &skills,
            );
            if !errors.is_empty() {
                return Err(BuilderError::InvalidSkills(errors));
            }
            let expected = engine
                .rules()
                .expected_skill_count(&character.char_class, &character.background);
            if skills.len() != expected {
                return Err(BuilderError::InvalidSkillCount {
                    expected,
                    got: skills.len(),
                });
            }
            character.skills = skills;
        }

        if let Some((cantrips, spells_known)) = self.spells {
            let check =
                engine.validate_spell_selection(&character.char_class, &cantrips, &spells_known);
            if !check.valid {
                return Err(BuilderError::InvalidSpells(check.errors));
            }
            character.cantrips = cantrips;
            character.spells_known = spells_known;
        }

        if let Some(playstyle) = self.playstyle.as_deref() {
            let bundle = autofill.suggestions_with_rng(
                &character.char_class,
                &character.background,
                &character.race,
                Some(playstyle),
                rng,
            );
            if character.attributes.is_none() {
                character.attributes = Some(bundle.attributes_with_race);
            }
            if character.skills.is_empty() {
                character.skills = bundle.skills;
            }
            if character.cantrips.is_empty() && character.spells_known.is_empty() {
                character.cantrips = bundle.cantrips;
                character.spells_known = bundle.spells_known;
            }
        }

        let report = autofill.fill_character_with_rng(&mut character, rng);
        debug!(character = %character.name, ?report, "Built character");
        character.add_to_history("Character created");
        Ok(character)
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, BuilderError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(BuilderError::MissingField(field))
}

/// One message per skill that is unknown, repeated, or not granted by the
/// background or offered by the class.
fn skill_errors(
    rules: &RuleTables,
    class: &str,
    background: &str,
    skills: &[String],
) -> Vec<String> {
    let granted = rules.background_skills(background);
    let options = rules.skill_options(class);
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for name in skills {
        match Skill::from_name(name) {
            None => errors.push(format!("Unknown skill: {name}")),
            Some(skill) if !granted.contains(&skill) && !options.contains(&skill) => errors.push(
                format!("{name} is not available to a {class} with the {background} background"),
            ),
            Some(skill) if !seen.insert(skill) => errors.push(format!("Duplicate skill: {name}")),
            Some(_) => {}
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn base() -> CharacterBuilder {
        CharacterBuilder::new()
            .name("Gandalf")
            .race("Human")
            .class("Wizard")
            .background("Sage")
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_generates_everything() {
        let engine = SheetEngine::default();
        let mut rng = StdRng::seed_from_u64(9);
        let c = base().build_with_rng(&engine, &mut rng).unwrap();
        assert_eq!(c.level, 1);
        assert_eq!(c.attributes.unwrap().intelligence, 16);
        assert_eq!(c.skills.len(), 4);
        assert_eq!(c.cantrips.len(), 3);
        assert_eq!(c.spells_known.len(), 6);
        assert_eq!(c.history_log.len(), 1);
        assert!(c.history_log[0].ends_with("Character created"));
    }

    #[test]
    fn test_missing_fields() {
        let engine = SheetEngine::default();
        let result = CharacterBuilder::new()
            .race("Human")
            .class("Wizard")
            .background("Sage")
            .build(&engine);
        assert_eq!(result.unwrap_err(), BuilderError::MissingField("name"));

        let result = base().background("  ").build(&engine);
        assert_eq!(result.unwrap_err(), BuilderError::MissingField("background"));
    }

    #[test]
    fn test_level_is_clamped() {
        let engine = SheetEngine::default();
        assert_eq!(base().level(0).build(&engine).unwrap().level, 1);
        let c = base().level(35).build(&engine).unwrap();
        assert_eq!(c.level, 20);
        assert_eq!(c.hit_dice, "20d6");
    }

    #[test]
    fn test_supplied_attributes_get_racial_bonus() {
        let engine = SheetEngine::default();
        let c = base()
            .attributes(AbilityScores::new(8, 14, 14, 15, 12, 8))
            .build(&engine)
            .unwrap();
        assert_eq!(c.attributes, Some(AbilityScores::new(9, 15, 15, 16, 13, 9)));
    }

    #[test]
    fn test_invalid_attributes_report_every_error() {
        let engine = SheetEngine::default();
        let err = base()
            .attributes(AbilityScores::new(18, 15, 15, 15, 15, 7))
            .build(&engine)
            .unwrap_err();
        match err {
            BuilderError::InvalidAttributes(errors) => assert!(errors.len() >= 3, "{errors:?}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_wrong_skill_count() {
        let engine = SheetEngine::default();
        let err = base()
            .skills(strings(&["Arcana", "History"]))
            .build(&engine)
            .unwrap_err();
        assert_eq!(err, BuilderError::InvalidSkillCount { expected: 4, got: 2 });
    }

    #[test]
    fn test_repeated_and_unknown_skills_are_rejected() {
        let engine = SheetEngine::default();
        let err = base()
            .skills(strings(&["Arcana", "Arcana", "Arcana", "Basket Weaving"]))
            .build(&engine)
            .unwrap_err();
        assert_eq!(
            err,
            BuilderError::InvalidSkills(strings(&[
                "Duplicate skill: Arcana",
                "Duplicate skill: Arcana",
                "Unknown skill: Basket Weaving",
            ]))
        );
    }

    #[test]
    fn test_skill_outside_class_and_background_is_rejected() {
        let engine = SheetEngine::default();
        // Stealth is neither a Wizard option nor a Sage grant
        let err = base()
            .skills(strings(&["Arcana", "History", "Insight", "Stealth"]))
            .build(&engine)
            .unwrap_err();
        match err {
            BuilderError::InvalidSkills(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].starts_with("Stealth is not available"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_supplied_skills_and_spells_are_kept() {
        let engine = SheetEngine::default();
        let c = base()
            .skills(strings(&["Arcana", "History", "Insight", "Religion"]))
            .spells(strings(&["Light"]), strings(&["Shield", "Sleep"]))
            .build(&engine)
            .unwrap();
        assert_eq!(c.skills[2], "Insight");
        assert_eq!(c.cantrips, strings(&["Light"]));
        assert_eq!(c.spells_known, strings(&["Shield", "Sleep"]));
    }

    #[test]
    fn test_invalid_spells() {
        let engine = SheetEngine::default();
        let err = base()
            .spells(strings(&["Fire Bolt", "Fire Bolt"]), Vec::new())
            .build(&engine)
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidSpells(_)));
        assert!(err.to_string().contains("Duplicate cantrips"));
    }

    #[test]
    fn test_playstyle_drives_generation() {
        let engine = SheetEngine::default();
        let mut rng = StdRng::seed_from_u64(1);
        let c = base()
            .background("Noble")
            .playstyle("evoker")
            .build_with_rng(&engine, &mut rng)
            .unwrap();
        // evoker preset plus +1 everywhere for Humans
        assert_eq!(c.attributes, Some(AbilityScores::new(9, 11, 15, 16, 14, 13)));
        assert_eq!(c.skills, strings(&["History", "Persuasion", "Arcana", "Investigation"]));
        assert_eq!(c.cantrips[0], "Fire Bolt");
    }
}
