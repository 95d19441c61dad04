//! Attribute, skill, and spell allocation.
//!
//! The allocator never fails: an unknown class, race, background, or
//! playstyle degrades to a documented default and the rest of the work goes
//! ahead. Randomized steps have `*_with_rng` variants so callers and tests can
//! pin the outcome.

use crate::abilities::{
    validate_attributes, Ability, AbilityScores, AttributeValidation, Skill, POINT_BUY_BUDGET,
    STANDARD_ARRAY,
};
use crate::character::Character;
use crate::playstyles::{find_preset, presets_for, PlaystylePreset};
use crate::rules::{RuleTables, FALLBACK_ATTRIBUTES};
use crate::spell_manager::{SpellManager, SpellSuggestions, SpellValidation};
use crate::spells::{SpellCatalog, SpellInfo};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which fields a fill pass generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillReport {
    pub attributes: bool,
    pub skills: bool,
    pub spells: bool,
    pub personality_traits: bool,
    pub combat: bool,
}

impl FillReport {
    /// True when nothing was generated.
    pub fn is_empty(&self) -> bool {
        *self == FillReport::default()
    }
}

/// Self-check attached to a suggestion bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionValidation {
    pub valid: bool,
    pub attributes: AttributeValidation,
    pub expected_skill_count: usize,
    pub skill_count: usize,
    pub spells: SpellValidation,
    pub warnings: Vec<String>,
}

/// Candidate values for a new character. Nothing here is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionBundle {
    pub attributes: AbilityScores,
    pub attributes_with_race: AbilityScores,
    pub skills: Vec<String>,
    pub cantrips: Vec<String>,
    pub spells_known: Vec<String>,
    /// Cantrips followed by spells.
    pub spells: Vec<String>,
    pub available_playstyles: Vec<String>,
    /// The playstyle actually used, if the requested one exists.
    pub current_playstyle: Option<String>,
    pub validation: SuggestionValidation,
}

/// Generates legal attributes, skills, spells, and traits.
#[derive(Debug, Clone, Copy)]
pub struct Autofill<'a> {
    rules: &'a RuleTables,
    spells: SpellManager<'a>,
}

impl<'a> Autofill<'a> {
    pub fn new(rules: &'a RuleTables, catalog: &'a SpellCatalog) -> Self {
        Self {
            rules,
            spells: SpellManager::new(catalog),
        }
    }

    pub fn spell_manager(&self) -> SpellManager<'a> {
        self.spells
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// The standard array laid over the class's ability priority.
    ///
    /// Unknown classes get the fixed STR 8 / DEX 10 / CON 12 / INT 13 /
    /// WIS 14 / CHA 15 spread.
    pub fn optimized_standard_array(&self, class: &str) -> AbilityScores {
        let Some(rules) = self.rules.class(class) else {
            warn!(class, "Unknown class, using fallback attribute array");
            let mut scores = AbilityScores::default();
            for (ability, score) in FALLBACK_ATTRIBUTES {
                scores.set(ability, score);
            }
            return scores;
        };
        assign_standard_array(&rules.ability_priority)
    }

    /// Add racial bonuses. Apply only after point-buy validation; the result
    /// may exceed 15.
    pub fn apply_racial_bonus(&self, attributes: AbilityScores, race: &str) -> AbilityScores {
        let mut boosted = attributes;
        for &(ability, bonus) in self.rules.racial_bonuses(race) {
            boosted.set(ability, boosted.get(ability).saturating_add(bonus));
        }
        boosted
    }

    pub fn playstyle_presets(&self, class: &str) -> Vec<&'static str> {
        presets_for(class).iter().map(|p| p.name).collect()
    }

    pub fn playstyle_preset(&self, class: &str, name: &str) -> Option<&'static PlaystylePreset> {
        find_preset(class, name)
    }

    /// A preset's attributes if they spend exactly 27 points within 8..=15;
    /// otherwise the standard array re-derived from the class priority.
    ///
    /// An unknown preset yields the class's optimized standard array.
    pub fn attributes_for_playstyle(&self, class: &str, name: &str) -> AbilityScores {
        let Some(preset) = find_preset(class, name) else {
            warn!(class, playstyle = name, "Unknown playstyle, using standard array");
            return self.optimized_standard_array(class);
        };

        let scores = preset.scores();
        let check = validate_attributes(&scores);
        if check.valid && check.total_cost == POINT_BUY_BUDGET {
            return scores;
        }

        warn!(
            class,
            playstyle = name,
            total_cost = check.total_cost,
            "Playstyle attributes off budget, using class standard array"
        );
        self.optimized_standard_array(class)
    }

    pub fn primary_attributes(&self, class: &str) -> &'static [(Ability, &'static str)] {
        self.rules
            .class(class)
            .map(|c| c.primary_attributes)
            .unwrap_or(&[])
    }

    // ========================================================================
    // Skills
    // ========================================================================

    /// Background skills, then the class's choices from its remaining options.
    pub fn select_skills(&self, class: &str, background: &str) -> Vec<String> {
        self.select_skills_with_rng(class, background, &mut rand::thread_rng())
    }

    pub fn select_skills_with_rng<R: Rng + ?Sized>(
        &self,
        class: &str,
        background: &str,
        rng: &mut R,
    ) -> Vec<String> {
        self.select_skills_preferring(class, background, &[], rng)
    }

    /// As [`select_skills_with_rng`](Self::select_skills_with_rng), taking
    /// `preferred` class skills first when they are legal picks.
    pub fn select_skills_preferring<R: Rng + ?Sized>(
        &self,
        class: &str,
        background: &str,
        preferred: &[Skill],
        rng: &mut R,
    ) -> Vec<String> {
        let granted = self.rules.background_skills(background);
        let options = self.rules.skill_options(class);
        let choices = self.rules.skill_choices(class);

        let mut picked: Vec<Skill> = granted.to_vec();
        picked.dedup();
        let target = picked.len() + choices;

        for skill in preferred {
            if picked.len() >= target {
                break;
            }
            if options.contains(skill) && !picked.contains(skill) {
                picked.push(*skill);
            }
        }

        let remaining: Vec<Skill> = options
            .iter()
            .copied()
            .filter(|s| !picked.contains(s))
            .collect();
        // Only class options are added; if they run out the list comes back
        // short rather than holding an illegal skill.
        let needed = target - picked.len();
        picked.extend(remaining.choose_multiple(rng, needed.min(remaining.len())).copied());

        picked.iter().map(|s| s.name().to_string()).collect()
    }

    // ========================================================================
    // Spells
    // ========================================================================

    pub fn skills_for_playstyle(&self, class: &str, name: &str) -> Vec<String> {
        find_preset(class, name)
            .map(|p| p.skills.iter().map(|s| s.name().to_string()).collect())
            .unwrap_or_default()
    }

    /// The preset's recommended cantrips and spells, unfiltered.
    pub fn spells_for_playstyle(&self, class: &str, name: &str) -> SpellSuggestions {
        find_preset(class, name)
            .map(|p| SpellSuggestions {
                cantrips: p.cantrips.iter().map(|s| s.to_string()).collect(),
                spells: p.spells.iter().map(|s| s.to_string()).collect(),
            })
            .unwrap_or_default()
    }

    /// Exact-quota picks starting from `preferred` names the catalog offers
    /// the class, topped up from the regular suggestions.
    fn spells_preferring(&self, class: &str, preferred: &SpellSuggestions) -> SpellSuggestions {
        let suggested = self.spells.suggest(class);
        SpellSuggestions {
            cantrips: top_up(
                &preferred.cantrips,
                &suggested.cantrips,
                self.spells.available_cantrips(class),
                self.spells.cantrip_limit(class),
            ),
            spells: top_up(
                &preferred.spells,
                &suggested.spells,
                self.spells.available_spells(class),
                self.spells.spell_limit(class),
            ),
        }
    }

    // ========================================================================
    // Personality
    // ========================================================================

    /// Two class traits and two race traits, joined with ", ".
    pub fn personality_traits(&self, class: &str, race: &str) -> String {
        self.personality_traits_with_rng(class, race, &mut rand::thread_rng())
    }

    pub fn personality_traits_with_rng<R: Rng + ?Sized>(
        &self,
        class: &str,
        race: &str,
        rng: &mut R,
    ) -> String {
        let class_pool = self
            .rules
            .class(class)
            .map(|c| c.personality_traits)
            .unwrap_or(&[]);
        let race_pool = self
            .rules
            .race(race)
            .map(|r| r.personality_traits)
            .unwrap_or(&[]);

        let mut traits: Vec<&str> = class_pool.choose_multiple(rng, 2).copied().collect();
        traits.extend(race_pool.choose_multiple(rng, 2).copied());
        traits.join(", ")
    }

    // ========================================================================
    // Orchestration
    // ========================================================================

    /// Fill every unset field of `character`. Fields already set are left
    /// alone, so a second call changes nothing.
    pub fn fill_character(&self, character: &mut Character) -> FillReport {
        self.fill_character_with_rng(character, &mut rand::thread_rng())
    }

    pub fn fill_character_with_rng<R: Rng + ?Sized>(
        &self,
        character: &mut Character,
        rng: &mut R,
    ) -> FillReport {
        let mut report = FillReport::default();
        let class = character.char_class.clone();

        if character.attributes.is_none() {
            let base = self.optimized_standard_array(&class);
            character.attributes = Some(self.apply_racial_bonus(base, &character.race));
            report.attributes = true;
        }

        if character.skills.is_empty() {
            let skills = self.select_skills_with_rng(&class, &character.background, rng);
            if !skills.is_empty() {
                character.skills = skills;
                report.skills = true;
            }
        }

        if self.spells.can_cast(&class)
            && character.cantrips.is_empty()
            && character.spells_known.is_empty()
        {
            let suggested = self.spells.suggest(&class);
            report.spells = !suggested.cantrips.is_empty() || !suggested.spells.is_empty();
            character.cantrips = suggested.cantrips;
            character.spells_known = suggested.spells;
        }

        if character.personality_traits.trim().is_empty() {
            let traits = self.personality_traits_with_rng(&class, &character.race, rng);
            if !traits.is_empty() {
                character.personality_traits = traits;
                report.personality_traits = true;
            }
        }

        if character.hit_point_maximum == 0 {
            character.hit_point_maximum = character.hit_points(self.rules);
            if character.current_hit_points == 0 {
                character.current_hit_points = character.hit_point_maximum;
            }
            report.combat = true;
        }
        if character.hit_dice.is_empty() {
            character.hit_dice = character.hit_dice_notation(self.rules);
            report.combat = true;
        }

        debug!(character = %character.name, ?report, "Autofill pass complete");
        report
    }

    /// Read-only suggestions for a class/background/race and optional playstyle.
    pub fn suggestions(
        &self,
        class: &str,
        background: &str,
        race: &str,
        playstyle: Option<&str>,
    ) -> SuggestionBundle {
        self.suggestions_with_rng(class, background, race, playstyle, &mut rand::thread_rng())
    }

    pub fn suggestions_with_rng<R: Rng + ?Sized>(
        &self,
        class: &str,
        background: &str,
        race: &str,
        playstyle: Option<&str>,
        rng: &mut R,
    ) -> SuggestionBundle {
        let preset = playstyle.and_then(|name| find_preset(class, name));
        if let (Some(name), None) = (playstyle, preset) {
            warn!(class, playstyle = name, "Unknown playstyle requested");
        }

        let attributes = match preset {
            Some(p) => self.attributes_for_playstyle(class, p.name),
            None => self.optimized_standard_array(class),
        };
        let attributes_with_race = self.apply_racial_bonus(attributes, race);

        let preferred_skills = preset.map(|p| p.skills).unwrap_or(&[]);
        let skills = self.select_skills_preferring(class, background, preferred_skills, rng);

        let picks = if !self.spells.can_cast(class) {
            SpellSuggestions::default()
        } else if let Some(p) = preset {
            self.spells_preferring(class, &self.spells_for_playstyle(class, p.name))
        } else {
            self.spells.suggest(class)
        };

        let validation = self.validate_suggestion(class, background, &attributes, &skills, &picks);
        let spells = picks
            .cantrips
            .iter()
            .chain(picks.spells.iter())
            .cloned()
            .collect();

        SuggestionBundle {
            attributes,
            attributes_with_race,
            skills,
            cantrips: picks.cantrips,
            spells_known: picks.spells,
            spells,
            available_playstyles: self
                .playstyle_presets(class)
                .into_iter()
                .map(String::from)
                .collect(),
            current_playstyle: preset.map(|p| p.name.to_string()),
            validation,
        }
    }

    fn validate_suggestion(
        &self,
        class: &str,
        background: &str,
        attributes: &AbilityScores,
        skills: &[String],
        picks: &SpellSuggestions,
    ) -> SuggestionValidation {
        let attribute_check = validate_attributes(attributes);
        let expected_skill_count = self.rules.expected_skill_count(class, background);
        let spell_check = self
            .spells
            .validate_selection(class, &picks.cantrips, &picks.spells);

        let mut warnings = Vec::new();
        if attribute_check.total_cost != POINT_BUY_BUDGET {
            warnings.push(format!(
                "Attributes spend {} of {} points",
                attribute_check.total_cost, POINT_BUY_BUDGET
            ));
        }
        warnings.extend(attribute_check.errors.iter().cloned());
        if skills.len() != expected_skill_count {
            warnings.push(format!(
                "Expected {} skills, suggested {}",
                expected_skill_count,
                skills.len()
            ));
        }
        if picks.cantrips.len() != spell_check.cantrip_limit {
            warnings.push(format!(
                "Expected {} cantrips, suggested {}",
                spell_check.cantrip_limit,
                picks.cantrips.len()
            ));
        }
        if picks.spells.len() != spell_check.spell_limit {
            warnings.push(format!(
                "Expected {} spells, suggested {}",
                spell_check.spell_limit,
                picks.spells.len()
            ));
        }
        warnings.extend(spell_check.errors.iter().cloned());
        warnings.dedup();

        SuggestionValidation {
            valid: warnings.is_empty(),
            attributes: attribute_check,
            expected_skill_count,
            skill_count: skills.len(),
            spells: spell_check,
            warnings,
        }
    }
}

/// Standard array assigned to abilities in the given order.
fn assign_standard_array(order: &[Ability; 6]) -> AbilityScores {
    let mut scores = AbilityScores::default();
    for (ability, score) in order.iter().zip(STANDARD_ARRAY) {
        scores.set(*ability, score);
    }
    scores
}

/// Up to `limit` unique names: `preferred` entries present in `pool`, then
/// `fallback`, then the rest of `pool` in order.
fn top_up(
    preferred: &[String],
    fallback: &[String],
    pool: &[SpellInfo],
    limit: usize,
) -> Vec<String> {
    let mut picked: Vec<String> = Vec::with_capacity(limit);
    let in_pool = |name: &str| pool.iter().any(|s| s.name == name);

    let candidates = preferred
        .iter()
        .filter(|n| in_pool(n))
        .chain(fallback.iter())
        .chain(pool.iter().map(|s| &s.name));
    for name in candidates {
        if picked.len() >= limit {
            break;
        }
        if !picked.contains(name) {
            picked.push(name.clone());
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::point_buy_cost;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn cost(scores: &AbilityScores) -> u32 {
        Ability::all()
            .iter()
            .map(|a| point_buy_cost(scores.get(*a)).unwrap())
            .sum()
    }

    fn setup() -> (RuleTables, SpellCatalog) {
        (RuleTables::standard(), SpellCatalog::builtin())
    }

    #[test]
    fn test_optimized_array_follows_priority() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let wizard = autofill.optimized_standard_array("Wizard");
        assert_eq!(wizard, AbilityScores::new(8, 13, 14, 15, 12, 10));
        let fighter = autofill.optimized_standard_array("Fighter");
        assert_eq!(fighter.strength, 15);
        assert_eq!(fighter.constitution, 14);
    }

    #[test]
    fn test_optimized_array_costs_exactly_27() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        for class in rules.class_names().chain(["Artificer"]) {
            let scores = autofill.optimized_standard_array(class);
            assert_eq!(cost(&scores), 27, "{class}");
            assert!(scores.max_score() <= 15, "{class}");
        }
    }

    #[test]
    fn test_unknown_class_gets_fallback_array() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        assert_eq!(
            autofill.optimized_standard_array("Artificer"),
            AbilityScores::new(8, 10, 12, 13, 14, 15)
        );
    }

    #[test]
    fn test_racial_bonus_is_additive() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let base = AbilityScores::new(15, 14, 13, 12, 10, 8);
        let orc = autofill.apply_racial_bonus(base, "Half-Orc");
        assert_eq!(orc.strength, 17);
        assert_eq!(orc.constitution, 14);
        assert_eq!(orc.dexterity, 14);
        assert_eq!(autofill.apply_racial_bonus(base, "Aasimar"), base);
    }

    #[test]
    fn test_playstyles_cost_exactly_27() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        for class in rules.class_names() {
            for name in autofill.playstyle_presets(class) {
                let scores = autofill.attributes_for_playstyle(class, name);
                assert_eq!(cost(&scores), 27, "{class}/{name}");
                assert!(scores.max_score() <= 15, "{class}/{name}");
            }
        }
    }

    #[test]
    fn test_valid_playstyle_returned_verbatim() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        assert_eq!(
            autofill.attributes_for_playstyle("Wizard", "evoker"),
            AbilityScores::new(8, 10, 14, 15, 13, 12)
        );
    }

    #[test]
    fn test_off_budget_playstyle_uses_class_array() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        // Bard "balanced" spends 25 points
        let scores = autofill.attributes_for_playstyle("Bard", "balanced");
        assert_eq!(scores, AbilityScores::new(8, 14, 13, 10, 12, 15));
        assert_eq!(scores, autofill.optimized_standard_array("Bard"));
        assert!(scores.wisdom > scores.intelligence);
    }

    #[test]
    fn test_unknown_playstyle_falls_back() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        assert_eq!(
            autofill.attributes_for_playstyle("Wizard", "necromancer"),
            autofill.optimized_standard_array("Wizard")
        );
    }

    #[test]
    fn test_select_skills_counts_and_uniqueness() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let mut rng = StdRng::seed_from_u64(7);
        for class in rules.class_names() {
            for background in rules.background_names() {
                let skills = autofill.select_skills_with_rng(class, background, &mut rng);
                let expected = rules.expected_skill_count(class, background);
                assert_eq!(skills.len(), expected, "{class}/{background}");
                let unique: HashSet<_> = skills.iter().collect();
                assert_eq!(unique.len(), skills.len(), "{class}/{background}");
                let granted: Vec<String> = rules
                    .background_skills(background)
                    .iter()
                    .map(|s| s.name().to_string())
                    .collect();
                assert_eq!(&skills[..granted.len()], &granted[..]);
                for name in &skills {
                    let skill = Skill::from_name(name).unwrap();
                    assert!(
                        rules.background_skills(background).contains(&skill)
                            || rules.skill_options(class).contains(&skill),
                        "{class}/{background}: {name}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_select_skills_background_first() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let mut rng = StdRng::seed_from_u64(1);
        // Acolyte grants Insight and Religion, both also Cleric options
        let skills = autofill.select_skills_with_rng("Cleric", "Acolyte", &mut rng);
        assert_eq!(skills.len(), 4);
        assert_eq!(skills[0], "Insight");
        assert_eq!(skills[1], "Religion");
    }

    #[test]
    fn test_select_skills_unknown_inputs() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        assert!(autofill.select_skills("Artificer", "Pirate").is_empty());
        assert_eq!(autofill.select_skills("Artificer", "Sage"), vec!["Arcana", "History"]);
    }

    #[test]
    fn test_personality_traits() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let mut rng = StdRng::seed_from_u64(3);
        let traits = autofill.personality_traits_with_rng("Fighter", "Dwarf", &mut rng);
        assert_eq!(traits.split(", ").count(), 4);
        assert_eq!(autofill.personality_traits("Artificer", "Aasimar"), "");
    }

    #[test]
    fn test_fill_character_wizard() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let mut rng = StdRng::seed_from_u64(11);
        let mut c = Character::new("Mira", "Human", "Wizard", "Sage");
        let report = autofill.fill_character_with_rng(&mut c, &mut rng);

        assert!(report.attributes && report.skills && report.spells);
        assert_eq!(c.attributes, Some(AbilityScores::new(9, 14, 15, 16, 13, 11)));
        assert_eq!(c.skills.len(), 4);
        assert_eq!(c.cantrips.len(), 3);
        assert_eq!(c.spells_known.len(), 6);
        assert!(!c.personality_traits.is_empty());
        // d6 + CON 15 (+2)
        assert_eq!(c.hit_point_maximum, 8);
        assert_eq!(c.current_hit_points, 8);
        assert_eq!(c.hit_dice, "1d6");
    }

    #[test]
    fn test_fill_character_is_idempotent() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let mut rng = StdRng::seed_from_u64(5);
        let mut c = Character::new("Mira", "Elf", "Rogue", "Criminal");
        autofill.fill_character_with_rng(&mut c, &mut rng);
        let snapshot = c.clone();
        let report = autofill.fill_character_with_rng(&mut c, &mut rng);
        assert!(report.is_empty());
        assert_eq!(c, snapshot);
    }

    #[test]
    fn test_fill_keeps_supplied_fields() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let mut c = Character::new("Tor", "Dwarf", "Cleric", "Acolyte");
        c.attributes = Some(AbilityScores::new(14, 8, 15, 10, 15, 8));
        c.cantrips = vec!["Guidance".to_string()];
        let report = autofill.fill_character(&mut c);
        assert!(!report.attributes);
        assert!(!report.spells);
        assert_eq!(c.attributes.unwrap().constitution, 15);
        assert_eq!(c.cantrips, vec!["Guidance".to_string()]);
        assert!(c.spells_known.is_empty());
    }

    #[test]
    fn test_fill_non_caster_gets_no_spells() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let mut c = Character::new("Grog", "Half-Orc", "Barbarian", "Outlander");
        let report = autofill.fill_character(&mut c);
        assert!(!report.spells);
        assert!(c.cantrips.is_empty() && c.spells_known.is_empty());
    }

    #[test]
    fn test_fill_survives_empty_catalog() {
        let rules = RuleTables::standard();
        let catalog = SpellCatalog::empty();
        let autofill = Autofill::new(&rules, &catalog);
        let mut c = Character::new("Mira", "Human", "Wizard", "Sage");
        let report = autofill.fill_character(&mut c);
        assert!(report.attributes && report.skills);
        assert!(!report.spells);
    }

    #[test]
    fn test_suggestions_default_path() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let mut rng = StdRng::seed_from_u64(2);
        let bundle = autofill.suggestions_with_rng("Wizard", "Sage", "Gnome", None, &mut rng);
        assert_eq!(bundle.attributes.intelligence, 15);
        assert_eq!(bundle.attributes_with_race.intelligence, 17);
        assert_eq!(bundle.skills.len(), 4);
        assert_eq!(bundle.cantrips.len(), 3);
        assert_eq!(bundle.spells_known.len(), 6);
        assert_eq!(bundle.spells.len(), 9);
        assert_eq!(bundle.available_playstyles, vec!["balanced", "evoker", "utility"]);
        assert_eq!(bundle.current_playstyle, None);
        assert!(bundle.validation.valid, "{:?}", bundle.validation.warnings);
    }

    #[test]
    fn test_suggestions_with_playstyle() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let mut rng = StdRng::seed_from_u64(4);
        let bundle =
            autofill.suggestions_with_rng("Wizard", "Noble", "Elf", Some("evoker"), &mut rng);
        assert_eq!(bundle.current_playstyle.as_deref(), Some("evoker"));
        assert_eq!(bundle.cantrips[..2], ["Fire Bolt", "Ray of Frost"]);
        assert_eq!(
            bundle.spells_known[..3],
            ["Burning Hands", "Magic Missile", "Thunderwave"]
        );
        assert_eq!(bundle.spells_known.len(), 6);
        // Noble grants History; Arcana and Investigation come from the preset
        assert_eq!(bundle.skills, vec!["History", "Persuasion", "Arcana", "Investigation"]);
        assert!(bundle.validation.valid, "{:?}", bundle.validation.warnings);
    }

    #[test]
    fn test_suggestions_drop_preset_spells_missing_from_catalog() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        // The warlock preset lists Eldritch Blast as a spell; it is a cantrip
        let bundle = autofill.suggestions("Warlock", "Sage", "Tiefling", Some("balanced"));
        assert!(!bundle.spells_known.contains(&"Eldritch Blast".to_string()));
        assert_eq!(bundle.spells_known.len(), 2);
        assert_eq!(bundle.cantrips, vec!["Eldritch Blast", "Prestidigitation"]);
        assert!(bundle.validation.valid, "{:?}", bundle.validation.warnings);
    }

    #[test]
    fn test_suggestions_unknown_class_reports_warnings() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let bundle = autofill.suggestions("Artificer", "Sage", "Human", Some("balanced"));
        assert_eq!(bundle.current_playstyle, None);
        assert!(bundle.available_playstyles.is_empty());
        assert_eq!(bundle.skills, vec!["Arcana", "History"]);
        assert!(bundle.spells.is_empty());
        assert!(bundle.validation.valid);
    }

    #[test]
    fn test_primary_attributes() {
        let (rules, catalog) = setup();
        let autofill = Autofill::new(&rules, &catalog);
        let primary = autofill.primary_attributes("Rogue");
        assert_eq!(primary[0].0, Ability::Dexterity);
        assert!(autofill.primary_attributes("Artificer").is_empty());
    }
}
