//! Rule tables for classes, races, and backgrounds.
//!
//! `RuleTables` is built once and handed by reference to everything that
//! needs it. Keys are exact, case-sensitive names ("Wizard", "Half-Elf").
//! Unknown keys resolve to documented defaults instead of failing.

use crate::abilities::{Ability, Skill};
use std::collections::BTreeMap;

use Ability::*;

/// Highest attainable character level.
pub const MAX_LEVEL: u8 = 20;

/// Hit die used for a class missing from the tables.
pub const DEFAULT_HIT_DIE: u8 = 8;

/// Walking speed for a race missing from the tables.
pub const DEFAULT_SPEED: u32 = 30;

/// Combat role for a class missing from the tables.
pub const DEFAULT_COMBAT_ROLE: &str = "Versatile";

/// Weight of an item that matches nothing in the weight table, in pounds.
pub const DEFAULT_ITEM_WEIGHT: f64 = 1.0;

/// Weight of a single coin, in pounds (50 coins per pound).
pub const COIN_WEIGHT: f64 = 0.02;

/// Cumulative XP needed to reach each level, indexed by `level - 1`.
pub const XP_THRESHOLDS: [u32; 20] = [
    0, 300, 900, 2700, 6500, 14000, 23000, 34000, 48000, 64000, 85000, 100000, 120000, 140000,
    165000, 195000, 225000, 265000, 305000, 355000,
];

/// Default item weights. Matched by case-insensitive substring, first hit wins.
pub const DEFAULT_WEIGHTS: &[(&str, f64)] = &[
    ("backpack", 5.0),
    ("bedroll", 7.0),
    ("rations", 2.0),
    ("waterskin", 5.0),
    ("torch", 1.0),
    ("rope", 10.0),
    ("tent", 20.0),
    ("armor", 40.0),
    ("weapon", 3.0),
    ("shield", 6.0),
    ("potion", 0.5),
    ("scroll", 0.1),
    ("book", 5.0),
    ("clothes", 3.0),
    ("boots", 2.0),
    ("helmet", 4.0),
    ("gloves", 1.0),
    ("belt", 1.0),
    ("pouch", 1.0),
    ("coin", 0.02),
];

/// Spell slots per slot level (1st..5th) for a full caster, indexed by `level - 1`.
pub const FULL_CASTER_SLOTS: [[u8; 5]; 10] = [
    [2, 0, 0, 0, 0],
    [3, 0, 0, 0, 0],
    [4, 2, 0, 0, 0],
    [4, 3, 0, 0, 0],
    [4, 3, 2, 0, 0],
    [4, 3, 3, 0, 0],
    [4, 3, 3, 1, 0],
    [4, 3, 3, 2, 0],
    [4, 3, 3, 3, 1],
    [4, 3, 3, 3, 2],
];

/// Ability scores handed out when a class is unknown.
pub const FALLBACK_ATTRIBUTES: [(Ability, u8); 6] = [
    (Strength, 8),
    (Dexterity, 10),
    (Constitution, 12),
    (Intelligence, 13),
    (Wisdom, 14),
    (Charisma, 15),
];

// ============================================================================
// Table entries
// ============================================================================

/// Static data for one class.
#[derive(Debug, Clone)]
pub struct ClassRules {
    pub name: &'static str,
    pub hit_die: u8,
    pub saving_throws: [Ability; 2],
    /// How many skills the class picks from `skill_options`.
    pub skill_choices: usize,
    pub skill_options: &'static [Skill],
    /// Abilities from most to least important; drives the standard array.
    pub ability_priority: [Ability; 6],
    pub spellcasting_ability: Option<Ability>,
    pub combat_role: &'static str,
    pub personality_traits: &'static [&'static str],
    /// Key abilities and what they do for the class.
    pub primary_attributes: &'static [(Ability, &'static str)],
}

/// Static data for one race.
#[derive(Debug, Clone)]
pub struct RaceRules {
    pub name: &'static str,
    pub ability_bonuses: &'static [(Ability, u8)],
    pub speed: u32,
    pub personality_traits: &'static [&'static str],
}

/// Static data for one background.
#[derive(Debug, Clone)]
pub struct BackgroundRules {
    pub name: &'static str,
    pub skills: &'static [Skill],
    pub tool_proficiencies: &'static [&'static str],
    pub languages: u8,
    pub equipment: &'static [&'static str],
}

/// All rule tables, keyed by exact name.
#[derive(Debug, Clone)]
pub struct RuleTables {
    classes: BTreeMap<&'static str, ClassRules>,
    races: BTreeMap<&'static str, RaceRules>,
    backgrounds: BTreeMap<&'static str, BackgroundRules>,
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleTables {
    /// The SRD classes, races, and backgrounds.
    pub fn standard() -> Self {
        Self {
            classes: standard_classes()
                .into_iter()
                .map(|c| (c.name, c))
                .collect(),
            races: standard_races().into_iter().map(|r| (r.name, r)).collect(),
            backgrounds: standard_backgrounds()
                .into_iter()
                .map(|b| (b.name, b))
                .collect(),
        }
    }

    pub fn class(&self, name: &str) -> Option<&ClassRules> {
        self.classes.get(name)
    }

    pub fn race(&self, name: &str) -> Option<&RaceRules> {
        self.races.get(name)
    }

    pub fn background(&self, name: &str) -> Option<&BackgroundRules> {
        self.backgrounds.get(name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.classes.keys().copied()
    }

    pub fn race_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.races.keys().copied()
    }

    pub fn background_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.backgrounds.keys().copied()
    }

    // ------------------------------------------------------------------------
    // Lookups with defaults
    // ------------------------------------------------------------------------

    pub fn hit_die(&self, class: &str) -> u8 {
        self.class(class).map_or(DEFAULT_HIT_DIE, |c| c.hit_die)
    }

    pub fn skill_choices(&self, class: &str) -> usize {
        self.class(class).map_or(0, |c| c.skill_choices)
    }

    pub fn skill_options(&self, class: &str) -> &[Skill] {
        self.class(class).map(|c| c.skill_options).unwrap_or(&[])
    }

    pub fn background_skills(&self, background: &str) -> &[Skill] {
        self.background(background)
            .map(|b| b.skills)
            .unwrap_or(&[])
    }

    /// Background grants plus class choices.
    pub fn expected_skill_count(&self, class: &str, background: &str) -> usize {
        self.background_skills(background).len() + self.skill_choices(class)
    }

    pub fn saving_throws(&self, class: &str) -> &[Ability] {
        self.class(class)
            .map(|c| &c.saving_throws[..])
            .unwrap_or(&[])
    }

    pub fn spellcasting_ability(&self, class: &str) -> Option<Ability> {
        self.class(class).and_then(|c| c.spellcasting_ability)
    }

    pub fn combat_role(&self, class: &str) -> &str {
        self.class(class).map_or(DEFAULT_COMBAT_ROLE, |c| c.combat_role)
    }

    pub fn speed(&self, race: &str) -> u32 {
        self.race(race).map_or(DEFAULT_SPEED, |r| r.speed)
    }

    pub fn racial_bonuses(&self, race: &str) -> &[(Ability, u8)] {
        self.race(race).map(|r| r.ability_bonuses).unwrap_or(&[])
    }

    /// XP required to reach `level`, `None` past the cap.
    pub fn xp_threshold(&self, level: u8) -> Option<u32> {
        if level == 0 {
            return Some(0);
        }
        XP_THRESHOLDS.get(level as usize - 1).copied()
    }

    /// Full-caster slots of `slot_level` at character `level`; 0 off the table.
    pub fn full_caster_slots(&self, level: u8, slot_level: u8) -> u8 {
        if level == 0 || slot_level == 0 {
            return 0;
        }
        FULL_CASTER_SLOTS
            .get(level as usize - 1)
            .and_then(|row| row.get(slot_level as usize - 1))
            .copied()
            .unwrap_or(0)
    }

    /// Default weight for an item name by case-insensitive substring match.
    pub fn default_item_weight(&self, item: &str) -> f64 {
        let lowered = item.to_lowercase();
        DEFAULT_WEIGHTS
            .iter()
            .find(|(key, _)| lowered.contains(key))
            .map_or(DEFAULT_ITEM_WEIGHT, |(_, w)| *w)
    }
}

// ============================================================================
// Standard data
// ============================================================================

use Skill::*;

fn standard_classes() -> Vec<ClassRules> {
    vec![
        ClassRules {
            name: "Barbarian",
            hit_die: 12,
            saving_throws: [Strength, Constitution],
            skill_choices: 2,
            skill_options: &[AnimalHandling, Athletics, Intimidation, Nature, Perception, Survival],
            ability_priority: [Strength, Constitution, Dexterity, Wisdom, Charisma, Intelligence],
            spellcasting_ability: None,
            combat_role: "Frontline Striker",
            personality_traits: &["Fierce", "Loyal", "Direct"],
            primary_attributes: &[
                (Strength, "Attack and damage"),
                (Constitution, "Hit points and rage benefits"),
                (Dexterity, "Armor class and initiative"),
            ],
        },
        ClassRules {
            name: "Bard",
            hit_die: 8,
            saving_throws: [Dexterity, Charisma],
            skill_choices: 3,
            skill_options: &[
                Acrobatics, AnimalHandling, Arcana, Athletics, Deception, History, Insight,
                Intimidation, Investigation, Medicine, Nature, Perception, Performance,
                Persuasion, Religion, SleightOfHand, Stealth, Survival,
            ],
            ability_priority: [Charisma, Dexterity, Constitution, Wisdom, Intelligence, Strength],
            spellcasting_ability: Some(Charisma),
            combat_role: "Support Caster",
            personality_traits: &["Charismatic", "Artistic", "Sociable"],
            primary_attributes: &[
                (Charisma, "Spellcasting and inspiration"),
                (Dexterity, "Armor class and initiative"),
                (Constitution, "Hit points and concentration"),
            ],
        },
        ClassRules {
            name: "Cleric",
            hit_die: 8,
            saving_throws: [Wisdom, Charisma],
            skill_choices: 2,
            skill_options: &[History, Insight, Medicine, Persuasion, Religion],
            ability_priority: [Wisdom, Constitution, Strength, Dexterity, Charisma, Intelligence],
            spellcasting_ability: Some(Wisdom),
            combat_role: "Support Caster",
            personality_traits: &["Devout", "Compassionate", "Inspiring"],
            primary_attributes: &[
                (Wisdom, "Spellcasting and spell save DC"),
                (Constitution, "Hit points and concentration"),
                (Strength, "Melee combat and armor"),
            ],
        },
        ClassRules {
            name: "Druid",
            hit_die: 8,
            saving_throws: [Intelligence, Wisdom],
            skill_choices: 2,
            skill_options: &[
                AnimalHandling, Arcana, Insight, Medicine, Nature, Perception, Religion, Survival,
            ],
            ability_priority: [Wisdom, Constitution, Dexterity, Intelligence, Charisma, Strength],
            spellcasting_ability: Some(Wisdom),
            combat_role: "Control Caster",
            personality_traits: &["Nature-connected", "Wise", "Protector"],
            primary_attributes: &[
                (Wisdom, "Spellcasting and spell save DC"),
                (Constitution, "Hit points and concentration"),
                (Dexterity, "Armor class and initiative"),
            ],
        },
        ClassRules {
            name: "Fighter",
            hit_die: 10,
            saving_throws: [Strength, Constitution],
            skill_choices: 2,
            skill_options: &[
                Acrobatics, Athletics, History, Insight, Intimidation, Perception, Survival,
            ],
            ability_priority: [Strength, Constitution, Dexterity, Wisdom, Intelligence, Charisma],
            spellcasting_ability: None,
            combat_role: "Frontline Defender",
            personality_traits: &["Brave", "Disciplined", "Protector"],
            primary_attributes: &[
                (Strength, "Primary attack and damage"),
                (Constitution, "Hit points and survivability"),
                (Dexterity, "Armor class and initiative"),
            ],
        },
        ClassRules {
            name: "Monk",
            hit_die: 8,
            saving_throws: [Strength, Dexterity],
            skill_choices: 2,
            skill_options: &[Acrobatics, Athletics, History, Insight, Religion, Stealth],
            ability_priority: [Dexterity, Wisdom, Constitution, Strength, Intelligence, Charisma],
            spellcasting_ability: None,
            combat_role: "Mobile Striker",
            personality_traits: &["Disciplined", "Peaceful", "Philosophical"],
            primary_attributes: &[
                (Dexterity, "Attack, damage, and armor class"),
                (Wisdom, "Armor class and class features"),
                (Constitution, "Hit points and survivability"),
            ],
        },
        ClassRules {
            name: "Paladin",
            hit_die: 10,
            saving_throws: [Wisdom, Charisma],
            skill_choices: 2,
            skill_options: &[Athletics, Insight, Intimidation, Medicine, Persuasion, Religion],
            ability_priority: [Strength, Charisma, Constitution, Wisdom, Dexterity, Intelligence],
            spellcasting_ability: Some(Charisma),
            combat_role: "Frontline Defender",
            personality_traits: &["Honorable", "Just", "Inspiring"],
            primary_attributes: &[
                (Strength, "Melee combat and damage"),
                (Charisma, "Spellcasting and class features"),
                (Constitution, "Hit points and survivability"),
            ],
        },
        ClassRules {
            name: "Ranger",
            hit_die: 10,
            saving_throws: [Strength, Dexterity],
            skill_choices: 3,
            skill_options: &[
                AnimalHandling, Athletics, Insight, Investigation, Nature, Perception, Stealth,
                Survival,
            ],
            ability_priority: [Dexterity, Wisdom, Constitution, Strength, Intelligence, Charisma],
            spellcasting_ability: Some(Wisdom),
            combat_role: "Ranged Striker",
            personality_traits: &["Observant", "Practical", "Nature protector"],
            primary_attributes: &[
                (Dexterity, "Ranged combat and armor class"),
                (Wisdom, "Spellcasting and perception"),
                (Constitution, "Hit points and concentration"),
            ],
        },
        ClassRules {
            name: "Rogue",
            hit_die: 8,
            saving_throws: [Dexterity, Intelligence],
            skill_choices: 4,
            skill_options: &[
                Acrobatics, Athletics, Deception, Insight, Intimidation, Investigation,
                Perception, Performance, Persuasion, SleightOfHand, Stealth,
            ],
            ability_priority: [Dexterity, Constitution, Intelligence, Wisdom, Charisma, Strength],
            spellcasting_ability: None,
            combat_role: "Skirmisher",
            personality_traits: &["Cunning", "Independent", "Opportunistic"],
            primary_attributes: &[
                (Dexterity, "Attack, damage, armor class, and skills"),
                (Constitution, "Hit points and survivability"),
                (Intelligence, "Skill checks and expertise"),
            ],
        },
        ClassRules {
            name: "Sorcerer",
            hit_die: 6,
            saving_throws: [Constitution, Charisma],
            skill_choices: 2,
            skill_options: &[Arcana, Deception, Insight, Intimidation, Persuasion, Religion],
            ability_priority: [Charisma, Constitution, Dexterity, Wisdom, Intelligence, Strength],
            spellcasting_ability: Some(Charisma),
            combat_role: "Blaster Caster",
            personality_traits: &["Mysterious", "Charismatic", "Unpredictable"],
            primary_attributes: &[
                (Charisma, "Spellcasting and spell save DC"),
                (Constitution, "Hit points and concentration"),
                (Dexterity, "Armor class and initiative"),
            ],
        },
        ClassRules {
            name: "Warlock",
            hit_die: 8,
            saving_throws: [Wisdom, Charisma],
            skill_choices: 2,
            skill_options: &[
                Arcana, Deception, History, Intimidation, Investigation, Nature, Religion,
            ],
            ability_priority: [Charisma, Constitution, Dexterity, Wisdom, Intelligence, Strength],
            spellcasting_ability: Some(Charisma),
            combat_role: "Blaster Caster",
            personality_traits: &["Mysterious", "Ambitious", "Pragmatic"],
            primary_attributes: &[
                (Charisma, "Spellcasting and spell save DC"),
                (Constitution, "Hit points and concentration"),
                (Dexterity, "Armor class and initiative"),
            ],
        },
        ClassRules {
            name: "Wizard",
            hit_die: 6,
            saving_throws: [Intelligence, Wisdom],
            skill_choices: 2,
            skill_options: &[Arcana, History, Insight, Investigation, Religion],
            ability_priority: [Intelligence, Constitution, Dexterity, Wisdom, Charisma, Strength],
            spellcasting_ability: Some(Intelligence),
            combat_role: "Control Caster",
            personality_traits: &["Curious", "Intellectual", "Mysterious"],
            primary_attributes: &[
                (Intelligence, "Spellcasting and spell save DC"),
                (Constitution, "Hit points and concentration"),
                (Dexterity, "Armor class and initiative"),
            ],
        },
    ]
}

fn standard_races() -> Vec<RaceRules> {
    vec![
        RaceRules {
            name: "Human",
            ability_bonuses: &[
                (Strength, 1),
                (Dexterity, 1),
                (Constitution, 1),
                (Intelligence, 1),
                (Wisdom, 1),
                (Charisma, 1),
            ],
            speed: 30,
            personality_traits: &["Adaptable", "Ambitious"],
        },
        RaceRules {
            name: "Elf",
            ability_bonuses: &[(Dexterity, 2)],
            speed: 30,
            personality_traits: &["Elegant", "Long-lived", "Magic-connected"],
        },
        RaceRules {
            name: "Dwarf",
            ability_bonuses: &[(Constitution, 2)],
            speed: 25,
            personality_traits: &["Resilient", "Hardworking", "Honorable"],
        },
        RaceRules {
            name: "Halfling",
            ability_bonuses: &[(Dexterity, 2)],
            speed: 25,
            personality_traits: &["Optimistic", "Agile", "Sociable"],
        },
        RaceRules {
            name: "Dragonborn",
            ability_bonuses: &[(Strength, 2), (Charisma, 1)],
            speed: 30,
            personality_traits: &["Proud", "Brave", "Honorable"],
        },
        RaceRules {
            name: "Tiefling",
            ability_bonuses: &[(Intelligence, 1), (Charisma, 2)],
            speed: 30,
            personality_traits: &["Mysterious", "Charismatic", "Resilient"],
        },
        RaceRules {
            name: "Half-Elf",
            ability_bonuses: &[(Charisma, 2)],
            speed: 30,
            personality_traits: &["Adaptable", "Diplomatic"],
        },
        RaceRules {
            name: "Half-Orc",
            ability_bonuses: &[(Strength, 2), (Constitution, 1)],
            speed: 30,
            personality_traits: &["Strong", "Loyal", "Direct"],
        },
        RaceRules {
            name: "Gnome",
            ability_bonuses: &[(Intelligence, 2)],
            speed: 25,
            personality_traits: &["Curious", "Inventive", "Cheerful"],
        },
    ]
}

fn standard_backgrounds() -> Vec<BackgroundRules> {
    vec![
        BackgroundRules {
            name: "Acolyte",
            skills: &[Insight, Religion],
            tool_proficiencies: &[],
            languages: 2,
            equipment: &["Holy symbol", "Prayer book", "Incense", "Vestments", "Common clothes", "15 gp"],
        },
        BackgroundRules {
            name: "Criminal",
            skills: &[Deception, Stealth],
            tool_proficiencies: &["Thieves' tools", "Gaming set"],
            languages: 0,
            equipment: &["Crowbar", "Dark common clothes", "15 gp"],
        },
        BackgroundRules {
            name: "Folk Hero",
            skills: &[AnimalHandling, Survival],
            tool_proficiencies: &["Artisan's tools", "Vehicles (land)"],
            languages: 0,
            equipment: &["Artisan's tools", "Shovel", "Iron pot", "Common clothes", "10 gp"],
        },
        BackgroundRules {
            name: "Noble",
            skills: &[History, Persuasion],
            tool_proficiencies: &["Gaming set"],
            languages: 1,
            equipment: &["Fine clothes", "Signet ring", "Scroll of pedigree", "25 gp"],
        },
        BackgroundRules {
            name: "Sage",
            skills: &[Arcana, History],
            tool_proficiencies: &[],
            languages: 2,
            equipment: &[
                "Bottle of black ink",
                "Quill",
                "Small knife",
                "Letter from dead colleague",
                "Common clothes",
                "10 gp",
            ],
        },
        BackgroundRules {
            name: "Soldier",
            skills: &[Athletics, Intimidation],
            tool_proficiencies: &["Gaming set", "Vehicles (land)"],
            languages: 0,
            equipment: &[
                "Insignia of rank",
                "Trophy from fallen enemy",
                "Gaming set",
                "Common clothes",
                "10 gp",
            ],
        },
        BackgroundRules {
            name: "Entertainer",
            skills: &[Acrobatics, Performance],
            tool_proficiencies: &["Disguise kit", "Musical instrument"],
            languages: 0,
            equipment: &["Musical instrument", "Costume", "Admirer's favor", "15 gp"],
        },
        BackgroundRules {
            name: "Guild Artisan",
            skills: &[Insight, Persuasion],
            tool_proficiencies: &["Artisan's tools"],
            languages: 1,
            equipment: &["Artisan's tools", "Letter of introduction", "Traveler's clothes", "15 gp"],
        },
        BackgroundRules {
            name: "Hermit",
            skills: &[Medicine, Religion],
            tool_proficiencies: &["Herbalism kit"],
            languages: 1,
            equipment: &["Scroll case", "Blanket", "Winter clothes", "Herbalism kit", "5 gp"],
        },
        BackgroundRules {
            name: "Outlander",
            skills: &[Athletics, Survival],
            tool_proficiencies: &["Musical instrument"],
            languages: 1,
            equipment: &["Staff", "Hunting trap", "Trophy from animal", "Traveler's clothes", "10 gp"],
        },
        BackgroundRules {
            name: "Urchin",
            skills: &[SleightOfHand, Stealth],
            tool_proficiencies: &["Disguise kit", "Thieves' tools"],
            languages: 0,
            equipment: &[
                "Small knife",
                "Map of home city",
                "Pet mouse",
                "Token from parents",
                "Common clothes",
                "10 gp",
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::{point_buy_cost, STANDARD_ARRAY};
    use std::collections::HashSet;

    #[test]
    fn test_all_classes_present() {
        let tables = RuleTables::standard();
        assert_eq!(tables.class_names().count(), 12);
        assert_eq!(tables.race_names().count(), 9);
        assert_eq!(tables.background_names().count(), 11);
    }

    #[test]
    fn test_class_lookup_is_case_sensitive() {
        let tables = RuleTables::standard();
        assert!(tables.class("Wizard").is_some());
        assert!(tables.class("wizard").is_none());
        assert_eq!(tables.hit_die("wizard"), DEFAULT_HIT_DIE);
    }

    #[test]
    fn test_unknown_keys_use_defaults() {
        let tables = RuleTables::standard();
        assert_eq!(tables.hit_die("Artificer"), 8);
        assert_eq!(tables.combat_role("Artificer"), "Versatile");
        assert!(tables.skill_options("Artificer").is_empty());
        assert_eq!(tables.skill_choices("Artificer"), 0);
        assert_eq!(tables.speed("Aasimar"), 30);
        assert!(tables.racial_bonuses("Aasimar").is_empty());
        assert!(tables.background_skills("Pirate").is_empty());
    }

    #[test]
    fn test_ability_priorities_are_permutations() {
        let tables = RuleTables::standard();
        for name in tables.class_names() {
            let class = tables.class(name).unwrap();
            let unique: HashSet<_> = class.ability_priority.iter().collect();
            assert_eq!(unique.len(), 6, "{name} priority repeats an ability");
        }
    }

    #[test]
    fn test_fallback_attributes_cost_full_budget() {
        let total: u32 = FALLBACK_ATTRIBUTES
            .iter()
            .map(|(_, s)| point_buy_cost(*s).unwrap())
            .sum();
        let std_total: u32 = STANDARD_ARRAY
            .iter()
            .map(|s| point_buy_cost(*s).unwrap())
            .sum();
        assert_eq!(total, std_total);
    }

    #[test]
    fn test_backgrounds_grant_two_distinct_skills() {
        let tables = RuleTables::standard();
        for name in tables.background_names() {
            let skills = tables.background_skills(name);
            assert_eq!(skills.len(), 2, "{name}");
            assert_ne!(skills[0], skills[1]);
        }
    }

    #[test]
    fn test_xp_thresholds() {
        let tables = RuleTables::standard();
        assert_eq!(tables.xp_threshold(1), Some(0));
        assert_eq!(tables.xp_threshold(5), Some(6500));
        assert_eq!(tables.xp_threshold(20), Some(355000));
        assert_eq!(tables.xp_threshold(21), None);
    }

    #[test]
    fn test_full_caster_slots() {
        let tables = RuleTables::standard();
        assert_eq!(tables.full_caster_slots(1, 1), 2);
        assert_eq!(tables.full_caster_slots(3, 2), 2);
        assert_eq!(tables.full_caster_slots(3, 3), 0);
        assert_eq!(tables.full_caster_slots(10, 5), 2);
        assert_eq!(tables.full_caster_slots(11, 1), 0);
    }

    #[test]
    fn test_default_item_weight_first_match_wins() {
        let tables = RuleTables::standard();
        assert_eq!(tables.default_item_weight("Explorer's Backpack"), 5.0);
        // "leather armor" hits "armor" before anything later in the table
        assert_eq!(tables.default_item_weight("Leather Armor"), 40.0);
        // "ropebook" contains both "rope" and "book"; rope comes first
        assert_eq!(tables.default_item_weight("ropebook"), 10.0);
        assert_eq!(tables.default_item_weight("Lute"), DEFAULT_ITEM_WEIGHT);
    }
}
