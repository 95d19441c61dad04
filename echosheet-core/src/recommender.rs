//! Advisory recommendations for a character's next choices.
//!
//! Everything here reads a character snapshot and returns plain data; nothing
//! is mutated.

use crate::abilities::Ability;
use crate::character::Character;
use crate::rules::MAX_LEVEL;
use serde::{Deserialize, Serialize};

/// How many spells a recommendation lists.
const SPELL_PICKS: usize = 3;

/// How many skills a recommendation lists.
const SKILL_PICKS: usize = 2;

/// Levels that grant an ability score improvement or feat.
const ASI_LEVELS: [u8; 5] = [4, 8, 12, 16, 19];

/// A single pick out of a fixed list of options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickRecommendation {
    pub options: Vec<String>,
    pub recommended: Option<String>,
    pub reason: String,
}

/// A short list filtered against what the character already has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecommendation {
    pub recommended: Vec<String>,
    pub all_available: Vec<String>,
    pub reason: String,
}

/// What the next level brings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextLevelAdvice {
    /// `None` at the level cap.
    pub level: Option<u8>,
    pub proficiency_bonus: i8,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    pub subclass: PickRecommendation,
    pub spells: ListRecommendation,
    pub skills: ListRecommendation,
    pub feats: PickRecommendation,
    pub next_level: NextLevelAdvice,
}

/// Table-driven recommendation engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recommender;

impl Recommender {
    pub fn new() -> Self {
        Self
    }

    pub fn recommendations(&self, character: &Character) -> RecommendationBundle {
        RecommendationBundle {
            subclass: self.subclass(character),
            spells: self.spells(character),
            skills: self.skills(character),
            feats: self.feats(character),
            next_level: self.next_level(character),
        }
    }

    /// Fighters pick by STR against DEX, Wizards by an INT 16 threshold,
    /// everyone else gets their first listed subclass.
    pub fn subclass(&self, character: &Character) -> PickRecommendation {
        let class = character.char_class.as_str();
        let options = subclasses(class);
        if options.is_empty() {
            return PickRecommendation {
                reason: "Class not supported".to_string(),
                ..Default::default()
            };
        }

        let (recommended, reason) = match class {
            "Fighter" if score(character, Ability::Strength) > score(character, Ability::Dexterity) => (
                "Champion",
                "Your high Strength makes you ideal for melee combat".to_string(),
            ),
            "Fighter" => (
                "Battle Master",
                "Your Dexterity allows for effective tactical maneuvers".to_string(),
            ),
            "Wizard" if score(character, Ability::Intelligence) >= 16 => (
                "Evocation",
                "Your high Intelligence maximizes offensive spell damage".to_string(),
            ),
            "Wizard" => (
                "Abjuration",
                "Protection and defense to complement your attributes".to_string(),
            ),
            _ => (options[0], format!("Standard subclass for {class}")),
        };

        PickRecommendation {
            options: to_strings(options),
            recommended: Some(recommended.to_string()),
            reason,
        }
    }

    /// Up to three spells from the class table for levels up to the
    /// character's own, skipping any already known.
    pub fn spells(&self, character: &Character) -> ListRecommendation {
        let table = spell_table(&character.char_class);
        if table.is_empty() {
            return ListRecommendation {
                reason: "Class does not cast spells".to_string(),
                ..Default::default()
            };
        }

        let known = character.spells();
        let all_available: Vec<String> = table
            .iter()
            .filter(|(level, _)| *level <= character.level)
            .flat_map(|(_, spells)| spells.iter())
            .map(|s| s.to_string())
            .collect();
        let recommended = all_available
            .iter()
            .filter(|s| !known.contains(*s))
            .take(SPELL_PICKS)
            .cloned()
            .collect();

        ListRecommendation {
            recommended,
            all_available,
            reason: format!("Spells suited to level {}", character.level),
        }
    }

    /// Up to two skills from the class table not already possessed.
    pub fn skills(&self, character: &Character) -> ListRecommendation {
        let table = skill_table(&character.char_class);
        if table.is_empty() {
            return ListRecommendation {
                reason: "No recommendations available".to_string(),
                ..Default::default()
            };
        }

        let recommended = table
            .iter()
            .filter(|s| !character.skills.iter().any(|have| have == *s))
            .take(SKILL_PICKS)
            .map(|s| s.to_string())
            .collect();

        ListRecommendation {
            recommended,
            all_available: to_strings(table),
            reason: format!("Complementary skills for {}", character.char_class),
        }
    }

    pub fn feats(&self, character: &Character) -> PickRecommendation {
        let class = character.char_class.as_str();
        let options = feat_table(class);
        if options.is_empty() {
            return PickRecommendation {
                reason: "No recommended feats".to_string(),
                ..Default::default()
            };
        }

        let (recommended, reason) = match class {
            "Fighter" if score(character, Ability::Strength) > 14 => (
                "Great Weapon Master",
                "Your high Strength maximizes heavy weapon damage".to_string(),
            ),
            "Fighter" => ("Alert", "Better initiative for tactical combat".to_string()),
            "Wizard" | "Sorcerer" | "Warlock" => (
                "War Caster",
                "Advantages for casting spells in combat".to_string(),
            ),
            _ => (options[0], format!("Standard feat for {class}")),
        };

        PickRecommendation {
            options: to_strings(options),
            recommended: Some(recommended.to_string()),
            reason,
        }
    }

    pub fn next_level(&self, character: &Character) -> NextLevelAdvice {
        if character.level >= MAX_LEVEL {
            return NextLevelAdvice {
                level: None,
                proficiency_bonus: proficiency_for(MAX_LEVEL),
                suggestions: vec!["You have reached the maximum level".to_string()],
            };
        }

        let next = character.level.max(1) + 1;
        let mut suggestions = Vec::new();
        if ASI_LEVELS.contains(&next) {
            suggestions.push("Consider taking a feat or improving your main attributes".to_string());
        }
        match next {
            5 => suggestions.push(
                "Fighters, Paladins, and Rangers gain Extra Attack".to_string(),
            ),
            6 => suggestions.push("Many classes gain important features at this level".to_string()),
            _ => {}
        }

        NextLevelAdvice {
            level: Some(next),
            proficiency_bonus: proficiency_for(next),
            suggestions,
        }
    }
}

fn proficiency_for(level: u8) -> i8 {
    ((level.max(1) - 1) / 4 + 2) as i8
}

fn score(character: &Character, ability: Ability) -> u8 {
    character.attributes.map_or(0, |a| a.get(ability))
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Tables
// ============================================================================

fn subclasses(class: &str) -> &'static [&'static str] {
    match class {
        "Fighter" => &["Champion", "Battle Master", "Eldritch Knight"],
        "Wizard" => &["Evocation", "Abjuration", "Divination", "Conjuration", "Transmutation"],
        "Cleric" => &["Life", "Light", "Nature", "Tempest", "Trickery", "War"],
        "Rogue" => &["Assassin", "Thief", "Arcane Trickster"],
        "Ranger" => &["Hunter", "Beast Master"],
        "Paladin" => &["Devotion", "Ancients", "Vengeance"],
        "Bard" => &["Lore", "Valor"],
        "Sorcerer" => &["Draconic", "Wild Magic"],
        "Warlock" => &["Fiend", "Great Old One", "Archfey"],
        "Monk" => &["Open Hand", "Shadow", "Four Elements"],
        "Druid" => &["Land", "Moon"],
        "Barbarian" => &["Berserker", "Totem Warrior"],
        _ => &[],
    }
}

type SpellTable = &'static [(u8, [&'static str; 3])];

fn spell_table(class: &str) -> SpellTable {
    match class {
        "Wizard" => &[
            (1, ["Magic Missile", "Shield", "Mage Armor"]),
            (2, ["Mirror Image", "Misty Step", "Web"]),
            (3, ["Fireball", "Counterspell", "Fly"]),
            (4, ["Polymorph", "Wall of Fire", "Dimension Door"]),
            (5, ["Cone of Cold", "Teleportation Circle", "Wall of Force"]),
        ],
        "Cleric" => &[
            (1, ["Cure Wounds", "Bless", "Sacred Flame"]),
            (2, ["Spiritual Weapon", "Hold Person", "Silence"]),
            (3, ["Spirit Guardians", "Revivify", "Dispel Magic"]),
            (4, ["Divination", "Guardian of Faith", "Death Ward"]),
            (5, ["Mass Cure Wounds", "Commune", "Flame Strike"]),
        ],
        "Bard" => &[
            (1, ["Vicious Mockery", "Cure Wounds", "Faerie Fire"]),
            (2, ["Suggestion", "Invisibility", "Heat Metal"]),
            (3, ["Hypnotic Pattern", "Dispel Magic", "Tiny Servant"]),
            (4, ["Polymorph", "Greater Invisibility", "Dimension Door"]),
            (5, ["Mass Suggestion", "Otto's Irresistible Dance", "Power Word Stun"]),
        ],
        "Sorcerer" => &[
            (1, ["Fire Bolt", "Shield", "Burning Hands"]),
            (2, ["Misty Step", "Mirror Image", "Scorching Ray"]),
            (3, ["Fireball", "Counterspell", "Fly"]),
            (4, ["Polymorph", "Wall of Fire", "Dimension Door"]),
            (5, ["Cone of Cold", "Teleportation Circle", "Wall of Force"]),
        ],
        "Warlock" => &[
            (1, ["Eldritch Blast", "Hex", "Armor of Agathys"]),
            (2, ["Misty Step", "Mirror Image", "Suggestion"]),
            (3, ["Counterspell", "Dispel Magic", "Fly"]),
            (4, ["Dimension Door", "Wall of Fire", "Banishment"]),
            (5, ["Teleportation Circle", "Wall of Force", "Mass Suggestion"]),
        ],
        "Druid" => &[
            (1, ["Produce Flame", "Cure Wounds", "Entangle"]),
            (2, ["Heat Metal", "Spike Growth", "Pass without Trace"]),
            (3, ["Call Lightning", "Conjure Animals", "Dispel Magic"]),
            (4, ["Polymorph", "Wall of Fire", "Conjure Minor Elementals"]),
            (5, ["Mass Cure Wounds", "Commune with Nature", "Insect Plague"]),
        ],
        "Paladin" => &[
            (1, ["Cure Wounds", "Divine Favor", "Bless"]),
            (2, ["Spiritual Weapon", "Hold Person", "Zone of Truth"]),
            (3, ["Crusader's Mantle", "Revivify", "Dispel Magic"]),
            (4, ["Divination", "Guardian of Faith", "Death Ward"]),
            (5, ["Mass Cure Wounds", "Commune", "Flame Strike"]),
        ],
        "Ranger" => &[
            (1, ["Cure Wounds", "Hunter's Mark", "Goodberry"]),
            (2, ["Spike Growth", "Pass without Trace", "Silence"]),
            (3, ["Conjure Animals", "Lightning Arrow", "Dispel Magic"]),
            (4, ["Guardian of Nature", "Conjure Woodland Beings", "Freedom of Movement"]),
            (5, ["Swift Quiver", "Commune with Nature", "Tree Stride"]),
        ],
        _ => &[],
    }
}

fn skill_table(class: &str) -> &'static [&'static str] {
    match class {
        "Fighter" => &["Athletics", "Intimidation", "Perception", "Survival"],
        "Wizard" => &["Arcana", "History", "Investigation", "Religion"],
        "Cleric" => &["Insight", "Medicine", "Persuasion", "Religion"],
        "Rogue" => &["Acrobatics", "Deception", "Stealth", "Sleight of Hand"],
        "Ranger" => &["Animal Handling", "Nature", "Perception", "Survival"],
        "Paladin" => &["Athletics", "Insight", "Intimidation", "Persuasion"],
        "Bard" => &["Deception", "Performance", "Persuasion", "Stealth"],
        "Sorcerer" => &["Arcana", "Deception", "Intimidation", "Persuasion"],
        "Warlock" => &["Arcana", "Deception", "Intimidation", "Investigation"],
        "Monk" => &["Acrobatics", "Athletics", "Insight", "Stealth"],
        "Druid" => &["Animal Handling", "Insight", "Medicine", "Nature"],
        "Barbarian" => &["Athletics", "Intimidation", "Nature", "Perception"],
        _ => &[],
    }
}

fn feat_table(class: &str) -> &'static [&'static str] {
    match class {
        "Fighter" => &["Great Weapon Master", "Polearm Master", "Sentinel", "Alert"],
        "Wizard" => &["War Caster", "Resilient (CON)", "Alert", "Lucky"],
        "Cleric" => &["War Caster", "Resilient (CON)", "Alert", "Healer"],
        "Rogue" => &["Alert", "Lucky", "Mobile", "Skulker"],
        "Ranger" => &["Sharpshooter", "Alert", "Mobile", "Skulker"],
        "Paladin" => &["Great Weapon Master", "Polearm Master", "Sentinel", "War Caster"],
        "Bard" => &["War Caster", "Alert", "Lucky", "Inspiring Leader"],
        "Sorcerer" => &["War Caster", "Resilient (CON)", "Alert", "Lucky"],
        "Warlock" => &["War Caster", "Resilient (CON)", "Alert", "Lucky"],
        "Monk" => &["Mobile", "Alert", "Lucky", "Sentinel"],
        "Druid" => &["War Caster", "Resilient (CON)", "Alert", "Mobile"],
        "Barbarian" => &["Great Weapon Master", "Polearm Master", "Sentinel", "Alert"],
        _ => &[],
    }
}
