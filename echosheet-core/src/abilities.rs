//! Ability scores, skills, and point-buy costing.
//!
//! Scores serialize under their three-letter codes (`STR`, `DEX`, ...) so a
//! stored sheet reads the same way a player writes it down.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Total points available for point buy.
pub const POINT_BUY_BUDGET: u32 = 27;

/// Lowest score purchasable with point buy.
pub const MIN_POINT_BUY_SCORE: u8 = 8;

/// Highest score purchasable with point buy.
pub const MAX_POINT_BUY_SCORE: u8 = 15;

/// The base array every generated attribute set is a permutation of.
pub const STANDARD_ARRAY: [u8; 6] = [15, 14, 13, 12, 10, 8];

/// Point buy cost for a single score, `None` outside 8..=15.
pub fn point_buy_cost(score: u8) -> Option<u32> {
    match score {
        8 => Some(0),
        9 => Some(1),
        10 => Some(2),
        11 => Some(3),
        12 => Some(4),
        13 => Some(5),
        14 => Some(7),
        15 => Some(9),
        _ => None,
    }
}

/// Ability modifier for a raw score: `floor((score - 10) / 2)`.
pub fn ability_modifier(score: u8) -> i8 {
    (score as i16 - 10).div_euclid(2) as i8
}

// ============================================================================
// Abilities
// ============================================================================

/// The six abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    #[serde(rename = "STR")]
    Strength,
    #[serde(rename = "DEX")]
    Dexterity,
    #[serde(rename = "CON")]
    Constitution,
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "WIS")]
    Wisdom,
    #[serde(rename = "CHA")]
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    /// Parse a three-letter code such as `"WIS"`.
    pub fn from_abbreviation(code: &str) -> Option<Ability> {
        Ability::all()
            .into_iter()
            .find(|a| a.abbreviation() == code)
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// A full set of six ability scores.
///
/// Scores are unbounded above once racial bonuses have been applied; the
/// 8..=15 range only binds the pre-racial purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(rename = "STR")]
    pub strength: u8,
    #[serde(rename = "DEX")]
    pub dexterity: u8,
    #[serde(rename = "CON")]
    pub constitution: u8,
    #[serde(rename = "INT")]
    pub intelligence: u8,
    #[serde(rename = "WIS")]
    pub wisdom: u8,
    #[serde(rename = "CHA")]
    pub charisma: u8,
}

impl AbilityScores {
    pub fn new(str: u8, dex: u8, con: u8, int: u8, wis: u8, cha: u8) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, value: u8) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i8 {
        ability_modifier(self.get(ability))
    }

    /// Highest score in the set.
    pub fn max_score(&self) -> u8 {
        Ability::all()
            .into_iter()
            .map(|a| self.get(a))
            .max()
            .unwrap_or(0)
    }

    /// Point buy total, counting only scores that have a cost.
    pub fn point_buy_total(&self) -> u32 {
        Ability::all()
            .into_iter()
            .filter_map(|a| point_buy_cost(self.get(a)))
            .sum()
    }

    /// Check these scores as a pre-racial point-buy purchase.
    pub fn validate(&self) -> AttributeValidation {
        validate_attributes(self)
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// Outcome of a point-buy check. Every violation is listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValidation {
    pub valid: bool,
    pub total_cost: u32,
    /// Negative when the purchase is over budget.
    pub remaining_points: i32,
    pub errors: Vec<String>,
}

/// Validate pre-racial scores against the 8..=15 range and the 27 point budget.
pub fn validate_attributes(scores: &AbilityScores) -> AttributeValidation {
    let mut errors = Vec::new();
    let mut total_cost = 0;

    for ability in Ability::all() {
        let value = scores.get(ability);
        match point_buy_cost(value) {
            Some(cost) => total_cost += cost,
            None => errors.push(format!(
                "{} must be between {} and {} (got {})",
                ability, MIN_POINT_BUY_SCORE, MAX_POINT_BUY_SCORE, value
            )),
        }
    }

    if total_cost > POINT_BUY_BUDGET {
        errors.push(format!(
            "Point buy total {} exceeds the budget of {}",
            total_cost, POINT_BUY_BUDGET
        ));
    }

    AttributeValidation {
        valid: errors.is_empty(),
        total_cost,
        remaining_points: POINT_BUY_BUDGET as i32 - total_cost as i32,
        errors,
    }
}

// ============================================================================
// Skills
// ============================================================================

/// The eighteen skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Ability::Charisma
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "Acrobatics",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Arcana => "Arcana",
            Skill::Athletics => "Athletics",
            Skill::Deception => "Deception",
            Skill::History => "History",
            Skill::Insight => "Insight",
            Skill::Intimidation => "Intimidation",
            Skill::Investigation => "Investigation",
            Skill::Medicine => "Medicine",
            Skill::Nature => "Nature",
            Skill::Perception => "Perception",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
            Skill::Religion => "Religion",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Survival => "Survival",
        }
    }

    /// Exact-name lookup, e.g. `"Sleight of Hand"`.
    pub fn from_name(name: &str) -> Option<Skill> {
        Skill::all().iter().copied().find(|s| s.name() == name)
    }

    /// All skills in alphabetical order.
    pub fn all() -> &'static [Skill] {
        &[
            Skill::Acrobatics,
            Skill::AnimalHandling,
            Skill::Arcana,
            Skill::Athletics,
            Skill::Deception,
            Skill::History,
            Skill::Insight,
            Skill::Intimidation,
            Skill::Investigation,
            Skill::Medicine,
            Skill::Nature,
            Skill::Perception,
            Skill::Performance,
            Skill::Persuasion,
            Skill::Religion,
            Skill::SleightOfHand,
            Skill::Stealth,
            Skill::Survival,
        ]
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
