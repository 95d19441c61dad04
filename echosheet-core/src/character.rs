//! The character aggregate and its derived statistics.
//!
//! Every derived stat is a pure function of the current snapshot. Stats
//! that depend on class, race, or level tables take the [`RuleTables`]
//! explicitly.

use crate::abilities::{ability_modifier, Ability, AbilityScores, Skill};
use crate::rules::{RuleTables, COIN_WEIGHT, MAX_LEVEL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Unique identifier for a stored character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Currency
// ============================================================================

/// Coin denominations, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    Pp,
    Gp,
    Ep,
    Sp,
    Cp,
}

impl Denomination {
    /// Value in copper pieces.
    pub fn rate(&self) -> u64 {
        match self {
            Denomination::Pp => 1000,
            Denomination::Gp => 100,
            Denomination::Ep => 50,
            Denomination::Sp => 10,
            Denomination::Cp => 1,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Denomination::Pp => "pp",
            Denomination::Gp => "gp",
            Denomination::Ep => "ep",
            Denomination::Sp => "sp",
            Denomination::Cp => "cp",
        }
    }

    pub fn all() -> [Denomination; 5] {
        [
            Denomination::Pp,
            Denomination::Gp,
            Denomination::Ep,
            Denomination::Sp,
            Denomination::Cp,
        ]
    }
}

/// Coin counts per denomination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    pub cp: u64,
    pub sp: u64,
    pub ep: u64,
    pub gp: u64,
    pub pp: u64,
}

impl Currency {
    pub fn new(cp: u64, sp: u64, ep: u64, gp: u64, pp: u64) -> Self {
        Self { cp, sp, ep, gp, pp }
    }

    pub fn get(&self, denomination: Denomination) -> u64 {
        match denomination {
            Denomination::Pp => self.pp,
            Denomination::Gp => self.gp,
            Denomination::Ep => self.ep,
            Denomination::Sp => self.sp,
            Denomination::Cp => self.cp,
        }
    }

    /// Add another purse, saturating at `u64::MAX` per denomination.
    pub fn add(&mut self, other: &Currency) {
        self.cp = self.cp.saturating_add(other.cp);
        self.sp = self.sp.saturating_add(other.sp);
        self.ep = self.ep.saturating_add(other.ep);
        self.gp = self.gp.saturating_add(other.gp);
        self.pp = self.pp.saturating_add(other.pp);
    }

    /// Total value in copper pieces, saturating.
    pub fn total_copper(&self) -> u64 {
        Denomination::all()
            .iter()
            .map(|d| self.get(*d).saturating_mul(d.rate()))
            .fold(0, u64::saturating_add)
    }

    /// Number of physical coins.
    pub fn coin_count(&self) -> u64 {
        Denomination::all()
            .iter()
            .map(|d| self.get(*d))
            .fold(0, u64::saturating_add)
    }

    pub fn is_empty(&self) -> bool {
        self.coin_count() == 0
    }

    /// Greedy breakdown of `copper` into pp, gp, ep, sp, cp.
    pub fn from_copper(mut copper: u64) -> Self {
        let mut out = Currency::default();
        for denomination in Denomination::all() {
            let count = copper / denomination.rate();
            copper %= denomination.rate();
            match denomination {
                Denomination::Pp => out.pp = count,
                Denomination::Gp => out.gp = count,
                Denomination::Ep => out.ep = count,
                Denomination::Sp => out.sp = count,
                Denomination::Cp => out.cp = count,
            }
        }
        out
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Denomination::all()
            .iter()
            .filter(|d| self.get(**d) > 0)
            .map(|d| format!("{} {}", self.get(*d), d.code()))
            .collect();
        if parts.is_empty() {
            write!(f, "0 cp")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

// ============================================================================
// Character
// ============================================================================

/// One line of in-character chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub timestamp: String,
    pub user: String,
    pub character: String,
}

/// Rejected level-up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelUpError {
    #[error("Already at the maximum level of {max} ({current} XP)")]
    MaxLevel { max: u8, current: u32 },

    #[error("Not enough experience for level {next_level}: have {current} XP, need {needed} XP")]
    InsufficientExperience {
        current: u32,
        needed: u32,
        next_level: u8,
    },
}

/// A character sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    /// Assigned when first persisted.
    pub id: Option<CharacterId>,
    pub name: String,
    pub race: String,
    pub char_class: String,
    pub background: String,
    pub level: u8,
    pub alignment: String,
    pub experience_points: u32,

    /// Scores including any racial bonus. `None` until generated or supplied.
    pub attributes: Option<AbilityScores>,
    pub skills: Vec<String>,
    pub feats: Vec<String>,
    pub cantrips: Vec<String>,
    pub spells_known: Vec<String>,

    pub personality_traits: String,
    pub ideals: String,
    pub bonds: String,
    pub flaws: String,
    pub background_story: String,
    pub short_term_goals: String,
    pub long_term_goals: String,
    pub personal_goals: String,
    pub personality_tags: Vec<String>,

    pub age: String,
    pub height: String,
    pub weight: String,
    pub eyes: String,
    pub skin: String,
    pub hair: String,

    pub hit_point_maximum: u32,
    pub current_hit_points: u32,
    pub temporary_hit_points: u32,
    pub hit_dice: String,

    pub currency: Currency,
    pub items: Vec<String>,
    /// Exact item name to weight in pounds.
    pub item_weights: BTreeMap<String, f64>,

    pub history_log: Vec<String>,
    pub chat_history: Vec<ChatEntry>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            race: String::new(),
            char_class: String::new(),
            background: String::new(),
            level: 1,
            alignment: String::new(),
            experience_points: 0,
            attributes: None,
            skills: Vec::new(),
            feats: Vec::new(),
            cantrips: Vec::new(),
            spells_known: Vec::new(),
            personality_traits: String::new(),
            ideals: String::new(),
            bonds: String::new(),
            flaws: String::new(),
            background_story: String::new(),
            short_term_goals: String::new(),
            long_term_goals: String::new(),
            personal_goals: String::new(),
            personality_tags: Vec::new(),
            age: String::new(),
            height: String::new(),
            weight: String::new(),
            eyes: String::new(),
            skin: String::new(),
            hair: String::new(),
            hit_point_maximum: 0,
            current_hit_points: 0,
            temporary_hit_points: 0,
            hit_dice: String::new(),
            currency: Currency::default(),
            items: Vec::new(),
            item_weights: BTreeMap::new(),
            history_log: Vec::new(),
            chat_history: Vec::new(),
        }
    }
}

impl Character {
    /// A level 1 character with only the required fields set.
    pub fn new(
        name: impl Into<String>,
        race: impl Into<String>,
        char_class: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            race: race.into(),
            char_class: char_class.into(),
            background: background.into(),
            ..Self::default()
        }
    }

    /// Assign an id if the character has none; returns the id.
    pub fn ensure_id(&mut self) -> CharacterId {
        *self.id.get_or_insert_with(CharacterId::new)
    }

    /// Cantrips followed by known spells, for display.
    pub fn spells(&self) -> Vec<String> {
        self.cantrips
            .iter()
            .chain(self.spells_known.iter())
            .cloned()
            .collect()
    }

    fn effective_level(&self) -> u8 {
        self.level.clamp(1, MAX_LEVEL)
    }

    fn score(&self, ability: Ability) -> u8 {
        self.attributes.unwrap_or_default().get(ability)
    }

    // ------------------------------------------------------------------------
    // Modifiers and proficiency
    // ------------------------------------------------------------------------

    /// Ability modifier; unset attributes read as 10.
    pub fn modifier(&self, ability: Ability) -> i8 {
        ability_modifier(self.score(ability))
    }

    pub fn proficiency_bonus(&self) -> i8 {
        ((self.effective_level() - 1) / 4 + 2) as i8
    }

    /// Check bonus for a skill by name.
    ///
    /// A skill name that is not recognized maps to Strength; such a name
    /// scores 0 unless it appears in `skills`.
    pub fn skill_bonus(&self, skill: &str) -> i32 {
        let proficient = self.skills.iter().any(|s| s == skill);
        let known = Skill::from_name(skill);
        if known.is_none() && !proficient {
            return 0;
        }
        let ability = known.map_or(Ability::Strength, |s| s.ability());
        let mut bonus = self.modifier(ability) as i32;
        if proficient {
            bonus += self.proficiency_bonus() as i32;
        }
        bonus
    }

    pub fn saving_throw_bonus(&self, rules: &RuleTables, ability: Ability) -> i32 {
        let mut bonus = self.modifier(ability) as i32;
        if rules.saving_throws(&self.char_class).contains(&ability) {
            bonus += self.proficiency_bonus() as i32;
        }
        bonus
    }

    // ------------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------------

    /// Unarmored defense for Monks and Barbarians, light armor otherwise.
    pub fn armor_class(&self) -> i32 {
        let dex = self.modifier(Ability::Dexterity) as i32;
        match self.char_class.as_str() {
            "Monk" => 10 + dex + self.modifier(Ability::Wisdom) as i32,
            "Barbarian" => 10 + dex + self.modifier(Ability::Constitution) as i32,
            _ => 11 + dex.min(2),
        }
    }

    /// Hit die plus CON at 1st level, then the fixed average per level. At least 1.
    pub fn hit_points(&self, rules: &RuleTables) -> u32 {
        let hit_die = rules.hit_die(&self.char_class) as i32;
        let con = self.modifier(Ability::Constitution) as i32;
        let extra_levels = self.effective_level() as i32 - 1;
        let total = hit_die + con + (hit_die / 2 + 1 + con) * extra_levels;
        total.max(1) as u32
    }

    /// Hit dice notation for the current level, e.g. `"3d8"`.
    pub fn hit_dice_notation(&self, rules: &RuleTables) -> String {
        format!(
            "{}d{}",
            self.effective_level(),
            rules.hit_die(&self.char_class)
        )
    }

    pub fn speed(&self, rules: &RuleTables) -> u32 {
        rules.speed(&self.race)
    }

    pub fn combat_role<'r>(&self, rules: &'r RuleTables) -> &'r str {
        rules.combat_role(&self.char_class)
    }

    // ------------------------------------------------------------------------
    // Spellcasting
    // ------------------------------------------------------------------------

    pub fn spellcasting_ability(&self, rules: &RuleTables) -> Option<Ability> {
        rules.spellcasting_ability(&self.char_class)
    }

    /// 8 + casting modifier + proficiency; `None` for non-casters.
    pub fn spell_save_dc(&self, rules: &RuleTables) -> Option<i32> {
        self.spell_attack_bonus(rules).map(|bonus| 8 + bonus)
    }

    /// Casting modifier + proficiency; `None` for non-casters.
    pub fn spell_attack_bonus(&self, rules: &RuleTables) -> Option<i32> {
        self.spellcasting_ability(rules)
            .map(|a| self.modifier(a) as i32 + self.proficiency_bonus() as i32)
    }

    /// Slots of `slot_level` on the full-caster table; 0 for non-casters.
    pub fn spell_slots(&self, rules: &RuleTables, slot_level: u8) -> u8 {
        if self.spellcasting_ability(rules).is_none() {
            return 0;
        }
        rules.full_caster_slots(self.effective_level(), slot_level)
    }

    // ------------------------------------------------------------------------
    // Experience
    // ------------------------------------------------------------------------

    /// XP still needed for the next level; 0 at the level cap.
    pub fn experience_to_next_level(&self, rules: &RuleTables) -> u32 {
        if self.level >= MAX_LEVEL {
            return 0;
        }
        rules
            .xp_threshold(self.effective_level() + 1)
            .map_or(0, |next| next.saturating_sub(self.experience_points))
    }

    pub fn can_level_up(&self, rules: &RuleTables) -> bool {
        if self.level >= MAX_LEVEL {
            return false;
        }
        rules
            .xp_threshold(self.effective_level() + 1)
            .is_some_and(|next| self.experience_points >= next)
    }

    /// Percent of the way from the current level's threshold to the next.
    pub fn experience_progress(&self, rules: &RuleTables) -> f64 {
        if self.level >= MAX_LEVEL {
            return 100.0;
        }
        let level = self.effective_level();
        let (Some(current), Some(next)) =
            (rules.xp_threshold(level), rules.xp_threshold(level + 1))
        else {
            return 100.0;
        };
        let earned = self.experience_points.saturating_sub(current) as f64;
        let span = (next - current) as f64;
        (earned / span * 100.0).clamp(0.0, 100.0)
    }

    /// Advance exactly one level. XP is kept.
    pub fn level_up(&mut self, rules: &RuleTables) -> Result<u8, LevelUpError> {
        if self.level >= MAX_LEVEL {
            return Err(LevelUpError::MaxLevel {
                max: MAX_LEVEL,
                current: self.experience_points,
            });
        }
        let next_level = self.effective_level() + 1;
        let needed = rules.xp_threshold(next_level).unwrap_or(u32::MAX);
        if self.experience_points < needed {
            return Err(LevelUpError::InsufficientExperience {
                current: self.experience_points,
                needed,
                next_level,
            });
        }

        self.level = next_level;
        self.add_to_history(format!("Reached level {}", next_level));
        debug!(character = %self.name, level = next_level, "Level up");
        Ok(next_level)
    }

    // ------------------------------------------------------------------------
    // Inventory
    // ------------------------------------------------------------------------

    pub fn carrying_capacity(&self) -> u32 {
        self.score(Ability::Strength) as u32 * 15
    }

    pub fn push_drag_lift(&self) -> u32 {
        self.score(Ability::Strength) as u32 * 30
    }

    /// Currency value in copper pieces.
    pub fn total_currency_value(&self) -> u64 {
        self.currency.total_copper()
    }

    /// Total value re-expressed in the largest coins, e.g. `"1 pp, 2 gp, 5 cp"`.
    pub fn format_currency(&self) -> String {
        Currency::from_copper(self.total_currency_value()).to_string()
    }

    /// Weight of one item: exact override, then the default table, then 1 lb.
    pub fn item_weight(&self, rules: &RuleTables, item: &str) -> f64 {
        self.item_weights
            .get(item)
            .copied()
            .unwrap_or_else(|| rules.default_item_weight(item))
    }

    /// Items plus coins, in pounds.
    pub fn estimated_weight(&self, rules: &RuleTables) -> f64 {
        let items: f64 = self
            .items
            .iter()
            .map(|item| self.item_weight(rules, item))
            .sum();
        items + self.currency.coin_count() as f64 * COIN_WEIGHT
    }

    // ------------------------------------------------------------------------
    // Logs
    // ------------------------------------------------------------------------

    /// Append a `[YYYY-MM-DD HH:MM]`-stamped entry to the history log.
    pub fn add_to_history(&mut self, entry: impl AsRef<str>) {
        let stamp = chrono::Local::now().format("[%Y-%m-%d %H:%M]");
        self.history_log.push(format!("{} {}", stamp, entry.as_ref()));
    }

    /// Append an exchange to the chat history.
    pub fn record_chat(&mut self, user: impl Into<String>, reply: impl Into<String>) {
        self.chat_history.push(ChatEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            user: user.into(),
            character: reply.into(),
        });
    }
}
