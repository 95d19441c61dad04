//! Spell quotas, selection validation, and suggestions.
//!
//! `SpellManager` borrows a loaded [`SpellCatalog`] and answers every
//! question in terms of it. A class the catalog does not know is a
//! non-caster: zero quotas, empty lists, no suggestions.

use crate::abilities::Ability;
use crate::spells::{SpellCatalog, SpellInfo, SpellcastingRules, FIRST_LEVEL};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Result of checking a cantrip/spell selection. Lists every violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub cantrip_limit: usize,
    pub spell_limit: usize,
    pub selected_cantrips: usize,
    pub selected_spells: usize,
}

/// Suggested cantrip and spell names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSuggestions {
    pub cantrips: Vec<String>,
    pub spells: Vec<String>,
}

/// Which spells a class reaches for first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpellPriority {
    Damage,
    Healing,
    None,
}

impl SpellPriority {
    fn for_class(class: &str) -> Self {
        let is = |name: &str| class.eq_ignore_ascii_case(name);
        if is("Wizard") || is("Sorcerer") {
            SpellPriority::Damage
        } else if is("Cleric") || is("Druid") {
            SpellPriority::Healing
        } else {
            SpellPriority::None
        }
    }

    fn matches(self, spell: &SpellInfo) -> bool {
        match self {
            SpellPriority::Damage => spell.is_damage_spell(),
            SpellPriority::Healing => spell.is_healing_spell(),
            SpellPriority::None => false,
        }
    }
}

/// Quota enforcement and suggestions over a borrowed catalog.
#[derive(Debug, Clone, Copy)]
pub struct SpellManager<'a> {
    catalog: &'a SpellCatalog,
}

impl<'a> SpellManager<'a> {
    pub fn new(catalog: &'a SpellCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a SpellCatalog {
        self.catalog
    }

    pub fn available_cantrips(&self, class: &str) -> &'a [SpellInfo] {
        self.catalog.cantrips_for(class)
    }

    /// 1st-level spells for a class.
    pub fn available_spells(&self, class: &str) -> &'a [SpellInfo] {
        self.available_spells_at(class, FIRST_LEVEL)
    }

    pub fn available_spells_at(&self, class: &str, level: &str) -> &'a [SpellInfo] {
        self.catalog.spells_for(class, level)
    }

    pub fn spellcasting_rules(&self, class: &str) -> Option<&'a SpellcastingRules> {
        self.catalog.rules_for(class)
    }

    pub fn cantrip_limit(&self, class: &str) -> usize {
        self.spellcasting_rules(class).map_or(0, |r| r.cantrips_known)
    }

    pub fn spell_limit(&self, class: &str) -> usize {
        self.spellcasting_rules(class).map_or(0, |r| r.spells_known)
    }

    /// True iff either quota is nonzero.
    pub fn can_cast(&self, class: &str) -> bool {
        self.cantrip_limit(class) > 0 || self.spell_limit(class) > 0
    }

    /// The catalog's casting ability for a class, if it names a valid one.
    pub fn spellcasting_ability(&self, class: &str) -> Option<Ability> {
        self.spellcasting_rules(class)
            .and_then(|r| Ability::from_abbreviation(&r.spellcasting_ability))
    }

    pub fn spell_slots(&self, class: &str) -> BTreeMap<String, u32> {
        self.spellcasting_rules(class)
            .map(|r| r.spell_slots.clone())
            .unwrap_or_default()
    }

    /// Global lookup across every class and level.
    pub fn spell_info(&self, name: &str) -> Option<&'a SpellInfo> {
        self.catalog.find(name)
    }

    pub fn format_description(&self, spell: &SpellInfo) -> String {
        spell.describe()
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Check a selection against quotas, the class lists, and duplicates.
    ///
    /// The same name appearing as both a cantrip and a spell is not checked.
    pub fn validate_selection(
        &self,
        class: &str,
        cantrips: &[String],
        spells: &[String],
    ) -> SpellValidation {
        let cantrip_limit = self.cantrip_limit(class);
        let spell_limit = self.spell_limit(class);
        let mut errors = Vec::new();

        if cantrips.len() > cantrip_limit {
            errors.push(format!(
                "Too many cantrips selected: {}. Maximum is {}.",
                cantrips.len(),
                cantrip_limit
            ));
        }
        if spells.len() > spell_limit {
            errors.push(format!(
                "Too many spells selected: {}. Maximum is {}.",
                spells.len(),
                spell_limit
            ));
        }

        let known_cantrips = names(self.available_cantrips(class));
        for cantrip in cantrips {
            if !known_cantrips.contains(cantrip.as_str()) {
                errors.push(format!("Cantrip '{}' is not available for {}.", cantrip, class));
            }
        }

        let known_spells = names(self.available_spells(class));
        for spell in spells {
            if !known_spells.contains(spell.as_str()) {
                errors.push(format!("Spell '{}' is not available for {}.", spell, class));
            }
        }

        let duplicate_cantrips = duplicates(cantrips);
        if !duplicate_cantrips.is_empty() {
            errors.push(format!(
                "Duplicate cantrips selected: {}.",
                duplicate_cantrips.join(", ")
            ));
        }
        let duplicate_spells = duplicates(spells);
        if !duplicate_spells.is_empty() {
            errors.push(format!(
                "Duplicate spells selected: {}.",
                duplicate_spells.join(", ")
            ));
        }

        SpellValidation {
            valid: errors.is_empty(),
            errors,
            cantrip_limit,
            spell_limit,
            selected_cantrips: cantrips.len(),
            selected_spells: spells.len(),
        }
    }

    // ------------------------------------------------------------------------
    // Suggestions
    // ------------------------------------------------------------------------

    /// Suggest exactly the class quotas where the catalog allows.
    pub fn suggest(&self, class: &str) -> SpellSuggestions {
        self.suggest_counts(class, self.cantrip_limit(class), self.spell_limit(class))
    }

    /// Suggest `num_cantrips` cantrips and `num_spells` 1st-level spells.
    ///
    /// Damage cantrips fill first. For spells, Wizards and Sorcerers put damage
    /// spells in up to half the slots, Clerics and Druids healing spells; the
    /// rest come from the other spells, then from anything left in catalog
    /// order. A catalog too small for the request yields a shorter list.
    pub fn suggest_counts(
        &self,
        class: &str,
        num_cantrips: usize,
        num_spells: usize,
    ) -> SpellSuggestions {
        let cantrips = fill_to_count(
            self.available_cantrips(class),
            num_cantrips,
            num_cantrips,
            SpellInfo::is_damage_cantrip,
        );

        let priority = SpellPriority::for_class(class);
        let spells = fill_to_count(
            self.available_spells(class),
            num_spells,
            num_spells / 2,
            |s| priority.matches(s),
        );

        SpellSuggestions { cantrips, spells }
    }
}

fn names(spells: &[SpellInfo]) -> HashSet<&str> {
    spells.iter().map(|s| s.name.as_str()).collect()
}

/// Names that occur more than once, each reported once, in first-seen order.
fn duplicates(selected: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut out = Vec::new();
    for name in selected {
        if !seen.insert(name.as_str()) && reported.insert(name.as_str()) {
            out.push(name.clone());
        }
    }
    out
}

/// Pick up to `count` unique names: up to `priority_quota` matching
/// `preferred`, then non-matching, then anything remaining.
fn fill_to_count(
    pool: &[SpellInfo],
    count: usize,
    priority_quota: usize,
    preferred: impl Fn(&SpellInfo) -> bool,
) -> Vec<String> {
    let mut picked: Vec<String> = Vec::with_capacity(count);

    let quota = priority_quota.min(count);
    for spell in pool.iter().filter(|s| preferred(*s)) {
        if picked.len() >= quota {
            break;
        }
        push_unique(&mut picked, spell);
    }
    for spell in pool.iter().filter(|s| !preferred(*s)) {
        if picked.len() >= count {
            break;
        }
        push_unique(&mut picked, spell);
    }
    for spell in pool {
        if picked.len() >= count {
            break;
        }
        push_unique(&mut picked, spell);
    }

    picked
}

fn push_unique(picked: &mut Vec<String>, spell: &SpellInfo) {
    if !picked.iter().any(|n| n == &spell.name) {
        picked.push(spell.name.clone());
    }
}
