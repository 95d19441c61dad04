//! Spell catalog: cantrips and leveled spells per class, plus the
//! spellcasting rules that set each class's quotas.
//!
//! The catalog is a single JSON document:
//!
//! ```json
//! {
//!   "cantrips": { "Wizard": [SpellInfo, ...] },
//!   "spells": { "1st": { "Wizard": [SpellInfo, ...] } },
//!   "spellcasting_rules": { "Wizard": { "cantrips_known": 3, ... } }
//! }
//! ```
//!
//! Class keys are matched case-insensitively. Loading never fails hard:
//! a missing or malformed file yields an empty catalog and a warning.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Default spell level key used by class spell lists.
pub const FIRST_LEVEL: &str = "1st";

/// Catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../data/spells.json");

/// Substrings marking a cantrip as a damage dealer.
const DAMAGE_CANTRIP_KEYWORDS: &[&str] = &["fire", "ray", "bolt", "blast"];

/// Substrings marking a leveled spell as a damage dealer.
const DAMAGE_SPELL_KEYWORDS: &[&str] = &["fire", "magic missile", "burning"];

/// Substring marking a leveled spell as healing.
const HEALING_SPELL_KEYWORD: &str = "cure";

/// Errors from reading a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Explicit spell classification, overriding the name heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellTag {
    Damage,
    Healing,
    Utility,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellInfo {
    pub name: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub casting_time: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<SpellTag>,
}

impl SpellInfo {
    /// Whether this entry carries explicit tags.
    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Damage cantrip: tagged `damage`, else a name containing fire/ray/bolt/blast.
    pub fn is_damage_cantrip(&self) -> bool {
        self.classify(SpellTag::Damage, DAMAGE_CANTRIP_KEYWORDS)
    }

    /// Damage spell: tagged `damage`, else a name containing fire/magic missile/burning.
    pub fn is_damage_spell(&self) -> bool {
        self.classify(SpellTag::Damage, DAMAGE_SPELL_KEYWORDS)
    }

    /// Healing spell: tagged `healing`, else a name containing "cure".
    pub fn is_healing_spell(&self) -> bool {
        self.classify(SpellTag::Healing, &[HEALING_SPELL_KEYWORD])
    }

    fn classify(&self, tag: SpellTag, keywords: &[&str]) -> bool {
        if self.is_tagged() {
            return self.tags.contains(&tag);
        }
        let name = self.name.to_lowercase();
        keywords.iter().any(|k| name.contains(k))
    }

    /// One-line summary for display.
    pub fn describe(&self) -> String {
        format!(
            "{} ({}) - {}, Range: {}, Components: {}, Duration: {}",
            self.name,
            self.school,
            self.casting_time,
            self.range,
            self.components.join(", "),
            self.duration
        )
    }
}

/// Per-class quotas and slot counts at 1st level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellcastingRules {
    #[serde(default)]
    pub cantrips_known: usize,
    #[serde(default)]
    pub spells_known: usize,
    /// Three-letter ability code, e.g. `"INT"`.
    #[serde(default)]
    pub spellcasting_ability: String,
    /// Slot level key ("1st") to slot count.
    #[serde(default)]
    pub spell_slots: BTreeMap<String, u32>,
}

/// The loaded catalog. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpellCatalog {
    #[serde(default)]
    pub cantrips: BTreeMap<String, Vec<SpellInfo>>,
    /// Spell level key to class to spells.
    #[serde(default)]
    pub spells: BTreeMap<String, BTreeMap<String, Vec<SpellInfo>>>,
    #[serde(default)]
    pub spellcasting_rules: BTreeMap<String, SpellcastingRules>,
}

impl SpellCatalog {
    /// An empty catalog; every class reads as a non-caster.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a catalog document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a catalog file, reporting failures.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Read a catalog file, falling back to an empty catalog on any failure.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(catalog) => {
                debug!(path = %path.display(), "Loaded spell catalog");
                catalog
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Spell catalog unavailable, using empty catalog");
                Self::empty()
            }
        }
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Self {
        match Self::from_json_str(BUILTIN_CATALOG) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Bundled spell catalog failed to parse, using empty catalog");
                Self::empty()
            }
        }
    }

    /// Cantrips for a class. Empty if the class is unknown.
    pub fn cantrips_for(&self, class: &str) -> &[SpellInfo] {
        lookup_class(&self.cantrips, class)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Spells of `level` ("1st", "2nd", ...) for a class.
    pub fn spells_for(&self, class: &str, level: &str) -> &[SpellInfo] {
        self.spells
            .get(level)
            .and_then(|by_class| lookup_class(by_class, class))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn rules_for(&self, class: &str) -> Option<&SpellcastingRules> {
        lookup_class(&self.spellcasting_rules, class)
    }

    /// First entry named `name` (case-insensitive), cantrips before leveled spells.
    pub fn find(&self, name: &str) -> Option<&SpellInfo> {
        self.cantrips
            .values()
            .chain(self.spells.values().flat_map(|by_class| by_class.values()))
            .flatten()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn is_empty(&self) -> bool {
        self.cantrips.is_empty() && self.spells.is_empty() && self.spellcasting_rules.is_empty()
    }
}

/// Class-key lookup: exact key first, then case-insensitive.
fn lookup_class<'a, V>(map: &'a BTreeMap<String, V>, class: &str) -> Option<&'a V> {
    map.get(class).or_else(|| {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(class))
            .map(|(_, v)| v)
    })
}
