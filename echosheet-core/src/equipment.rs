//! Equipment packs and the merge that applies one to a character.
//!
//! A pack is plain data: collaborators may deserialize their own, and the
//! seven standard packs are available through [`EquipmentPack::standard`].

use crate::character::{Character, Currency};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// A named bundle of gear, weight overrides, and coins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentPack {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Item names in listing order.
    #[serde(default)]
    pub items: Vec<String>,
    /// Weight in pounds per item name.
    #[serde(default)]
    pub item_weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub currency: Currency,
}

impl EquipmentPack {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Add an item with its weight.
    pub fn with_item(mut self, item: impl Into<String>, weight: f64) -> Self {
        let item = item.into();
        self.item_weights.insert(item.clone(), weight);
        self.items.push(item);
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// One of the standard packs by exact name, e.g. `"Explorer's Pack"`.
    pub fn standard(name: &str) -> Option<Self> {
        PACKS.iter().find(|p| p.name == name).map(PackData::to_pack)
    }

    /// Sum of the weight overrides, rounded to one decimal place.
    pub fn total_weight(&self) -> f64 {
        let total: f64 = self.item_weights.values().sum();
        (total * 10.0).round() / 10.0
    }
}

/// What applying a pack changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackApplication {
    pub pack_name: String,
    /// Items that were not already carried.
    pub items_added: Vec<String>,
    pub currency_added: Currency,
    pub total_weight: f64,
}

/// All standard packs, in alphabetical order.
pub fn standard_packs() -> Vec<EquipmentPack> {
    PACKS.iter().map(PackData::to_pack).collect()
}

/// Find a standard pack by exact name.
pub fn find_pack(name: &str) -> Option<EquipmentPack> {
    EquipmentPack::standard(name)
}

/// Weight of a named standard pack; 0.0 if there is no such pack.
pub fn pack_weight(name: &str) -> f64 {
    find_pack(name).map_or(0.0, |p| p.total_weight())
}

impl Character {
    /// Merge a pack into the inventory.
    ///
    /// Items already carried (by exact name) are not added again, the pack's
    /// weights replace any existing overrides, and its coins are added.
    pub fn apply_equipment_pack(&mut self, pack: &EquipmentPack) -> PackApplication {
        let mut items_added = Vec::new();
        for item in &pack.items {
            if !self.items.contains(item) {
                self.items.push(item.clone());
                items_added.push(item.clone());
            }
        }
        for (item, weight) in &pack.item_weights {
            self.item_weights.insert(item.clone(), *weight);
        }
        self.currency.add(&pack.currency);

        debug!(
            character = %self.name,
            pack = %pack.name,
            added = items_added.len(),
            "Applied equipment pack"
        );

        PackApplication {
            pack_name: pack.name.clone(),
            items_added,
            currency_added: pack.currency,
            total_weight: pack.total_weight(),
        }
    }
}

/// Static form of a standard pack.
struct PackData {
    name: &'static str,
    description: &'static str,
    items: &'static [(&'static str, f64)],
    gold: u64,
}

impl PackData {
    fn to_pack(&self) -> EquipmentPack {
        let pack = EquipmentPack::new(self.name, self.description).with_currency(Currency {
            gp: self.gold,
            ..Currency::default()
        });
        self.items
            .iter()
            .fold(pack, |pack, (item, weight)| pack.with_item(*item, *weight))
    }
}

// ============================================================================
// Pack data
// ============================================================================

static PACKS: &[PackData] = &[
    PackData {
        name: "Burglar's Pack",
        description: "Perfect for rogues and stealthy characters",
        items: &[
            ("Backpack", 5.0),
            ("Bag of 1,000 ball bearings", 2.0),
            ("10 feet of string", 0.0),
            ("Bell", 0.0),
            ("5 candles", 0.0),
            ("Crowbar", 5.0),
            ("Hammer", 3.0),
            ("10 pitons", 2.5),
            ("Hooded lantern", 2.0),
            ("2 flasks of oil", 2.0),
            ("5 days of rations", 10.0),
            ("Tinderbox", 1.0),
            ("Waterskin", 5.0),
            ("50 feet of hempen rope", 10.0),
        ],
        gold: 16,
    },
    PackData {
        name: "Diplomat's Pack",
        description: "Ideal for characters focused on social interaction",
        items: &[
            ("Chest", 25.0),
            ("2 cases for maps and scrolls", 1.0),
            ("Fine clothes", 6.0),
            ("Bottle of ink", 0.0),
            ("Ink pen", 0.0),
            ("Lamp", 1.0),
            ("2 flasks of oil", 2.0),
            ("5 sheets of paper", 0.0),
            ("Vial of perfume", 0.0),
            ("Sealing wax", 0.0),
            ("Soap", 0.0),
        ],
        gold: 39,
    },
    PackData {
        name: "Dungeoneer's Pack",
        description: "Essential for exploring dungeons and caves",
        items: &[
            ("Backpack", 5.0),
            ("Crowbar", 5.0),
            ("Hammer", 3.0),
            ("10 pitons", 2.5),
            ("10 torches", 10.0),
            ("Tinderbox", 1.0),
            ("10 days of rations", 20.0),
            ("Waterskin", 5.0),
            ("50 feet of hempen rope", 10.0),
        ],
        gold: 12,
    },
    PackData {
        name: "Entertainer's Pack",
        description: "Perfect for bards and performers",
        items: &[
            ("Backpack", 5.0),
            ("Bedroll", 7.0),
            ("2 costumes", 8.0),
            ("5 candles", 0.0),
            ("5 days of rations", 10.0),
            ("Waterskin", 5.0),
            ("Disguise kit", 3.0),
        ],
        gold: 40,
    },
    PackData {
        name: "Explorer's Pack",
        description: "Great for wilderness exploration and survival",
        items: &[
            ("Backpack", 5.0),
            ("Bedroll", 7.0),
            ("Mess kit", 1.0),
            ("Tinderbox", 1.0),
            ("10 torches", 10.0),
            ("10 days of rations", 20.0),
            ("Waterskin", 5.0),
            ("50 feet of hempen rope", 10.0),
        ],
        gold: 10,
    },
    PackData {
        name: "Priest's Pack",
        description: "Ideal for clerics and religious characters",
        items: &[
            ("Backpack", 5.0),
            ("Blanket", 3.0),
            ("10 candles", 0.0),
            ("Tinderbox", 1.0),
            ("Alms box", 1.0),
            ("2 blocks of incense", 0.0),
            ("Censer", 1.0),
            ("Vestments", 4.0),
            ("2 days of rations", 4.0),
            ("Waterskin", 5.0),
        ],
        gold: 19,
    },
    PackData {
        name: "Scholar's Pack",
        description: "Perfect for wizards and knowledge seekers",
        items: &[
            ("Backpack", 5.0),
            ("Book of lore", 5.0),
            ("Bottle of ink", 0.0),
            ("Ink pen", 0.0),
            ("10 sheets of parchment", 0.0),
            ("Little bag of sand", 1.0),
            ("Small knife", 1.0),
        ],
        gold: 40,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seven_packs() {
        assert_eq!(standard_packs().len(), 7);
        assert!(find_pack("Explorer's Pack").is_some());
        assert!(find_pack("explorer's pack").is_none());
        assert!(find_pack("Adventurer's Pack").is_none());
    }

    #[test]
    fn test_pack_weights() {
        assert_eq!(pack_weight("Explorer's Pack"), 59.0);
        assert_eq!(pack_weight("Burglar's Pack"), 47.5);
        assert_eq!(pack_weight("Scholar's Pack"), 12.0);
        assert_eq!(pack_weight("Nope"), 0.0);
    }

    #[test]
    fn test_apply_to_empty_inventory() {
        let mut c = Character::new("Vex", "Halfling", "Rogue", "Criminal");
        let pack = find_pack("Burglar's Pack").unwrap();
        let applied = c.apply_equipment_pack(&pack);
        assert_eq!(applied.items_added.len(), 14);
        assert_eq!(c.items.len(), 14);
        assert_eq!(c.items[0], "Backpack");
        assert_eq!(c.currency.gp, 16);
        assert_eq!(c.item_weights["10 pitons"], 2.5);
        assert_eq!(applied.total_weight, 47.5);
    }

    #[test]
    fn test_overlapping_items_are_not_duplicated() {
        let mut c = Character::new("Vex", "Halfling", "Rogue", "Criminal");
        c.items = vec!["Backpack".to_string(), "Waterskin".to_string()];
        c.item_weights.insert("Backpack".to_string(), 2.0);
        c.currency.gp = 5;

        let applied = c.apply_equipment_pack(&find_pack("Explorer's Pack").unwrap());
        assert_eq!(c.items.len(), 8);
        assert_eq!(c.items.iter().filter(|i| *i == "Backpack").count(), 1);
        assert_eq!(applied.items_added.len(), 6);
        assert!(!applied.items_added.contains(&"Waterskin".to_string()));
        // Pack weights take precedence
        assert_eq!(c.item_weights["Backpack"], 5.0);
        assert_eq!(c.currency.gp, 15);
    }

    #[test]
    fn test_applying_twice_only_adds_currency() {
        let mut c = Character::new("Ilsa", "Human", "Cleric", "Acolyte");
        let pack = find_pack("Priest's Pack").unwrap();
        c.apply_equipment_pack(&pack);
        let second = c.apply_equipment_pack(&pack);
        assert!(second.items_added.is_empty());
        assert_eq!(c.items.len(), 10);
        assert_eq!(c.currency.gp, 38);
    }

    #[test]
    fn test_apply_deserialized_pack_with_mixed_coins() {
        let json = r#"{
            "name": "Smuggler's Kit",
            "items": ["Crowbar", "Dark cloak", "Sack"],
            "item_weights": {"Crowbar": 5.0, "Dark cloak": 4.0, "Sack": 0.5},
            "currency": {"cp": 30, "sp": 12, "ep": 1, "pp": 2}
        }"#;
        let pack: EquipmentPack = serde_json::from_str(json).unwrap();
        assert_eq!(pack.description, "");
        assert_eq!(pack.total_weight(), 9.5);

        let mut c = Character::new("Vex", "Halfling", "Rogue", "Criminal");
        c.items = vec!["Crowbar".to_string()];
        c.currency = Currency::new(5, 0, 0, 3, 0);

        let applied = c.apply_equipment_pack(&pack);
        assert_eq!(applied.items_added, vec!["Dark cloak", "Sack"]);
        assert_eq!(applied.currency_added, Currency::new(30, 12, 1, 0, 2));
        assert_eq!(c.currency, Currency::new(35, 12, 1, 3, 2));
        assert_eq!(c.item_weights["Sack"], 0.5);
        assert_eq!(c.items, vec!["Crowbar", "Dark cloak", "Sack"]);
    }

    #[test]
    fn test_built_pack_matches_standard_shape() {
        let pack = EquipmentPack::new("Trail Kit", "Light travel gear")
            .with_item("Bedroll", 7.0)
            .with_item("Waterskin", 5.0)
            .with_currency(Currency::new(0, 5, 0, 2, 0));
        assert_eq!(pack.items, vec!["Bedroll", "Waterskin"]);
        assert_eq!(pack.total_weight(), 12.0);

        let round_trip: EquipmentPack =
            serde_json::from_str(&serde_json::to_string(&pack).unwrap()).unwrap();
        assert_eq!(round_trip, pack);
    }
}
