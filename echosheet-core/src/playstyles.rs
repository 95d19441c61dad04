//! Named playstyle presets per class.
//!
//! Each preset carries a pre-racial attribute array in STR, DEX, CON, INT,
//! WIS, CHA order. Some arrays spend fewer than 27 points; the allocator
//! replaces those with the class's standard array.

use crate::abilities::{AbilityScores, Skill};

use Skill::*;

/// One pre-authored build archetype for a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaystylePreset {
    pub name: &'static str,
    pub description: &'static str,
    /// STR, DEX, CON, INT, WIS, CHA.
    pub attributes: [u8; 6],
    pub skills: &'static [Skill],
    pub cantrips: &'static [&'static str],
    pub spells: &'static [&'static str],
}

impl PlaystylePreset {
    pub fn scores(&self) -> AbilityScores {
        let [str, dex, con, int, wis, cha] = self.attributes;
        AbilityScores::new(str, dex, con, int, wis, cha)
    }
}

/// Presets for a class in authoring order; empty for unknown classes.
pub fn presets_for(class: &str) -> &'static [PlaystylePreset] {
    match class {
        "Barbarian" => BARBARIAN,
        "Bard" => BARD,
        "Cleric" => CLERIC,
        "Druid" => DRUID,
        "Fighter" => FIGHTER,
        "Monk" => MONK,
        "Paladin" => PALADIN,
        "Ranger" => RANGER,
        "Rogue" => ROGUE,
        "Sorcerer" => SORCERER,
        "Warlock" => WARLOCK,
        "Wizard" => WIZARD,
        _ => &[],
    }
}

/// Look up a single preset by exact name.
pub fn find_preset(class: &str, name: &str) -> Option<&'static PlaystylePreset> {
    presets_for(class).iter().find(|p| p.name == name)
}

const BARBARIAN: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Balanced barbarian with strength and wilderness skills",
        attributes: [15, 14, 14, 8, 10, 10],
        skills: &[Athletics, Survival],
        cantrips: &[],
        spells: &[],
    },
    PlaystylePreset {
        name: "berserker",
        description: "Frenzied berserker focused on raw power and intimidation",
        attributes: [15, 14, 14, 8, 8, 12],
        skills: &[Athletics, Intimidation],
        cantrips: &[],
        spells: &[],
    },
    PlaystylePreset {
        name: "tank",
        description: "Defensive barbarian with high constitution and awareness",
        attributes: [15, 13, 14, 8, 10, 12],
        skills: &[Athletics, Perception],
        cantrips: &[],
        spells: &[],
    },
];

const BARD: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Versatile bard with healing, charm, and utility spells",
        attributes: [8, 12, 13, 12, 11, 15],
        skills: &[Performance, Persuasion],
        cantrips: &["Vicious Mockery", "Prestidigitation"],
        spells: &["Cure Wounds", "Charm Person", "Disguise Self"],
    },
    PlaystylePreset {
        name: "lore",
        description: "Knowledge-focused bard with utility and information gathering",
        attributes: [8, 12, 12, 13, 11, 15],
        skills: &[History, Arcana],
        cantrips: &["Vicious Mockery", "Message"],
        spells: &["Comprehend Languages", "Detect Magic", "Cure Wounds"],
    },
    PlaystylePreset {
        name: "valor",
        description: "Combat-oriented bard with martial and inspiring abilities",
        attributes: [12, 12, 13, 10, 9, 15],
        skills: &[Athletics, Performance],
        cantrips: &["Vicious Mockery", "Blade Ward"],
        spells: &["Cure Wounds", "Heroism", "Thunderwave"],
    },
];

const CLERIC: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Balanced cleric with healing and support spells",
        attributes: [12, 10, 14, 12, 15, 9],
        skills: &[Insight, Religion],
        cantrips: &["Sacred Flame", "Spare the Dying"],
        spells: &["Cure Wounds", "Bless", "Shield of Faith"],
    },
    PlaystylePreset {
        name: "healer",
        description: "Dedicated healer focused on restoration magic",
        attributes: [12, 10, 14, 12, 15, 9],
        skills: &[Medicine, Religion],
        cantrips: &["Sacred Flame", "Spare the Dying"],
        spells: &["Cure Wounds", "Healing Word", "Prayer of Healing"],
    },
    PlaystylePreset {
        name: "warrior",
        description: "Warrior cleric combining martial prowess with divine magic",
        attributes: [14, 10, 14, 8, 15, 10],
        skills: &[Athletics, Religion],
        cantrips: &["Sacred Flame", "Thaumaturgy"],
        spells: &["Divine Favor", "Shield of Faith", "Cure Wounds"],
    },
];

const DRUID: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Balanced druid with healing and nature magic",
        attributes: [12, 12, 14, 10, 15, 9],
        skills: &[Nature, Survival],
        cantrips: &["Druidcraft", "Produce Flame"],
        spells: &["Cure Wounds", "Entangle", "Goodberry"],
    },
    PlaystylePreset {
        name: "caster",
        description: "Spellcasting-focused druid with utility magic",
        attributes: [8, 12, 14, 12, 15, 11],
        skills: &[Arcana, Nature],
        cantrips: &["Druidcraft", "Guidance"],
        spells: &["Cure Wounds", "Detect Magic", "Comprehend Languages"],
    },
    PlaystylePreset {
        name: "shapeshifter",
        description: "Shapeshifting-focused druid with physical enhancement",
        attributes: [12, 12, 14, 10, 15, 9],
        skills: &[Athletics, Survival],
        cantrips: &["Druidcraft", "Shillelagh"],
        spells: &["Cure Wounds", "Longstrider", "Jump"],
    },
];

const FIGHTER: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Versatile fighter with good offense and defense",
        attributes: [15, 14, 14, 8, 10, 10],
        skills: &[Athletics, Perception],
        cantrips: &[],
        spells: &[],
    },
    PlaystylePreset {
        name: "strength",
        description: "Powerful melee fighter focused on raw strength",
        attributes: [15, 14, 14, 8, 8, 12],
        skills: &[Athletics, Intimidation],
        cantrips: &[],
        spells: &[],
    },
    PlaystylePreset {
        name: "defensive",
        description: "Tank fighter with high constitution and defensive skills",
        attributes: [15, 12, 15, 8, 10, 11],
        skills: &[Athletics, Insight],
        cantrips: &[],
        spells: &[],
    },
];

const MONK: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Balanced monk with mobility and stealth skills",
        attributes: [12, 15, 13, 10, 12, 11],
        skills: &[Acrobatics, Stealth],
        cantrips: &[],
        spells: &[],
    },
    PlaystylePreset {
        name: "striker",
        description: "Offensive monk focused on damage and mobility",
        attributes: [12, 15, 13, 8, 12, 13],
        skills: &[Athletics, Acrobatics],
        cantrips: &[],
        spells: &[],
    },
    PlaystylePreset {
        name: "defensive",
        description: "Defensive monk with wisdom-based abilities",
        attributes: [10, 15, 13, 12, 12, 11],
        skills: &[Insight, Perception],
        cantrips: &[],
        spells: &[],
    },
];

const PALADIN: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Balanced paladin with martial and divine abilities",
        attributes: [15, 10, 13, 8, 12, 14],
        skills: &[Athletics, Persuasion],
        cantrips: &["Sacred Flame", "Thaumaturgy"],
        spells: &["Divine Favor", "Bless", "Cure Wounds"],
    },
    PlaystylePreset {
        name: "tank",
        description: "Defensive paladin focused on protection and healing",
        attributes: [15, 8, 14, 10, 12, 13],
        skills: &[Athletics, Insight],
        cantrips: &["Sacred Flame", "Thaumaturgy"],
        spells: &["Shield of Faith", "Divine Favor", "Cure Wounds"],
    },
    PlaystylePreset {
        name: "charismatic",
        description: "Charismatic paladin with strong social and leadership skills",
        attributes: [13, 10, 13, 8, 12, 15],
        skills: &[Persuasion, Intimidation],
        cantrips: &["Sacred Flame", "Thaumaturgy"],
        spells: &["Command", "Bless", "Cure Wounds"],
    },
];

const RANGER: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Balanced ranger with wilderness and tracking skills",
        attributes: [12, 15, 12, 10, 13, 11],
        skills: &[Survival, Perception],
        cantrips: &[],
        spells: &[],
    },
    PlaystylePreset {
        name: "archer",
        description: "Ranged combat specialist with stealth and perception",
        attributes: [8, 15, 13, 12, 12, 13],
        skills: &[Stealth, Perception],
        cantrips: &[],
        spells: &[],
    },
    PlaystylePreset {
        name: "beastmaster",
        description: "Beast master focused on animal companions and nature",
        attributes: [12, 12, 13, 10, 15, 11],
        skills: &[AnimalHandling, Survival],
        cantrips: &[],
        spells: &[],
    },
];

const ROGUE: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Versatile rogue with stealth and thievery skills",
        attributes: [10, 15, 13, 12, 12, 11],
        skills: &[Stealth, SleightOfHand],
        cantrips: &[],
        spells: &[],
    },
    PlaystylePreset {
        name: "assassin",
        description: "Deadly assassin focused on stealth and deception",
        attributes: [12, 15, 13, 13, 8, 12],
        skills: &[Stealth, Deception],
        cantrips: &[],
        spells: &[],
    },
    PlaystylePreset {
        name: "scout",
        description: "Scout rogue with excellent perception and mobility",
        attributes: [8, 15, 13, 12, 12, 13],
        skills: &[Stealth, Perception],
        cantrips: &[],
        spells: &[],
    },
];

const SORCERER: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Balanced sorcerer with damage and utility spells",
        attributes: [8, 12, 14, 12, 11, 15],
        skills: &[Arcana, Deception],
        cantrips: &["Fire Bolt", "Prestidigitation"],
        spells: &["Magic Missile", "Shield", "Charm Person"],
    },
    PlaystylePreset {
        name: "damage",
        description: "Damage-focused sorcerer specializing in evocation",
        attributes: [8, 12, 14, 10, 13, 15],
        skills: &[Arcana, Intimidation],
        cantrips: &["Fire Bolt", "Ray of Frost"],
        spells: &["Burning Hands", "Magic Missile", "Thunderwave"],
    },
    PlaystylePreset {
        name: "control",
        description: "Control-focused sorcerer with enchantment and illusion",
        attributes: [8, 12, 13, 12, 11, 15],
        skills: &[Arcana, Persuasion],
        cantrips: &["Mage Hand", "Message"],
        spells: &["Charm Person", "Sleep", "Suggestion"],
    },
];

const WARLOCK: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Balanced warlock with damage and utility abilities",
        attributes: [8, 12, 14, 12, 11, 15],
        skills: &[Arcana, Deception],
        cantrips: &["Eldritch Blast", "Prestidigitation"],
        spells: &["Eldritch Blast", "Hex", "Charm Person"],
    },
    PlaystylePreset {
        name: "blaster",
        description: "Damage-focused warlock with powerful blasting abilities",
        attributes: [8, 12, 14, 10, 13, 15],
        skills: &[Arcana, Intimidation],
        cantrips: &["Eldritch Blast", "Ray of Frost"],
        spells: &["Eldritch Blast", "Hex", "Armor of Agathys"],
    },
    PlaystylePreset {
        name: "utility",
        description: "Utility-focused warlock with information gathering abilities",
        attributes: [8, 12, 13, 12, 11, 15],
        skills: &[Arcana, Persuasion],
        cantrips: &["Eldritch Blast", "Mage Hand"],
        spells: &["Eldritch Blast", "Unseen Servant", "Comprehend Languages"],
    },
];

const WIZARD: &[PlaystylePreset] = &[
    PlaystylePreset {
        name: "balanced",
        description: "Versatile wizard with balanced spell selection",
        attributes: [8, 12, 14, 15, 12, 11],
        skills: &[Arcana, History],
        cantrips: &["Fire Bolt", "Prestidigitation"],
        spells: &["Magic Missile", "Shield", "Mage Armor"],
    },
    PlaystylePreset {
        name: "evoker",
        description: "Damage-focused wizard specializing in evocation spells",
        attributes: [8, 10, 14, 15, 13, 12],
        skills: &[Arcana, Investigation],
        cantrips: &["Fire Bolt", "Ray of Frost"],
        spells: &["Burning Hands", "Magic Missile", "Thunderwave"],
    },
    PlaystylePreset {
        name: "utility",
        description: "Utility wizard focused on non-combat spells",
        attributes: [8, 12, 13, 15, 12, 13],
        skills: &[Arcana, Investigation],
        cantrips: &["Mage Hand", "Message"],
        spells: &["Detect Magic", "Comprehend Languages", "Unseen Servant"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_has_three_presets() {
        for class in [
            "Barbarian", "Bard", "Cleric", "Druid", "Fighter", "Monk", "Paladin", "Ranger",
            "Rogue", "Sorcerer", "Warlock", "Wizard",
        ] {
            let presets = presets_for(class);
            assert_eq!(presets.len(), 3, "{class}");
            assert_eq!(presets[0].name, "balanced", "{class}");
        }
        assert!(presets_for("Artificer").is_empty());
    }

    #[test]
    fn test_find_preset() {
        let evoker = find_preset("Wizard", "evoker").unwrap();
        assert_eq!(evoker.scores().intelligence, 15);
        assert!(evoker.cantrips.contains(&"Fire Bolt"));
        assert!(find_preset("Wizard", "Evoker").is_none());
    }

    #[test]
    fn test_presets_stay_in_point_buy_range() {
        for class in ["Bard", "Paladin", "Sorcerer", "Warlock"] {
            for preset in presets_for(class) {
                assert!(preset.attributes.iter().all(|s| (8..=15).contains(s)));
            }
        }
    }
}
