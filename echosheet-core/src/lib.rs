//! D&D 5e character sheet builder.
//!
//! This crate provides:
//! - Rule tables for classes, races and backgrounds
//! - A spell catalog with per-class limits and selection validation
//! - Autofill that turns a partial sheet into a legal level-1 character
//! - Derived stats, leveling and equipment packs
//! - Build recommendations and an in-character chat responder
//! - Versioned JSON persistence
//!
//! # Quick Start
//!
//! ```no_run
//! use echosheet_core::{CharacterBuilder, SheetConfig, SheetEngine};
//!
//! let config = SheetConfig::from_env();
//! config.init_tracing();
//!
//! let engine = SheetEngine::new(&config);
//! let mut character = CharacterBuilder::new()
//!     .name("Elara")
//!     .race("Elf")
//!     .class("Wizard")
//!     .background("Sage")
//!     .playstyle("evoker")
//!     .build(&engine)
//!     .expect("valid character");
//!
//! engine.apply_equipment_pack(&mut character, "Scholar's Pack");
//! let advice = engine.recommendations(&character);
//! println!("{:?}", advice.subclass.recommended);
//! ```

pub mod abilities;
pub mod autofill;
pub mod character;
pub mod character_builder;
pub mod chat;
pub mod config;
pub mod engine;
pub mod equipment;
pub mod persist;
pub mod playstyles;
pub mod recommender;
pub mod rules;
pub mod spell_manager;
pub mod spells;

// Primary public API
pub use abilities::{Ability, AbilityScores, AttributeValidation, Skill};
pub use autofill::{Autofill, FillReport, SuggestionBundle};
pub use character::{Character, CharacterId, Currency, LevelUpError};
pub use character_builder::{BuilderError, CharacterBuilder};
pub use config::SheetConfig;
pub use engine::SheetEngine;
pub use equipment::{EquipmentPack, PackApplication};
pub use persist::{PersistError, SavedCharacter};
pub use recommender::{RecommendationBundle, Recommender};
pub use rules::RuleTables;
pub use spell_manager::{SpellManager, SpellValidation};
pub use spells::{SpellCatalog, SpellInfo};
