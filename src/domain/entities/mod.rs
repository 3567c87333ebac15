//! Domain entities - Core business objects

mod character_sheet;

pub use character_sheet::{
    default_skills, AbilityScore, Attack, CharacterDetails, CharacterSheet, Currency, DeathSaves,
    SavingThrow, Skill, SpellLevel, Spellcasting,
};
