//! Character sheet aggregate - one player character's full record

use crate::domain::value_objects::{Ability, AbilityMap};

/// Score and derived modifier for one ability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityScore {
    pub score: i32,
    /// Always floor((score - 10) / 2) once derivation has run
    pub modifier: i32,
}

impl AbilityScore {
    pub fn new(score: i32) -> Self {
        Self { score, modifier: 0 }
    }
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Saving throw for one ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SavingThrow {
    pub proficient: bool,
    pub value: i32,
}

/// A skill keyed to one ability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    /// Unique within a sheet; "Perception" feeds passive perception
    pub name: String,
    pub ability: Ability,
    pub proficient: bool,
    pub value: i32,
}

impl Skill {
    pub fn new(name: impl Into<String>, ability: Ability) -> Self {
        Self {
            name: name.into(),
            ability,
            proficient: false,
            value: 0,
        }
    }
}

/// An entry in the attacks & spellcasting table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attack {
    pub name: String,
    pub attack_bonus: String,
    pub damage_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeathSaves {
    pub successes: u8,
    pub failures: u8,
}

/// Coin purse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Currency {
    pub cp: u32,
    pub sp: u32,
    pub ep: u32,
    pub gp: u32,
    pub pp: u32,
}

/// Page-two descriptive details
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacterDetails {
    pub age: String,
    pub height: String,
    pub weight: String,
    pub eyes: String,
    pub skin: String,
    pub hair: String,
    pub appearance: String,
    pub allies_organizations: String,
    pub backstory: String,
    pub additional_features_traits: String,
    pub treasure: String,
}

/// Spells known at one spell level
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpellLevel {
    pub level: u8,
    pub slots_total: u32,
    pub slots_expended: u32,
    pub spells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spellcasting {
    pub class_name: String,
    pub ability: Option<Ability>,
    pub spell_save_dc: i32,
    pub spell_attack_bonus: i32,
    pub cantrips: Vec<String>,
    pub spell_levels: Vec<SpellLevel>,
}

impl Default for Spellcasting {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            ability: None,
            spell_save_dc: 10,
            spell_attack_bonus: 0,
            cantrips: Vec::new(),
            spell_levels: Vec::new(),
        }
    }
}

/// The complete character sheet
///
/// Ability modifiers, saving throw values, skill values, `initiative` and
/// `passive_perception` are derived; everything else is descriptive data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSheet {
    // Header
    pub character_name: String,
    pub class_name: String,
    pub level: u8,
    pub background: String,
    pub player_name: String,
    pub race: String,
    pub alignment: String,
    pub experience_points: u32,

    // Core stats
    pub proficiency_bonus: i32,
    pub armor_class: i32,
    pub initiative: i32,
    pub speed: i32,
    pub hit_point_maximum: i32,
    pub current_hit_points: i32,
    pub temporary_hit_points: i32,
    pub hit_dice: String,
    pub hit_dice_total: u32,
    pub death_saves: DeathSaves,

    pub abilities: AbilityMap<AbilityScore>,
    pub saving_throws: AbilityMap<SavingThrow>,
    pub skills: Vec<Skill>,

    pub passive_perception: i32,
    pub inspiration: bool,

    // Equipment and features
    pub equipment: String,
    pub attacks: Vec<Attack>,
    pub features_traits: String,
    pub other_proficiencies_languages: String,
    pub currency: Currency,

    // Personality
    pub personality_traits: String,
    pub ideals: String,
    pub bonds: String,
    pub flaws: String,

    pub details: CharacterDetails,
    pub spellcasting: Spellcasting,
}

impl CharacterSheet {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.character_name = name.into();
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>, level: u8) -> Self {
        self.class_name = class_name.into();
        self.level = level;
        self
    }

    pub fn with_score(mut self, ability: Ability, score: i32) -> Self {
        self.abilities[ability].score = score;
        self
    }

    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }

    pub fn skill_mut(&mut self, name: &str) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| s.name == name)
    }
}

impl Default for CharacterSheet {
    /// Blank level-1 template; derived fields are not yet computed
    fn default() -> Self {
        Self {
            character_name: String::new(),
            class_name: String::new(),
            level: 1,
            background: String::new(),
            player_name: String::new(),
            race: String::new(),
            alignment: String::new(),
            experience_points: 0,
            proficiency_bonus: 2,
            armor_class: 10,
            initiative: 0,
            speed: 30,
            hit_point_maximum: 10,
            current_hit_points: 10,
            temporary_hit_points: 0,
            hit_dice: "1d8".to_string(),
            hit_dice_total: 1,
            death_saves: DeathSaves::default(),
            abilities: AbilityMap::default(),
            saving_throws: AbilityMap::default(),
            skills: default_skills(),
            passive_perception: 10,
            inspiration: false,
            equipment: String::new(),
            attacks: Vec::new(),
            features_traits: String::new(),
            other_proficiencies_languages: String::new(),
            currency: Currency::default(),
            personality_traits: String::new(),
            ideals: String::new(),
            bonds: String::new(),
            flaws: String::new(),
            details: CharacterDetails::default(),
            spellcasting: Spellcasting::default(),
        }
    }
}

/// The eighteen standard skills in alphabetical order
pub fn default_skills() -> Vec<Skill> {
    use Ability::*;

    [
        ("Acrobatics", Dexterity),
        ("Animal Handling", Wisdom),
        ("Arcana", Intelligence),
        ("Athletics", Strength),
        ("Deception", Charisma),
        ("History", Intelligence),
        ("Insight", Wisdom),
        ("Intimidation", Charisma),
        ("Investigation", Intelligence),
        ("Medicine", Wisdom),
        ("Nature", Intelligence),
        ("Perception", Wisdom),
        ("Performance", Charisma),
        ("Persuasion", Charisma),
        ("Religion", Intelligence),
        ("Sleight of Hand", Dexterity),
        ("Stealth", Dexterity),
        ("Survival", Wisdom),
    ]
    .into_iter()
    .map(|(name, ability)| Skill::new(name, ability))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let sheet = CharacterSheet::default();
        assert_eq!(sheet.level, 1);
        assert_eq!(sheet.proficiency_bonus, 2);
        assert_eq!(sheet.hit_dice, "1d8");
        assert_eq!(sheet.skills.len(), 18);
        assert!(sheet.abilities.iter().all(|(_, a)| a.score == 10));
        assert!(sheet.saving_throws.iter().all(|(_, s)| !s.proficient));
    }

    #[test]
    fn test_default_skill_names_are_unique() {
        let skills = default_skills();
        let mut names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), skills.len());
    }

    #[test]
    fn test_skill_lookup_is_exact() {
        let sheet = CharacterSheet::default();
        assert_eq!(sheet.skill("Perception").map(|s| s.ability), Some(Ability::Wisdom));
        assert!(sheet.skill("perception").is_none());
    }

    #[test]
    fn test_builders() {
        let sheet = CharacterSheet::default()
            .with_name("Mirabel")
            .with_class("Wizard", 3)
            .with_score(Ability::Intelligence, 17);
        assert_eq!(sheet.character_name, "Mirabel");
        assert_eq!(sheet.level, 3);
        assert_eq!(sheet.abilities[Ability::Intelligence].score, 17);
    }
}
