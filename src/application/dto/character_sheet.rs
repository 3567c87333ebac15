//! Character sheet JSON shape
//!
//! Field names follow the sheet's saved-file format (camelCase, flat coin and
//! detail fields) so exported sheets can be imported again unchanged.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ValidationError;
use crate::domain::entities::{
    AbilityScore, Attack, CharacterDetails, CharacterSheet, Currency, DeathSaves, SavingThrow,
    Skill, SpellLevel, Spellcasting,
};
use crate::domain::value_objects::{Ability, AbilityMap};

/// One value per ability, keyed by the lowercase ability name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AbilityTableDto<T> {
    pub strength: T,
    pub dexterity: T,
    pub constitution: T,
    pub intelligence: T,
    pub wisdom: T,
    pub charisma: T,
}

impl<T: Clone> AbilityTableDto<T> {
    fn from_map(map: &AbilityMap<T>) -> Self {
        Self {
            strength: map[Ability::Strength].clone(),
            dexterity: map[Ability::Dexterity].clone(),
            constitution: map[Ability::Constitution].clone(),
            intelligence: map[Ability::Intelligence].clone(),
            wisdom: map[Ability::Wisdom].clone(),
            charisma: map[Ability::Charisma].clone(),
        }
    }
}

impl<T> AbilityTableDto<T> {
    fn into_entries(self) -> [(Ability, T); 6] {
        [
            (Ability::Strength, self.strength),
            (Ability::Dexterity, self.dexterity),
            (Ability::Constitution, self.constitution),
            (Ability::Intelligence, self.intelligence),
            (Ability::Wisdom, self.wisdom),
            (Ability::Charisma, self.charisma),
        ]
    }
}

/// Score arrives as raw JSON so a non-integer is reported rather than coerced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AbilityDto {
    pub score: Value,
    #[serde(default)]
    pub modifier: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SavingThrowDto {
    #[serde(default)]
    pub proficient: bool,
    #[serde(default)]
    pub value: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillDto {
    pub name: String,
    pub ability: String,
    #[serde(default)]
    pub proficient: bool,
    #[serde(default)]
    pub value: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AttackDto {
    pub name: String,
    pub atk_bonus: String,
    pub damage_type: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DeathSavesDto {
    pub successes: u8,
    pub failures: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SpellLevelDto {
    pub level: u8,
    pub slots_total: u32,
    pub slots_expended: u32,
    pub spells: Vec<String>,
}

/// Wire and storage form of a character sheet
///
/// Missing fields take their value from the blank template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterSheetDto {
    pub character_name: String,
    pub class_name: String,
    pub level: u8,
    pub background: String,
    pub player_name: String,
    pub race: String,
    pub alignment: String,
    pub experience_points: u32,

    pub proficiency_bonus: i32,
    pub armor_class: i32,
    pub initiative: i32,
    pub speed: i32,
    pub hit_point_maximum: i32,
    pub current_hit_points: i32,
    pub temporary_hit_points: i32,
    pub hit_dice: String,
    pub hit_dice_total: u32,
    pub death_saves: DeathSavesDto,

    pub abilities: AbilityTableDto<AbilityDto>,
    pub saving_throws: AbilityTableDto<SavingThrowDto>,
    pub skills: Vec<SkillDto>,
    pub passive_perception: i32,
    pub inspiration: bool,

    pub equipment: String,
    pub attacks_spellcasting: Vec<AttackDto>,
    pub features_traits: String,
    pub other_proficiencies_languages: String,
    pub cp: u32,
    pub sp: u32,
    pub ep: u32,
    pub gp: u32,
    pub pp: u32,

    pub personality_traits: String,
    pub ideals: String,
    pub bonds: String,
    pub flaws: String,

    pub age: String,
    pub height: String,
    pub weight: String,
    pub eyes: String,
    pub skin: String,
    pub hair: String,
    pub character_appearance: String,
    pub allies_organizations: String,
    pub character_backstory: String,
    pub additional_features_traits: String,
    pub treasure: String,

    pub spellcasting_class: String,
    /// Lowercase ability name, or empty when the character casts no spells
    pub spellcasting_ability: String,
    #[serde(rename = "spellSaveDC")]
    pub spell_save_dc: i32,
    pub spell_attack_bonus: i32,
    pub cantrips: Vec<String>,
    pub spells: Vec<SpellLevelDto>,
}

impl Default for CharacterSheetDto {
    fn default() -> Self {
        Self::from(&CharacterSheet::default())
    }
}

impl CharacterSheetDto {
    /// Parse an imported JSON document straight into a validated sheet
    pub fn parse_sheet(json: &str) -> Result<CharacterSheet, ValidationError> {
        let dto: CharacterSheetDto =
            serde_json::from_str(json).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        CharacterSheet::try_from(dto)
    }
}

impl From<&CharacterSheet> for CharacterSheetDto {
    fn from(s: &CharacterSheet) -> Self {
        let abilities = s.abilities.map(|_, a| AbilityDto {
            score: Value::from(a.score),
            modifier: a.modifier,
        });
        let saving_throws = s.saving_throws.map(|_, t| SavingThrowDto {
            proficient: t.proficient,
            value: t.value,
        });

        Self {
            character_name: s.character_name.clone(),
            class_name: s.class_name.clone(),
            level: s.level,
            background: s.background.clone(),
            player_name: s.player_name.clone(),
            race: s.race.clone(),
            alignment: s.alignment.clone(),
            experience_points: s.experience_points,
            proficiency_bonus: s.proficiency_bonus,
            armor_class: s.armor_class,
            initiative: s.initiative,
            speed: s.speed,
            hit_point_maximum: s.hit_point_maximum,
            current_hit_points: s.current_hit_points,
            temporary_hit_points: s.temporary_hit_points,
            hit_dice: s.hit_dice.clone(),
            hit_dice_total: s.hit_dice_total,
            death_saves: DeathSavesDto {
                successes: s.death_saves.successes,
                failures: s.death_saves.failures,
            },
            abilities: AbilityTableDto::from_map(&abilities),
            saving_throws: AbilityTableDto::from_map(&saving_throws),
            skills: s
                .skills
                .iter()
                .map(|skill| SkillDto {
                    name: skill.name.clone(),
                    ability: skill.ability.key().to_string(),
                    proficient: skill.proficient,
                    value: skill.value,
                })
                .collect(),
            passive_perception: s.passive_perception,
            inspiration: s.inspiration,
            equipment: s.equipment.clone(),
            attacks_spellcasting: s
                .attacks
                .iter()
                .map(|a| AttackDto {
                    name: a.name.clone(),
                    atk_bonus: a.attack_bonus.clone(),
                    damage_type: a.damage_type.clone(),
                })
                .collect(),
            features_traits: s.features_traits.clone(),
            other_proficiencies_languages: s.other_proficiencies_languages.clone(),
            cp: s.currency.cp,
            sp: s.currency.sp,
            ep: s.currency.ep,
            gp: s.currency.gp,
            pp: s.currency.pp,
            personality_traits: s.personality_traits.clone(),
            ideals: s.ideals.clone(),
            bonds: s.bonds.clone(),
            flaws: s.flaws.clone(),
            age: s.details.age.clone(),
            height: s.details.height.clone(),
            weight: s.details.weight.clone(),
            eyes: s.details.eyes.clone(),
            skin: s.details.skin.clone(),
            hair: s.details.hair.clone(),
            character_appearance: s.details.appearance.clone(),
            allies_organizations: s.details.allies_organizations.clone(),
            character_backstory: s.details.backstory.clone(),
            additional_features_traits: s.details.additional_features_traits.clone(),
            treasure: s.details.treasure.clone(),
            spellcasting_class: s.spellcasting.class_name.clone(),
            spellcasting_ability: s
                .spellcasting
                .ability
                .map(|a| a.key().to_string())
                .unwrap_or_default(),
            spell_save_dc: s.spellcasting.spell_save_dc,
            spell_attack_bonus: s.spellcasting.spell_attack_bonus,
            cantrips: s.spellcasting.cantrips.clone(),
            spells: s
                .spellcasting
                .spell_levels
                .iter()
                .map(|l| SpellLevelDto {
                    level: l.level,
                    slots_total: l.slots_total,
                    slots_expended: l.slots_expended,
                    spells: l.spells.clone(),
                })
                .collect(),
        }
    }
}

/// Validates the outside shape; derived values are copied as given and are
/// recomputed by whoever stores the sheet.
impl TryFrom<CharacterSheetDto> for CharacterSheet {
    type Error = ValidationError;

    fn try_from(dto: CharacterSheetDto) -> Result<Self, Self::Error> {
        let mut abilities: AbilityMap<AbilityScore> = AbilityMap::default();
        for (ability, entry) in dto.abilities.into_entries() {
            let score = parse_score(ability, &entry.score)?;
            abilities[ability] = AbilityScore {
                score,
                modifier: entry.modifier,
            };
        }

        let mut saving_throws: AbilityMap<SavingThrow> = AbilityMap::default();
        for (ability, entry) in dto.saving_throws.into_entries() {
            saving_throws[ability] = SavingThrow {
                proficient: entry.proficient,
                value: entry.value,
            };
        }

        let mut seen = HashSet::new();
        let mut skills = Vec::with_capacity(dto.skills.len());
        for entry in dto.skills {
            if !seen.insert(entry.name.clone()) {
                return Err(ValidationError::DuplicateSkill(entry.name));
            }
            let ability: Ability = entry.ability.parse()?;
            skills.push(Skill {
                name: entry.name,
                ability,
                proficient: entry.proficient,
                value: entry.value,
            });
        }

        let spellcasting_ability = match dto.spellcasting_ability.trim() {
            "" => None,
            key => Some(key.parse::<Ability>()?),
        };

        Ok(CharacterSheet {
            character_name: dto.character_name,
            class_name: dto.class_name,
            level: dto.level,
            background: dto.background,
            player_name: dto.player_name,
            race: dto.race,
            alignment: dto.alignment,
            experience_points: dto.experience_points,
            proficiency_bonus: dto.proficiency_bonus,
            armor_class: dto.armor_class,
            initiative: dto.initiative,
            speed: dto.speed,
            hit_point_maximum: dto.hit_point_maximum,
            current_hit_points: dto.current_hit_points,
            temporary_hit_points: dto.temporary_hit_points,
            hit_dice: dto.hit_dice,
            hit_dice_total: dto.hit_dice_total,
            death_saves: DeathSaves {
                successes: dto.death_saves.successes,
                failures: dto.death_saves.failures,
            },
            abilities,
            saving_throws,
            skills,
            passive_perception: dto.passive_perception,
            inspiration: dto.inspiration,
            equipment: dto.equipment,
            attacks: dto
                .attacks_spellcasting
                .into_iter()
                .map(|a| Attack {
                    name: a.name,
                    attack_bonus: a.atk_bonus,
                    damage_type: a.damage_type,
                })
                .collect(),
            features_traits: dto.features_traits,
            other_proficiencies_languages: dto.other_proficiencies_languages,
            currency: Currency {
                cp: dto.cp,
                sp: dto.sp,
                ep: dto.ep,
                gp: dto.gp,
                pp: dto.pp,
            },
            personality_traits: dto.personality_traits,
            ideals: dto.ideals,
            bonds: dto.bonds,
            flaws: dto.flaws,
            details: CharacterDetails {
                age: dto.age,
                height: dto.height,
                weight: dto.weight,
                eyes: dto.eyes,
                skin: dto.skin,
                hair: dto.hair,
                appearance: dto.character_appearance,
                allies_organizations: dto.allies_organizations,
                backstory: dto.character_backstory,
                additional_features_traits: dto.additional_features_traits,
                treasure: dto.treasure,
            },
            spellcasting: Spellcasting {
                class_name: dto.spellcasting_class,
                ability: spellcasting_ability,
                spell_save_dc: dto.spell_save_dc,
                spell_attack_bonus: dto.spell_attack_bonus,
                cantrips: dto.cantrips,
                spell_levels: dto
                    .spells
                    .into_iter()
                    .map(|l| SpellLevel {
                        level: l.level,
                        slots_total: l.slots_total,
                        slots_expended: l.slots_expended,
                        spells: l.spells,
                    })
                    .collect(),
            },
        })
    }
}

/// Accepts a JSON integer, or a string holding one (form fields arrive as text)
pub fn parse_score(ability: Ability, raw: &Value) -> Result<i32, ValidationError> {
    let parsed = match raw {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ValidationError::NonNumericScore {
        ability,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_round_trips_through_json() {
        let sheet = CharacterSheet::default().with_name("Brakka");
        let json = serde_json::to_string(&CharacterSheetDto::from(&sheet)).unwrap();
        let back = CharacterSheetDto::parse_sheet(&json).unwrap();
        assert_eq!(back, sheet);
    }

    #[test]
    fn test_wire_names_match_saved_files() {
        let value = serde_json::to_value(CharacterSheetDto::default()).unwrap();
        assert!(value.get("characterName").is_some());
        assert!(value.get("spellSaveDC").is_some());
        assert!(value.get("attacksSpellcasting").is_some());
        assert_eq!(value["abilities"]["strength"]["score"], json!(10));
        assert_eq!(value["skills"][0]["ability"], json!("dexterity"));
        assert_eq!(value["spellcastingAbility"], json!(""));
    }

    #[test]
    fn test_partial_document_fills_from_template() {
        let sheet = CharacterSheetDto::parse_sheet(r#"{"characterName":"Pip","level":4}"#).unwrap();
        assert_eq!(sheet.character_name, "Pip");
        assert_eq!(sheet.level, 4);
        assert_eq!(sheet.skills.len(), 18);
        assert_eq!(sheet.hit_dice, "1d8");
    }

    #[test]
    fn test_non_numeric_score_is_rejected() {
        let mut value = serde_json::to_value(CharacterSheetDto::default()).unwrap();
        value["abilities"]["wisdom"]["score"] = json!("abc");
        let err = CharacterSheetDto::parse_sheet(&value.to_string()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonNumericScore { ability: Ability::Wisdom, .. }
        ));
    }

    #[test]
    fn test_numeric_string_score_is_accepted() {
        assert_eq!(parse_score(Ability::Strength, &json!(" 15 ")).unwrap(), 15);
        assert!(parse_score(Ability::Strength, &json!(12.5)).is_err());
        assert!(parse_score(Ability::Strength, &json!(null)).is_err());
    }

    #[test]
    fn test_unknown_skill_ability_is_rejected() {
        let mut value = serde_json::to_value(CharacterSheetDto::default()).unwrap();
        value["skills"][0]["ability"] = json!("luck");
        let err = CharacterSheetDto::parse_sheet(&value.to_string()).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownAbility(_)));
    }

    #[test]
    fn test_duplicate_skill_is_rejected() {
        let mut value = serde_json::to_value(CharacterSheetDto::default()).unwrap();
        let first = value["skills"][0].clone();
        value["skills"].as_array_mut().unwrap().push(first);
        let err = CharacterSheetDto::parse_sheet(&value.to_string()).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateSkill("Acrobatics".to_string()));
    }

    #[test]
    fn test_spellcasting_ability_parses() {
        let sheet =
            CharacterSheetDto::parse_sheet(r#"{"spellcastingAbility":"intelligence"}"#).unwrap();
        assert_eq!(sheet.spellcasting.ability, Some(Ability::Intelligence));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = CharacterSheetDto::parse_sheet("not json").unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }
}
