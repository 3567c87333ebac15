//! Derived statistics for a character sheet
//!
//! Recomputes every value that depends on another value: ability modifiers,
//! saving throws, skills, initiative and passive perception. Pure and
//! idempotent; callers run it after every change to a score, a proficiency
//! flag or the proficiency bonus.

use crate::domain::entities::CharacterSheet;
use crate::domain::value_objects::Ability;

/// Skill whose value feeds passive perception (exact, case-sensitive match)
pub const PERCEPTION_SKILL: &str = "Perception";

/// Passive perception before the Perception skill is added
pub const PASSIVE_PERCEPTION_BASE: i32 = 10;

/// floor((score - 10) / 2)
///
/// Integer division in Rust truncates toward zero, so use Euclidean division
/// to floor negative differences (score 9 gives -1, not 0).
pub fn ability_modifier(score: i32) -> i32 {
    score.saturating_sub(10).div_euclid(2)
}

fn proficiency_contribution(proficient: bool, proficiency_bonus: i32) -> i32 {
    if proficient {
        proficiency_bonus
    } else {
        0
    }
}

/// Recompute all derived fields in place. No other field is touched.
pub fn derive(sheet: &mut CharacterSheet) {
    for (_, ability) in sheet.abilities.iter_mut() {
        ability.modifier = ability_modifier(ability.score);
    }

    let bonus = sheet.proficiency_bonus;
    let modifiers = sheet.abilities.map(|_, a| a.modifier);

    for (ability, save) in sheet.saving_throws.iter_mut() {
        save.value = modifiers[ability]
            .saturating_add(proficiency_contribution(save.proficient, bonus));
    }

    for skill in sheet.skills.iter_mut() {
        skill.value = modifiers[skill.ability]
            .saturating_add(proficiency_contribution(skill.proficient, bonus));
    }

    sheet.initiative = modifiers[Ability::Dexterity];

    let perception = sheet
        .skill(PERCEPTION_SKILL)
        .map(|s| s.value)
        .unwrap_or(0);
    sheet.passive_perception = PASSIVE_PERCEPTION_BASE.saturating_add(perception);
}

/// Owned variant of [`derive`]
pub fn derived(mut sheet: CharacterSheet) -> CharacterSheet {
    derive(&mut sheet);
    sheet
}

/// True when every derived field already matches its inputs
pub fn is_consistent(sheet: &CharacterSheet) -> bool {
    derived(sheet.clone()) == *sheet
}
