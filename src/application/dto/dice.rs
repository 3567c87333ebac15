use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Ability, AbilityRoll};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRollDto {
    pub ability: Option<Ability>,
    pub rolls: Vec<i32>,
    pub dropped_index: usize,
    pub dropped: i32,
    pub kept: Vec<i32>,
    pub total: i32,
    pub breakdown: String,
    /// True when the total was written onto the sheet
    pub applied: bool,
}

impl AbilityRollDto {
    pub fn new(roll: &AbilityRoll, ability: Option<Ability>, applied: bool) -> Self {
        Self {
            ability,
            rolls: roll.rolls.to_vec(),
            dropped_index: roll.dropped_index,
            dropped: roll.dropped(),
            kept: roll.kept(),
            total: roll.total,
            breakdown: roll.breakdown(),
            applied,
        }
    }
}

/// What the dice display is currently showing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum RollDisplayDto {
    Idle,
    Rolling { ability: Option<Ability> },
    ShowingResult { roll: AbilityRollDto },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_dto_carries_breakdown() {
        let roll = AbilityRoll::from_dice([2, 5, 6, 2]);
        let dto = AbilityRollDto::new(&roll, Some(Ability::Strength), true);
        assert_eq!(dto.kept, vec![5, 6, 2]);
        assert_eq!(dto.dropped, 2);
        assert_eq!(dto.breakdown, "4d6 drop lowest [2, 5, 6, 2] - 2 = 13");

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["droppedIndex"], 0);
        assert_eq!(json["ability"], "strength");
    }

    #[test]
    fn test_display_is_tagged_by_phase() {
        let json = serde_json::to_value(RollDisplayDto::Idle).unwrap();
        assert_eq!(json["phase"], "idle");
        let json = serde_json::to_value(RollDisplayDto::Rolling { ability: None }).unwrap();
        assert_eq!(json["phase"], "rolling");
    }
}
