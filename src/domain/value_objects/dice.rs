//! Ability score generation: roll 4d6, drop the lowest die

use std::fmt;

/// Number of dice rolled for one ability score
pub const ABILITY_DICE: usize = 4;
/// Faces on each die
pub const DIE_SIDES: i32 = 6;

/// Result of one 4d6-drop-lowest roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityRoll {
    /// Individual dice in roll order
    pub rolls: [i32; ABILITY_DICE],
    /// Index of the discarded die (first occurrence of the minimum)
    pub dropped_index: usize,
    /// Sum of the three kept dice
    pub total: i32,
}

impl AbilityRoll {
    /// Build the result from already-rolled dice
    pub fn from_dice(rolls: [i32; ABILITY_DICE]) -> Self {
        let mut dropped_index = 0;
        for (index, &value) in rolls.iter().enumerate().skip(1) {
            // Strict comparison keeps the earliest minimum on ties
            if value < rolls[dropped_index] {
                dropped_index = index;
            }
        }

        let total = rolls
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != dropped_index)
            .map(|(_, value)| value)
            .sum();

        Self {
            rolls,
            dropped_index,
            total,
        }
    }

    pub fn dropped(&self) -> i32 {
        self.rolls[self.dropped_index]
    }

    /// Kept dice in roll order
    pub fn kept(&self) -> Vec<i32> {
        self.rolls
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != self.dropped_index)
            .map(|(_, value)| *value)
            .collect()
    }

    /// Format as e.g. "4d6 drop lowest [2, 5, 6, 2] - 2 = 13"
    pub fn breakdown(&self) -> String {
        let rolls: Vec<String> = self.rolls.iter().map(|r| r.to_string()).collect();
        format!(
            "4d6 drop lowest [{}] - {} = {}",
            rolls.join(", "),
            self.dropped(),
            self.total
        )
    }
}

impl fmt::Display for AbilityRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.breakdown())
    }
}
