//! Boundary validation errors

use thiserror::Error;

use crate::domain::value_objects::{Ability, ColorParseError, UnknownAbilityError};

/// Raised when outside data cannot become a domain value.
///
/// Derivation never sees invalid input: everything is checked here first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Ability score for {ability} must be an integer, got {value}")]
    NonNumericScore { ability: Ability, value: String },
    #[error(transparent)]
    UnknownAbility(#[from] UnknownAbilityError),
    #[error("Skill '{0}' appears more than once")]
    DuplicateSkill(String),
    #[error(transparent)]
    InvalidColor(#[from] ColorParseError),
    #[error("Unknown theme: '{0}'")]
    UnknownTheme(String),
    #[error("Malformed input: {0}")]
    Malformed(String),
}
