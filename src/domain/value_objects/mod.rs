//! Value objects - Immutable objects defined by their attributes

mod ability;
mod dice;
mod ids;
mod settings;
mod theme;

pub use ability::{Ability, AbilityMap, UnknownAbilityError};
pub use dice::{AbilityRoll, ABILITY_DICE, DIE_SIDES};
pub use ids::*;
pub use settings::AppSettings;
pub use theme::{
    CharacterTheme, ColorParseError, HexColor, PaletteSlot, ThemePalette, ThemePreset,
    CUSTOM_THEME_ID,
};
