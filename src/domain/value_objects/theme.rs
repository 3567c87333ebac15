//! Sheet colour themes
//!
//! A theme is an immutable named palette of six colours. Switching themes
//! always swaps the whole value; custom themes are built fresh from a palette.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Returned when a colour string is not `#RRGGBB`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid colour '{0}', expected #RRGGBB")]
pub struct ColorParseError(pub String);

/// An sRGB colour, written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    /// Parses `#RRGGBB` or `RRGGBB`, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError(s.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// The six palette positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteSlot {
    Primary,
    Secondary,
    Accent,
    Text,
    Background,
    Border,
}

impl PaletteSlot {
    pub const ALL: [PaletteSlot; 6] = [
        PaletteSlot::Primary,
        PaletteSlot::Secondary,
        PaletteSlot::Accent,
        PaletteSlot::Text,
        PaletteSlot::Background,
        PaletteSlot::Border,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PaletteSlot::Primary => "primary",
            PaletteSlot::Secondary => "secondary",
            PaletteSlot::Accent => "accent",
            PaletteSlot::Text => "text",
            PaletteSlot::Background => "background",
            PaletteSlot::Border => "border",
        }
    }
}

impl FromStr for PaletteSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteSlot::ALL
            .into_iter()
            .find(|slot| slot.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown palette slot: '{}'", s))
    }
}

/// Six-colour palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub primary: HexColor,
    pub secondary: HexColor,
    pub accent: HexColor,
    pub text: HexColor,
    pub background: HexColor,
    pub border: HexColor,
}

impl ThemePalette {
    /// Copy of this palette with one slot replaced
    pub fn with_color(mut self, slot: PaletteSlot, color: HexColor) -> Self {
        match slot {
            PaletteSlot::Primary => self.primary = color,
            PaletteSlot::Secondary => self.secondary = color,
            PaletteSlot::Accent => self.accent = color,
            PaletteSlot::Text => self.text = color,
            PaletteSlot::Background => self.background = color,
            PaletteSlot::Border => self.border = color,
        }
        self
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        ThemePreset::default().palette()
    }
}

/// Built-in themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemePreset {
    Classic,
    #[default]
    GoblinGrape,
    Forest,
    Ocean,
    Fire,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 5] = [
        ThemePreset::Classic,
        ThemePreset::GoblinGrape,
        ThemePreset::Forest,
        ThemePreset::Ocean,
        ThemePreset::Fire,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ThemePreset::Classic => "classic",
            ThemePreset::GoblinGrape => "goblin-grape",
            ThemePreset::Forest => "forest",
            ThemePreset::Ocean => "ocean",
            ThemePreset::Fire => "fire",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemePreset::Classic => "Classic D&D",
            ThemePreset::GoblinGrape => "Goblin Grape",
            ThemePreset::Forest => "Forest",
            ThemePreset::Ocean => "Ocean",
            ThemePreset::Fire => "Fire",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    pub fn palette(&self) -> ThemePalette {
        match self {
            ThemePreset::Classic => ThemePalette {
                primary: HexColor::rgb(0x8B, 0x45, 0x13),
                secondary: HexColor::rgb(0xD2, 0x69, 0x1E),
                accent: HexColor::rgb(0xCD, 0x85, 0x3F),
                text: HexColor::rgb(0x00, 0x00, 0x00),
                background: HexColor::rgb(0xF5, 0xDE, 0xB3),
                border: HexColor::rgb(0x8B, 0x45, 0x13),
            },
            ThemePreset::GoblinGrape => ThemePalette {
                primary: HexColor::rgb(0x6B, 0x2C, 0x6B),
                secondary: HexColor::rgb(0x8B, 0x47, 0x89),
                accent: HexColor::rgb(0xA8, 0x55, 0xA8),
                text: HexColor::rgb(0xFF, 0xFF, 0xFF),
                background: HexColor::rgb(0x2D, 0x1B, 0x2E),
                border: HexColor::rgb(0x6B, 0x2C, 0x6B),
            },
            ThemePreset::Forest => ThemePalette {
                primary: HexColor::rgb(0x2D, 0x50, 0x16),
                secondary: HexColor::rgb(0x4A, 0x7C, 0x2C),
                accent: HexColor::rgb(0x6B, 0x9F, 0x4A),
                text: HexColor::rgb(0xFF, 0xFF, 0xFF),
                background: HexColor::rgb(0x1A, 0x2F, 0x0F),
                border: HexColor::rgb(0x2D, 0x50, 0x16),
            },
            ThemePreset::Ocean => ThemePalette {
                primary: HexColor::rgb(0x1E, 0x3A, 0x5F),
                secondary: HexColor::rgb(0x2E, 0x5A, 0x8F),
                accent: HexColor::rgb(0x4A, 0x7A, 0xBF),
                text: HexColor::rgb(0xFF, 0xFF, 0xFF),
                background: HexColor::rgb(0x0F, 0x1F, 0x2F),
                border: HexColor::rgb(0x1E, 0x3A, 0x5F),
            },
            ThemePreset::Fire => ThemePalette {
                primary: HexColor::rgb(0x8B, 0x00, 0x00),
                secondary: HexColor::rgb(0xB2, 0x22, 0x22),
                accent: HexColor::rgb(0xDC, 0x14, 0x3C),
                text: HexColor::rgb(0xFF, 0xFF, 0xFF),
                background: HexColor::rgb(0x2B, 0x00, 0x00),
                border: HexColor::rgb(0x8B, 0x00, 0x00),
            },
        }
    }
}

/// Id of the user-editable theme
pub const CUSTOM_THEME_ID: &str = "custom";

/// A named palette applied to the sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterTheme {
    pub id: String,
    pub name: String,
    pub palette: ThemePalette,
}

impl CharacterTheme {
    pub fn from_preset(preset: ThemePreset) -> Self {
        Self {
            id: preset.id().to_string(),
            name: preset.display_name().to_string(),
            palette: preset.palette(),
        }
    }

    pub fn custom(palette: ThemePalette) -> Self {
        Self {
            id: CUSTOM_THEME_ID.to_string(),
            name: "Custom".to_string(),
            palette,
        }
    }

    pub fn predefined() -> Vec<CharacterTheme> {
        ThemePreset::ALL.into_iter().map(Self::from_preset).collect()
    }

    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_THEME_ID
    }
}

impl Default for CharacterTheme {
    fn default() -> Self {
        Self::from_preset(ThemePreset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parse_and_display() {
        let color: HexColor = "#a855a8".parse().unwrap();
        assert_eq!(color.to_rgb(), [0xA8, 0x55, 0xA8]);
        assert_eq!(color.to_string(), "#A855A8");

        let bare: HexColor = "2D1B2E".parse().unwrap();
        assert_eq!(bare, HexColor::rgb(0x2D, 0x1B, 0x2E));
    }

    #[test]
    fn test_hex_color_rejects_malformed() {
        assert!("#12345".parse::<HexColor>().is_err());
        assert!("#GG0000".parse::<HexColor>().is_err());
        assert!("red".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_default_theme_is_goblin_grape() {
        let theme = CharacterTheme::default();
        assert_eq!(theme.id, "goblin-grape");
        assert_eq!(theme.name, "Goblin Grape");
        assert_eq!(theme.palette.primary.to_string(), "#6B2C6B");
    }

    #[test]
    fn test_predefined_order_and_ids() {
        let ids: Vec<String> = CharacterTheme::predefined().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["classic", "goblin-grape", "forest", "ocean", "fire"]);
    }

    #[test]
    fn test_palette_with_color_replaces_one_slot() {
        let red = HexColor::rgb(0xFF, 0, 0);
        let palette = ThemePalette::default().with_color(PaletteSlot::Accent, red);
        assert_eq!(palette.accent, red);
        assert_eq!(palette.primary, ThemePalette::default().primary);
    }

    #[test]
    fn test_custom_theme() {
        let theme = CharacterTheme::custom(ThemePreset::Ocean.palette());
        assert!(theme.is_custom());
        assert_eq!(theme.name, "Custom");
        assert!(!CharacterTheme::default().is_custom());
    }
}
