use serde::{Deserialize, Serialize};

use super::ValidationError;
use crate::domain::value_objects::{CharacterTheme, HexColor, ThemePalette};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDto {
    pub id: String,
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub text_color: String,
    pub background_color: String,
    pub border_color: String,
}

impl From<&CharacterTheme> for ThemeDto {
    fn from(theme: &CharacterTheme) -> Self {
        let p = &theme.palette;
        Self {
            id: theme.id.clone(),
            name: theme.name.clone(),
            primary_color: p.primary.to_string(),
            secondary_color: p.secondary.to_string(),
            accent_color: p.accent.to_string(),
            text_color: p.text.to_string(),
            background_color: p.background.to_string(),
            border_color: p.border.to_string(),
        }
    }
}

impl TryFrom<ThemeDto> for CharacterTheme {
    type Error = ValidationError;

    fn try_from(dto: ThemeDto) -> Result<Self, Self::Error> {
        let palette = ThemePalette {
            primary: dto.primary_color.parse::<HexColor>()?,
            secondary: dto.secondary_color.parse::<HexColor>()?,
            accent: dto.accent_color.parse::<HexColor>()?,
            text: dto.text_color.parse::<HexColor>()?,
            background: dto.background_color.parse::<HexColor>()?,
            border: dto.border_color.parse::<HexColor>()?,
        };
        Ok(CharacterTheme {
            id: dto.id,
            name: dto.name,
            palette,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectThemeRequestDto {
    pub theme_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomColorRequestDto {
    pub color: String,
}

/// Current theme plus the editable custom palette
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStateDto {
    pub current: ThemeDto,
    pub custom: ThemeDto,
    pub custom_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ThemePreset;

    #[test]
    fn test_theme_dto_uses_hex_strings() {
        let dto = ThemeDto::from(&CharacterTheme::from_preset(ThemePreset::Classic));
        assert_eq!(dto.id, "classic");
        assert!(dto.primary_color.starts_with('#'));
        assert_eq!(dto.primary_color.len(), 7);
    }

    #[test]
    fn test_invalid_colour_is_rejected() {
        let mut dto = ThemeDto::from(&CharacterTheme::default());
        dto.border_color = "#12345".to_string();
        let err = CharacterTheme::try_from(dto).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidColor(_)));
    }

    #[test]
    fn test_theme_converts_back() {
        let theme = CharacterTheme::from_preset(ThemePreset::Ocean);
        let back = CharacterTheme::try_from(ThemeDto::from(&theme)).unwrap();
        assert_eq!(back, theme);
    }
}
