//! Theme Service - Preset selection and the editable custom palette
//!
//! The store only knows the current theme. This service keeps the custom
//! palette draft and whether custom mode is active, and swaps whole themes
//! into the store.

use tracing::{debug, info, instrument};

use super::CharacterStore;
use crate::application::dto::ValidationError;
use crate::domain::value_objects::{
    CharacterTheme, HexColor, PaletteSlot, ThemePalette, ThemePreset, CUSTOM_THEME_ID,
};

#[derive(Debug, Clone, Default)]
pub struct ThemeService {
    custom_palette: ThemePalette,
    custom_mode: bool,
}

impl ThemeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a stored theme; a stored custom theme re-enters custom mode
    pub fn resume(theme: &CharacterTheme) -> Self {
        if theme.is_custom() {
            Self {
                custom_palette: theme.palette,
                custom_mode: true,
            }
        } else {
            Self::default()
        }
    }

    pub fn custom_palette(&self) -> ThemePalette {
        self.custom_palette
    }

    pub fn custom_mode(&self) -> bool {
        self.custom_mode
    }

    pub fn custom_theme(&self) -> CharacterTheme {
        CharacterTheme::custom(self.custom_palette)
    }

    pub fn predefined_themes(&self) -> Vec<CharacterTheme> {
        CharacterTheme::predefined()
    }

    pub fn select_preset(&mut self, store: &mut CharacterStore, preset: ThemePreset) {
        self.custom_mode = false;
        store.set_theme(CharacterTheme::from_preset(preset));
    }

    /// Select by id; "custom" enables custom mode
    #[instrument(skip(self, store))]
    pub fn select_by_id(
        &mut self,
        store: &mut CharacterStore,
        id: &str,
    ) -> Result<CharacterTheme, ValidationError> {
        if id == CUSTOM_THEME_ID {
            self.enable_custom(store);
        } else {
            let preset = ThemePreset::from_id(id)
                .ok_or_else(|| ValidationError::UnknownTheme(id.to_string()))?;
            self.select_preset(store, preset);
        }
        Ok(store.theme())
    }

    pub fn enable_custom(&mut self, store: &mut CharacterStore) {
        self.custom_mode = true;
        info!("Custom theme enabled");
        store.set_theme(self.custom_theme());
    }

    /// Edit one slot of the custom palette. While custom mode is active the
    /// edited theme is applied immediately.
    #[instrument(skip(self, store))]
    pub fn update_custom_color(
        &mut self,
        store: &mut CharacterStore,
        slot: PaletteSlot,
        color: HexColor,
    ) -> ThemePalette {
        self.custom_palette = self.custom_palette.with_color(slot, color);
        debug!(slot = slot.key(), color = %color, "Custom palette edited");
        if self.custom_mode {
            store.set_theme(self.custom_theme());
        }
        self.custom_palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_custom_palette_starts_as_goblin_grape() {
        let service = ThemeService::new();
        assert_eq!(service.custom_palette(), ThemePreset::GoblinGrape.palette());
        assert!(!service.custom_mode());
    }

    #[test]
    fn test_select_by_id() {
        let mut service = ThemeService::new();
        let mut store = CharacterStore::default();
        let theme = service.select_by_id(&mut store, "ocean").unwrap();
        assert_eq!(theme.id, "ocean");
        assert_eq!(store.theme().palette, ThemePreset::Ocean.palette());
    }

    #[test]
    fn test_unknown_theme_leaves_store_alone() {
        let mut service = ThemeService::new();
        let mut store = CharacterStore::default();
        let err = service.select_by_id(&mut store, "neon").unwrap_err();
        assert_eq!(err, ValidationError::UnknownTheme("neon".to_string()));
        assert_eq!(store.theme().id, "goblin-grape");
    }

    #[test]
    fn test_editing_in_custom_mode_applies_immediately() {
        let mut service = ThemeService::new();
        let mut store = CharacterStore::default();
        service.enable_custom(&mut store);

        let events = Arc::new(Mutex::new(0));
        let counter = events.clone();
        store.subscribe(move |_| *counter.lock().unwrap() += 1);

        let red = HexColor::rgb(0xFF, 0, 0);
        service.update_custom_color(&mut store, PaletteSlot::Accent, red);
        assert_eq!(store.theme().palette.accent, red);
        assert!(store.theme().is_custom());
        assert_eq!(*events.lock().unwrap(), 1);
    }

    #[test]
    fn test_editing_outside_custom_mode_only_changes_draft() {
        let mut service = ThemeService::new();
        let mut store = CharacterStore::default();
        service.select_preset(&mut store, ThemePreset::Fire);

        let blue = HexColor::rgb(0, 0, 0xFF);
        service.update_custom_color(&mut store, PaletteSlot::Primary, blue);
        assert_eq!(store.theme().id, "fire");
        assert_eq!(service.custom_palette().primary, blue);

        service.select_by_id(&mut store, "custom").unwrap();
        assert_eq!(store.theme().palette.primary, blue);
    }

    #[test]
    fn test_selecting_preset_leaves_custom_mode() {
        let mut service = ThemeService::new();
        let mut store = CharacterStore::default();
        service.enable_custom(&mut store);
        service.select_preset(&mut store, ThemePreset::Classic);
        assert!(!service.custom_mode());
    }

    #[test]
    fn test_resume_from_custom_theme() {
        let palette = ThemePreset::Forest.palette();
        let service = ThemeService::resume(&CharacterTheme::custom(palette));
        assert!(service.custom_mode());
        assert_eq!(service.custom_palette(), palette);
    }
}
