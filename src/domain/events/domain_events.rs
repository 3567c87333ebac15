//! Domain events - Notifications of state changes
//!
//! Emitted by the character store after a mutation has fully settled. Each
//! event carries its own copy of the new state, so receivers never share the
//! store's authoritative sheet.

use chrono::{DateTime, Utc};

use crate::domain::entities::CharacterSheet;
use crate::domain::value_objects::CharacterTheme;

/// Base data for all events
#[derive(Debug, Clone)]
pub struct EventMetadata {
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }
}

/// Store state changes
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// The sheet changed (edit, roll, proficiency toggle or wholesale replace)
    CharacterChanged {
        metadata: EventMetadata,
        sheet: CharacterSheet,
    },

    /// A different theme was applied
    ThemeChanged {
        metadata: EventMetadata,
        theme: CharacterTheme,
    },

    /// Auto-fill of rolled scores was switched on or off
    AutoFillChanged {
        metadata: EventMetadata,
        enabled: bool,
    },
}

impl DomainEvent {
    pub fn character_changed(sheet: CharacterSheet) -> Self {
        Self::CharacterChanged {
            metadata: EventMetadata::default(),
            sheet,
        }
    }

    pub fn theme_changed(theme: CharacterTheme) -> Self {
        Self::ThemeChanged {
            metadata: EventMetadata::default(),
            theme,
        }
    }

    pub fn auto_fill_changed(enabled: bool) -> Self {
        Self::AutoFillChanged {
            metadata: EventMetadata::default(),
            enabled,
        }
    }

    pub fn metadata(&self) -> &EventMetadata {
        match self {
            Self::CharacterChanged { metadata, .. }
            | Self::ThemeChanged { metadata, .. }
            | Self::AutoFillChanged { metadata, .. } => metadata,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CharacterChanged { .. } => "CharacterChanged",
            Self::ThemeChanged { .. } => "ThemeChanged",
            Self::AutoFillChanged { .. } => "AutoFillChanged",
        }
    }
}
