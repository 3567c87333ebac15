//! Application settings value object
//!
//! AppSettings carries serde derives because it is served as-is from
//! `GET /api/settings`; the JSON shape is the API contract.

use serde::{Deserialize, Serialize};

/// Tunable behaviour of the sheet engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    // Dice animation
    pub dice_rolling_delay_ms: u64,
    pub dice_result_display_ms: u64,

    // Session defaults
    pub auto_fill_default: bool,
    pub default_theme: String,

    // Export layout
    pub export_wrap_width: usize,
    pub skills_per_column: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dice_rolling_delay_ms: 1000,
            dice_result_display_ms: 3000,
            auto_fill_default: true,
            default_theme: "goblin-grape".to_string(),
            export_wrap_width: 90,
            skills_per_column: 9,
        }
    }
}

impl AppSettings {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dice_rolling_delay_ms: env_or(
                "CHARSHEET_DICE_ROLLING_DELAY_MS",
                defaults.dice_rolling_delay_ms,
            ),
            dice_result_display_ms: env_or(
                "CHARSHEET_DICE_RESULT_DISPLAY_MS",
                defaults.dice_result_display_ms,
            ),
            auto_fill_default: env_or("CHARSHEET_AUTO_FILL_DEFAULT", defaults.auto_fill_default),
            default_theme: env_or("CHARSHEET_DEFAULT_THEME", defaults.default_theme),
            export_wrap_width: env_or("CHARSHEET_EXPORT_WRAP_WIDTH", defaults.export_wrap_width),
            skills_per_column: env_or("CHARSHEET_SKILLS_PER_COLUMN", defaults.skills_per_column),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
