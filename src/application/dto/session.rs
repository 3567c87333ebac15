use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CharacterSheetDto, ThemeDto};

#[derive(Debug, Deserialize)]
pub struct AbilityScoreRequestDto {
    /// Raw JSON so that non-integers are reported, not coerced
    pub score: Value,
}

#[derive(Debug, Deserialize)]
pub struct ProficiencyBonusRequestDto {
    pub bonus: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoFillDto {
    pub enabled: bool,
}

/// Result of flipping a proficiency flag
#[derive(Debug, Serialize)]
pub struct ProficiencyToggledDto {
    pub proficient: bool,
    pub sheet: CharacterSheetDto,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQueryDto {
    #[serde(default)]
    pub format: Option<String>,
}

/// Everything a freshly connected client needs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshotDto {
    pub sheet: CharacterSheetDto,
    pub theme: ThemeDto,
    pub auto_fill: bool,
}
