//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP/WebSocket,
//! storage, renderers) can serialize/deserialize without pulling serde into
//! the sheet model.

mod character_sheet;
mod dice;
mod document;
mod session;
mod theme;
mod validation;

pub use character_sheet::{parse_score, CharacterSheetDto};
pub use dice::{AbilityRollDto, RollDisplayDto};
pub use document::{DocumentColors, DocumentPage, DocumentSection, SectionStyle, SheetDocument};
pub use session::{
    AbilityScoreRequestDto, AutoFillDto, ExportQueryDto, ProficiencyBonusRequestDto,
    ProficiencyToggledDto, SessionSnapshotDto,
};
pub use theme::{CustomColorRequestDto, SelectThemeRequestDto, ThemeDto, ThemeStateDto};
pub use validation::ValidationError;
