//! Application services - Use case implementations
//!
//! The character store owns session state; the other services act on it.
//! Each service depends only on ports and domain types.

pub mod character_store;
pub mod dice_roll_service;
pub mod export_service;
pub mod theme_service;

pub use character_store::{CharacterStore, StoreError};
pub use dice_roll_service::{DiceRollService, RollTiming};
pub use export_service::{ExportError, ExportFormat, ExportService};
pub use theme_service::ThemeService;
