//! Session repository port - persistence of the editing session
//!
//! The store itself never touches storage; a background worker forwards its
//! events here, and startup reads the last saved state back.

use async_trait::async_trait;

use crate::domain::entities::CharacterSheet;
use crate::domain::value_objects::CharacterTheme;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Stored data is invalid: {0}")]
    Invalid(String),
}

/// Whatever was last saved; missing parts fall back to defaults at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredSession {
    pub sheet: Option<CharacterSheet>,
    pub theme: Option<CharacterTheme>,
    pub auto_fill: Option<bool>,
}

#[async_trait]
pub trait SessionRepositoryPort: Send + Sync {
    async fn load(&self) -> Result<StoredSession, RepositoryError>;
    async fn save_sheet(&self, sheet: &CharacterSheet) -> Result<(), RepositoryError>;
    async fn save_theme(&self, theme: &CharacterTheme) -> Result<(), RepositoryError>;
    async fn save_auto_fill(&self, enabled: bool) -> Result<(), RepositoryError>;
}
